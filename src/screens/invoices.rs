/// Invoice list view

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use crate::core::logbuf::LogEntry;
use crate::core::status::NodeStatus;
use crate::keys::{KeyAction, KeyHandle};
use crate::screens::{render_grid_view, View, ViewId};
use crate::theme::Theme;
use crate::widgets::{Cell, CellKind, DataGrid};

const SHORTCUTS: &[KeyHandle] = &[
    KeyHandle::new(
        "Scroll Up",
        "Up",
        KeyCode::Up,
        KeyModifiers::NONE,
        KeyAction::SelectionUp,
        false,
    ),
    KeyHandle::new(
        "Scroll Down",
        "Down",
        KeyCode::Down,
        KeyModifiers::NONE,
        KeyAction::SelectionDown,
        false,
    ),
];

pub struct InvoiceListView {
    grid: DataGrid,
}

impl InvoiceListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Invoices]");
        grid.add_column("Created", 19, CellKind::Date);
        grid.add_column("Settled", 7, CellKind::Text);
        grid.add_column("Value", 12, CellKind::Int);
        grid.add_column("Settle date", 19, CellKind::Date);
        grid.add_column("Memo", 0, CellKind::Text);
        Self { grid }
    }
}

impl Default for InvoiceListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for InvoiceListView {
    fn id(&self) -> ViewId {
        ViewId::Invoices
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, status: &NodeStatus, _logs: &[LogEntry]) {
        let rows = status
            .invoices
            .iter()
            .map(|i| {
                vec![
                    Cell::Date(i.creation_date),
                    Cell::Text(if i.settled { "yes" } else { "no" }.to_string()),
                    Cell::Int(i.value),
                    Cell::Date(i.settle_date),
                    Cell::Text(i.memo.clone()),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, None, frame, area, theme);
    }
}
