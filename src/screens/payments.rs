/// Payment list view

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

pub struct PaymentListView {
    grid: DataGrid,
}

impl PaymentListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Payments]");
        grid.add_column("Date", 19, CellKind::Date);
        grid.add_column("Value", 12, CellKind::Int);
        grid.add_column("Fee", 8, CellKind::Int);
        grid.add_column("Status", 10, CellKind::Text);
        grid.add_column("Payment hash", 0, CellKind::Text);
        Self { grid }
    }
}

impl Default for PaymentListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for PaymentListView {
    fn id(&self) -> ViewId {
        ViewId::Payments
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, status: &NodeStatus, _logs: &[LogEntry]) {
        let rows = status
            .payments
            .iter()
            .map(|p| {
                vec![
                    Cell::Date(p.creation_date),
                    Cell::Int(p.value_sat),
                    Cell::Int(p.fee_sat),
                    Cell::Text(p.status.clone()),
                    Cell::Text(p.payment_hash.clone()),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, None, frame, area, theme);
    }
}
