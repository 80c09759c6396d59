/// Log list view: renders the in-dashboard log sink

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

pub struct LogListView {
    grid: DataGrid,
}

impl LogListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Logs]");
        grid.add_column("Time", 19, CellKind::Date);
        grid.add_column("Level", 6, CellKind::Text);
        grid.add_column("Message", 0, CellKind::Text);
        Self { grid }
    }
}

impl Default for LogListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for LogListView {
    fn id(&self) -> ViewId {
        ViewId::Logs
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, _status: &NodeStatus, logs: &[LogEntry]) {
        let rows = logs
            .iter()
            .rev() // newest first
            .map(|e| {
                vec![
                    Cell::Date(e.timestamp),
                    Cell::Text(e.level.as_str().to_string()),
                    Cell::Text(e.message.clone()),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, None, frame, area, theme);
    }
}
