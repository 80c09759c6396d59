/// Pending channel list view

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

pub struct PendingChannelListView {
    grid: DataGrid,
}

impl PendingChannelListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Pending channels]");
        grid.add_column("Remote key", 0, CellKind::Text);
        grid.add_column("Channel point", 0, CellKind::Text);
        grid.add_column("Capacity", 12, CellKind::Int);
        grid.add_column("Local", 12, CellKind::Int);
        grid.add_column("Remote", 12, CellKind::Int);
        Self { grid }
    }
}

impl Default for PendingChannelListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for PendingChannelListView {
    fn id(&self) -> ViewId {
        ViewId::PendingChannels
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, status: &NodeStatus, _logs: &[LogEntry]) {
        let rows = status
            .pending_channels
            .iter()
            .map(|c| {
                vec![
                    Cell::Text(c.remote_node_pub.clone()),
                    Cell::Text(c.channel_point.clone()),
                    Cell::Int(c.capacity),
                    Cell::Int(c.local_balance),
                    Cell::Int(c.remote_balance),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, None, frame, area, theme);
    }
}
