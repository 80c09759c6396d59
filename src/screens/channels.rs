/// Channel list view

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

pub struct ChannelListView {
    grid: DataGrid,
}

impl ChannelListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Channels]");
        grid.add_column("Active", 6, CellKind::Text);
        grid.add_column("Remote key", 0, CellKind::Text);
        grid.add_column("Capacity", 12, CellKind::Int);
        grid.add_column("Local", 12, CellKind::Int);
        grid.add_column("Remote", 12, CellKind::Int);
        grid.add_column("Sent", 12, CellKind::Int);
        grid.add_column("Received", 12, CellKind::Int);
        grid.add_column("Updates", 10, CellKind::Int);
        Self { grid }
    }
}

impl Default for ChannelListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ChannelListView {
    fn id(&self) -> ViewId {
        ViewId::Channels
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, status: &NodeStatus, _logs: &[LogEntry]) {
        let rows = status
            .channels
            .iter()
            .map(|c| {
                vec![
                    Cell::Text(if c.active { "yes" } else { "no" }.to_string()),
                    Cell::Text(c.remote_pubkey.clone()),
                    Cell::Int(c.capacity),
                    Cell::Int(c.local_balance),
                    Cell::Int(c.remote_balance),
                    Cell::Int(c.total_satoshis_sent),
                    Cell::Int(c.total_satoshis_received),
                    Cell::Int(c.num_updates as i64),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, None, frame, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::Channel;

    #[test]
    fn reload_replaces_rows_wholesale() {
        let mut view = ChannelListView::new();
        let mut status = NodeStatus::new(ViewId::Channels);
        status.channels = vec![
            Channel {
                active: true,
                remote_pubkey: "02aa".into(),
                capacity: 1_000_000,
                ..Default::default()
            },
            Channel {
                remote_pubkey: "03bb".into(),
                ..Default::default()
            },
        ];
        view.reload(&status, &[]);
        assert_eq!(view.grid_mut().row_count(), 2);
        assert_eq!(
            view.grid_mut().rows()[0][0],
            Cell::Text("yes".to_string())
        );
        assert_eq!(view.grid_mut().rows()[1][0], Cell::Text("no".to_string()));

        status.channels.truncate(1);
        view.reload(&status, &[]);
        assert_eq!(view.grid_mut().row_count(), 1);
    }
}
