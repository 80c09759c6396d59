/// Peer list view

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

pub struct PeerListView {
    grid: DataGrid,
}

impl PeerListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Peers]");
        grid.add_column("PubKey", 0, CellKind::Text);
        grid.add_column("Address", 24, CellKind::Text);
        grid.add_column("Sent B", 10, CellKind::Int);
        grid.add_column("Recv B", 10, CellKind::Int);
        grid.add_column("Sat sent", 12, CellKind::Int);
        grid.add_column("Sat recv", 12, CellKind::Int);
        grid.add_column("Ping us", 10, CellKind::Int);
        Self { grid }
    }
}

impl Default for PeerListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for PeerListView {
    fn id(&self) -> ViewId {
        ViewId::Peers
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, status: &NodeStatus, _logs: &[LogEntry]) {
        let rows = status
            .peers
            .iter()
            .map(|p| {
                vec![
                    Cell::Text(p.pub_key.clone()),
                    Cell::Text(p.address.clone()),
                    Cell::Int(p.bytes_sent as i64),
                    Cell::Int(p.bytes_recv as i64),
                    Cell::Int(p.sat_sent),
                    Cell::Int(p.sat_recv),
                    Cell::Int(p.ping_time),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, None, frame, area, theme);
    }
}
