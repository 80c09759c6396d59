/// Dashboard views: one full-screen page per data category, all behind
/// one capability trait so the controller never names a concrete type.

pub mod channels;
pub mod invoices;
pub mod logs;
pub mod payments;
pub mod peers;
pub mod pending_channels;
pub mod wallet_txs;

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::logbuf::LogEntry;
use crate::core::status::NodeStatus;
use crate::keys::KeyHandle;
use crate::theme::Theme;
use crate::widgets::{DataGrid, FormOutcome, FormState};

pub use channels::ChannelListView;
pub use invoices::InvoiceListView;
pub use logs::LogListView;
pub use payments::PaymentListView;
pub use peers::PeerListView;
pub use pending_channels::PendingChannelListView;
pub use wallet_txs::WalletTxListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Channels,
    Peers,
    PendingChannels,
    Payments,
    Invoices,
    WalletTxs,
    Logs,
}

impl ViewId {
    pub fn all() -> &'static [ViewId] {
        &[
            ViewId::Channels,
            ViewId::Peers,
            ViewId::PendingChannels,
            ViewId::Payments,
            ViewId::Invoices,
            ViewId::WalletTxs,
            ViewId::Logs,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Channels => "Channels",
            ViewId::Peers => "Peers",
            ViewId::PendingChannels => "Pending chnls",
            ViewId::Payments => "Payments",
            ViewId::Invoices => "Invoices",
            ViewId::WalletTxs => "Wallet txs",
            ViewId::Logs => "Logs",
        }
    }
}

/// Deferred side effect requested by a view when a form completes. The
/// controller performs the daemon call and feeds the result back, so the
/// overlay itself stays free of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    None,
    NewAddress { kind: String },
}

/// Result of a controller-executed command, delivered back to the view.
#[derive(Debug, Clone)]
pub enum CommandResult {
    AddressGenerated { kind: String, address: String },
}

pub trait View: Send {
    fn id(&self) -> ViewId;
    fn shortcuts(&self) -> &[KeyHandle];
    fn grid_mut(&mut self) -> &mut DataGrid;

    /// Rebuild grid rows from the latest shared snapshot.
    fn reload(&mut self, status: &NodeStatus, logs: &[LogEntry]);

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn form_mut(&mut self) -> Option<&mut FormState> {
        None
    }

    /// Invoked by a view-local modal shortcut (e.g. "New address").
    fn open_modal(&mut self) {}

    fn on_form_outcome(&mut self, _outcome: FormOutcome) -> ViewCommand {
        ViewCommand::None
    }

    fn on_command_result(&mut self, _result: CommandResult) {}
}

/// All seven views, in `ViewId::all()` order.
pub fn build_views() -> Vec<Box<dyn View>> {
    vec![
        Box::new(ChannelListView::new()),
        Box::new(PeerListView::new()),
        Box::new(PendingChannelListView::new()),
        Box::new(PaymentListView::new()),
        Box::new(InvoiceListView::new()),
        Box::new(WalletTxListView::new()),
        Box::new(LogListView::new()),
    ]
}

/// Common render path: bordered block titled with the grid header, grid
/// lines inside, and the view's form overlay on top when one is open.
pub fn render_grid_view(
    grid: &mut DataGrid,
    form: Option<&FormState>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(grid.header.clone())
        .style(theme.normal);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    grid.set_render_size(inner.width, inner.height);
    let lines = grid.grid_rows(theme);
    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(form) = form {
        form.render(frame, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_view_in_order() {
        let views = build_views();
        assert_eq!(views.len(), ViewId::all().len());
        for (view, id) in views.iter().zip(ViewId::all()) {
            assert_eq!(view.id(), *id);
        }
    }

    #[test]
    fn every_view_has_scroll_shortcuts() {
        use crate::keys::KeyAction;
        for view in build_views() {
            let actions: Vec<KeyAction> =
                view.shortcuts().iter().map(|h| h.action).collect();
            assert!(actions.contains(&KeyAction::SelectionUp), "{:?}", view.id());
            assert!(actions.contains(&KeyAction::SelectionDown), "{:?}", view.id());
        }
    }
}
