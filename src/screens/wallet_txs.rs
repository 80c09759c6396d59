/// Wallet transaction list view, including the "new address" modal flow

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use crate::core::logbuf::LogEntry;
use crate::core::status::NodeStatus;
use crate::keys::{KeyAction, KeyHandle};
use crate::screens::{render_grid_view, CommandResult, View, ViewCommand, ViewId};
use crate::theme::Theme;
use crate::widgets::{Cell, CellKind, DataGrid, FieldSpec, FormOutcome, FormState};

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
    KeyHandle::new(
        "New address",
        "Alt+N",
        KeyCode::Char('n'),
        KeyModifiers::ALT,
        KeyAction::OpenModal,
        false,
    ),
];

const REQUEST_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "address_type",
    display: "Address type",
    max_len: 6,
    read_only: false,
}];

const RESPONSE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "address_type",
        display: "Address type",
        max_len: 6,
        read_only: true,
    },
    FieldSpec {
        name: "address",
        display: "Address",
        max_len: 90,
        read_only: true,
    },
];

const DEFAULT_ADDRESS_TYPE: &str = "np2wkh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormStage {
    Request,
    Response,
}

pub struct WalletTxListView {
    grid: DataGrid,
    form: Option<FormState>,
    stage: FormStage,
}

impl WalletTxListView {
    pub fn new() -> Self {
        let mut grid = DataGrid::new("[Wallet transactions]");
        grid.add_column("Amount", 12, CellKind::Int);
        grid.add_column("Conf.", 8, CellKind::Int);
        grid.add_column("Block Height", 8, CellKind::Int);
        grid.add_column("Fees", 8, CellKind::Int);
        grid.add_column("Timestamp", 19, CellKind::Date);
        grid.add_column("TxHash", 0, CellKind::Text);
        grid.add_column("BlockHash", 0, CellKind::Text);
        grid.add_column("Dest.", 0, CellKind::List);
        Self {
            grid,
            form: None,
            stage: FormStage::Request,
        }
    }
}

impl Default for WalletTxListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for WalletTxListView {
    fn id(&self) -> ViewId {
        ViewId::WalletTxs
    }

    fn shortcuts(&self) -> &[KeyHandle] {
        SHORTCUTS
    }

    fn grid_mut(&mut self) -> &mut DataGrid {
        &mut self.grid
    }

    fn reload(&mut self, status: &NodeStatus, _logs: &[LogEntry]) {
        let rows = status
            .transactions
            .iter()
            .map(|tx| {
                vec![
                    Cell::Int(tx.amount),
                    Cell::Int(tx.num_confirmations as i64),
                    Cell::Int(tx.block_height as i64),
                    Cell::Int(tx.total_fees),
                    Cell::Date(tx.time_stamp),
                    Cell::Text(tx.tx_hash.clone()),
                    Cell::Text(tx.block_hash.clone()),
                    Cell::List(tx.dest_addresses.clone()),
                ]
            })
            .collect();
        self.grid.set_rows(rows);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_grid_view(&mut self.grid, self.form.as_ref(), frame, area, theme);
    }

    fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }

    fn open_modal(&mut self) {
        self.stage = FormStage::Request;
        self.form = Some(FormState::new(
            "New address",
            REQUEST_FIELDS,
            &[DEFAULT_ADDRESS_TYPE],
        ));
    }

    fn on_form_outcome(&mut self, outcome: FormOutcome) -> ViewCommand {
        let closed = self.form.as_ref().map_or(true, |f| f.is_closed());
        match self.stage {
            FormStage::Request => {
                if outcome.accepted {
                    self.form = None;
                    let kind = outcome
                        .values
                        .iter()
                        .find(|(name, _)| name == "address_type")
                        .map(|(_, v)| v.clone())
                        .unwrap_or_else(|| DEFAULT_ADDRESS_TYPE.to_string());
                    ViewCommand::NewAddress { kind }
                } else {
                    // Cancelled forms go away; invalid ones stay for correction.
                    if closed {
                        self.form = None;
                    }
                    ViewCommand::None
                }
            }
            FormStage::Response => {
                if closed {
                    self.form = None;
                }
                ViewCommand::None
            }
        }
    }

    fn on_command_result(&mut self, result: CommandResult) {
        let CommandResult::AddressGenerated { kind, address } = result;
        self.stage = FormStage::Response;
        self.form = Some(FormState::new(
            "New address",
            RESPONSE_FIELDS,
            &[&kind, &address],
        ));
    }
}
