/// Dashboard controller: terminal lifecycle, run loop, view switching and
/// refresh orchestration

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::logbuf::{LogBuffer, LogEntry};
use crate::core::source::NodeSource;
use crate::core::status::{refresh_once, NodeStatus};
use crate::keys::{KeyAction, KeyHandle, ShortcutTable};
use crate::screens::{build_views, CommandResult, View, ViewCommand, ViewId};
use crate::theme::Theme;
use crate::utils::group_thousands;

const GLOBAL_SHORTCUTS: &[KeyHandle] = &[
    KeyHandle::new(
        "Channels",
        "Alt+1",
        KeyCode::Char('1'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::Channels),
        true,
    ),
    KeyHandle::new(
        "Peers",
        "Alt+2",
        KeyCode::Char('2'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::Peers),
        true,
    ),
    KeyHandle::new(
        "Pending chnls",
        "Alt+3",
        KeyCode::Char('3'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::PendingChannels),
        true,
    ),
    KeyHandle::new(
        "Payments",
        "Alt+4",
        KeyCode::Char('4'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::Payments),
        true,
    ),
    KeyHandle::new(
        "Invoices",
        "Alt+5",
        KeyCode::Char('5'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::Invoices),
        true,
    ),
    KeyHandle::new(
        "Wallet txs",
        "Alt+6",
        KeyCode::Char('6'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::WalletTxs),
        true,
    ),
    KeyHandle::new(
        "Logs",
        "Alt+7",
        KeyCode::Char('7'),
        KeyModifiers::ALT,
        KeyAction::SwitchView(ViewId::Logs),
        true,
    ),
    KeyHandle::new(
        "Quit",
        "Q",
        KeyCode::Char('q'),
        KeyModifiers::NONE,
        KeyAction::Quit,
        true,
    ),
    KeyHandle::new(
        "Quit",
        "Ctrl+C",
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
        KeyAction::Quit,
        true,
    ),
];

pub struct App {
    views: Vec<Box<dyn View>>,
    active: ViewId,
    shortcuts: ShortcutTable,
    shared: Arc<Mutex<NodeStatus>>,
    source: Arc<dyn NodeSource>,
    logs: LogBuffer,
    theme: Theme,
    refresh_interval: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(source: Arc<dyn NodeSource>, refresh_secs: u64) -> Result<Self> {
        let active = ViewId::Channels;
        let views = build_views();

        let mut shortcuts = ShortcutTable::new();
        shortcuts
            .register(GLOBAL_SHORTCUTS)
            .context("global shortcut registration")?;
        let initial: Vec<KeyHandle> = views
            .iter()
            .find(|v| v.id() == active)
            .map(|v| v.shortcuts().to_vec())
            .unwrap_or_default();
        shortcuts
            .register(&initial)
            .context("view shortcut registration")?;

        Ok(Self {
            views,
            active,
            shortcuts,
            shared: Arc::new(Mutex::new(NodeStatus::new(active))),
            source,
            logs: LogBuffer::new(),
            theme: Theme::dark(),
            refresh_interval: Duration::from_secs(refresh_secs.max(1)),
            should_quit: false,
        })
    }

    pub fn active_view_id(&self) -> ViewId {
        self.active
    }

    pub fn shortcut_table(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    pub fn log_buffer(&self) -> &LogBuffer {
        &self.logs
    }

    fn active_view_mut(&mut self) -> &mut Box<dyn View> {
        let active = self.active;
        self.views
            .iter_mut()
            .find(|v| v.id() == active)
            .expect("view registry holds every ViewId")
    }

    fn active_view(&self) -> &dyn View {
        self.views
            .iter()
            .find(|v| v.id() == self.active)
            .map(|v| v.as_ref())
            .expect("view registry holds every ViewId")
    }

    /// Fire one refresh in the background without blocking the caller.
    fn spawn_refresh(&self) {
        let source = self.source.clone();
        let shared = self.shared.clone();
        let logs = self.logs.clone();
        tokio::spawn(async move {
            refresh_once(source.as_ref(), &shared, &logs).await;
        });
    }

    /// Switch the active view: swap out the outgoing view's local
    /// shortcuts, swap in the target's, and kick off a refresh for the new
    /// dataset. Runs only on the input thread, so transitions never race.
    pub fn switch_view(&mut self, target: ViewId) -> Result<()> {
        if target == self.active {
            return Ok(());
        }
        let outgoing = self.active_view().shortcuts().to_vec();
        self.shortcuts.unregister(&outgoing);

        self.active = target;
        self.shared.lock().expect("status lock poisoned").active = target;

        let incoming = self.active_view().shortcuts().to_vec();
        self.shortcuts
            .register(&incoming)
            .context("view shortcut registration")?;

        self.spawn_refresh();
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Refresh ticker: runs for the process lifetime, first tick fires
        // immediately for the initial data load.
        let source = self.source.clone();
        let shared = self.shared.clone();
        let logs = self.logs.clone();
        let interval = self.refresh_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                refresh_once(source.as_ref(), &shared, &logs).await;
            }
        });

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            self.refresh_view(terminal)?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Redraw the active view against the current snapshot. Safe to call
    /// from both the periodic loop iteration and right after user actions.
    pub fn refresh_view<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let snapshot = self.shared.lock().expect("status lock poisoned").clone();
        let entries = self.logs.entries();
        terminal.draw(|f| self.render_frame(f, &snapshot, &entries))?;
        Ok(())
    }

    async fn handle_key(&mut self, key_event: KeyEvent) -> Result<()> {
        // An open form captures all input until it completes.
        let view = self.active_view_mut();
        let form_result = view.form_mut().map(|form| form.handle_key(key_event));
        if let Some(result) = form_result {
            if let Some(outcome) = result {
                let cmd = view.on_form_outcome(outcome);
                self.run_command(cmd).await;
            }
            return Ok(());
        }

        let Some(action) = self
            .shortcuts
            .lookup(key_event.code, key_event.modifiers)
        else {
            return Ok(());
        };
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SwitchView(target) => self.switch_view(target)?,
            KeyAction::SelectionUp => self.active_view_mut().grid_mut().move_selection_up(),
            KeyAction::SelectionDown => self.active_view_mut().grid_mut().move_selection_down(),
            KeyAction::OpenModal => self.active_view_mut().open_modal(),
        }
        Ok(())
    }

    /// Execute a side effect requested by a view's completed form and hand
    /// the result back to it. Failures go to the log sink.
    async fn run_command(&mut self, cmd: ViewCommand) {
        match cmd {
            ViewCommand::None => {}
            ViewCommand::NewAddress { kind } => {
                match self.source.new_wallet_address(&kind).await {
                    Ok(address) => {
                        self.active_view_mut()
                            .on_command_result(CommandResult::AddressGenerated { kind, address });
                    }
                    Err(e) => self.logs.error(format!("newaddress: {}", e)),
                }
            }
        }
    }

    fn render_frame(&mut self, frame: &mut Frame, status: &NodeStatus, logs: &[LogEntry]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.size());

        self.render_header(frame, chunks[0], status);

        let theme = self.theme;
        let active = self.active;
        let view = self
            .views
            .iter_mut()
            .find(|v| v.id() == active)
            .expect("view registry holds every ViewId");
        view.reload(status, logs);
        view.render(frame, chunks[1], &theme);

        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, status: &NodeStatus) {
        let theme = &self.theme;

        let identity = match status.node_info {
            Some(ref info) => Line::from(vec![
                Span::styled(info.alias.clone(), theme.bold),
                Span::styled(format!("  {}", info.identity_pubkey), theme.normal),
                Span::styled(
                    format!(
                        "  height {}  peers {}  {}",
                        group_thousands(info.block_height as i64),
                        info.num_peers,
                        if info.synced_to_chain {
                            "synced"
                        } else {
                            "syncing"
                        }
                    ),
                    theme.highlight,
                ),
            ]),
            None => Line::from(Span::styled("connecting...", theme.highlight)),
        };

        let balance = match status.balance {
            Some(ref bal) => Line::from(Span::styled(
                format!(
                    "balance {} sat  confirmed {}  unconfirmed {}",
                    group_thousands(bal.total_balance),
                    group_thousands(bal.confirmed_balance),
                    group_thousands(bal.unconfirmed_balance)
                ),
                theme.normal,
            )),
            None => Line::from(""),
        };

        let mut tabs: Vec<Span> = Vec::new();
        for (i, id) in ViewId::all().iter().enumerate() {
            let style = if *id == self.active {
                self.theme.grid_selected
            } else {
                self.theme.label_header
            };
            tabs.push(Span::styled(format!(" {}:{} ", i + 1, id.title()), style));
        }

        let lines = vec![identity, balance, Line::from(tabs)];
        frame.render_widget(Paragraph::new(lines).style(theme.normal), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let parts: Vec<String> = self
            .shortcuts
            .handles()
            .iter()
            .filter(|h| !h.global)
            .map(|h| format!("{} {}", h.key_text, h.label))
            .chain(std::iter::once("Alt+1..7 views".to_string()))
            .chain(std::iter::once("Q quit".to_string()))
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                parts.join("  |  "),
                self.theme.highlight,
            ))),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::MockNodeSource;

    fn app() -> App {
        let mut source = MockNodeSource::new();
        // Background refreshes spawned by view switches may or may not run
        // before the test finishes; accept any call count.
        source
            .expect_get_node_info()
            .returning(|| Ok(Default::default()));
        source
            .expect_get_wallet_balance()
            .returning(|| Ok(Default::default()));
        source.expect_list_channels().returning(|| Ok(Vec::new()));
        source.expect_list_peers().returning(|| Ok(Vec::new()));
        source
            .expect_list_pending_channels()
            .returning(|| Ok(Vec::new()));
        source.expect_list_payments().returning(|| Ok(Vec::new()));
        source.expect_list_invoices().returning(|| Ok(Vec::new()));
        source
            .expect_list_wallet_transactions()
            .returning(|| Ok(Vec::new()));
        App::new(Arc::new(source), 60).unwrap()
    }

    #[tokio::test]
    async fn starts_on_channel_list_with_globals_bound() {
        let app = app();
        assert_eq!(app.active_view_id(), ViewId::Channels);
        assert_eq!(
            app.shortcut_table()
                .lookup(KeyCode::Char('4'), KeyModifiers::ALT),
            Some(KeyAction::SwitchView(ViewId::Payments))
        );
        assert_eq!(
            app.shortcut_table().lookup(KeyCode::Up, KeyModifiers::NONE),
            Some(KeyAction::SelectionUp)
        );
    }

    #[tokio::test]
    async fn switching_swaps_local_shortcuts_and_keeps_globals() {
        let mut app = app();
        let globals = GLOBAL_SHORTCUTS.len();
        let channel_locals = app
            .shortcut_table()
            .handles()
            .iter()
            .filter(|h| !h.global)
            .count();
        assert_eq!(app.shortcut_table().len(), globals + channel_locals);

        app.switch_view(ViewId::WalletTxs).unwrap();
        assert_eq!(app.active_view_id(), ViewId::WalletTxs);
        // Wallet txs adds the Alt+N modal binding on top of scrolling.
        assert_eq!(
            app.shortcut_table()
                .lookup(KeyCode::Char('n'), KeyModifiers::ALT),
            Some(KeyAction::OpenModal)
        );
        assert_eq!(app.shortcut_table().len(), globals + 3);

        app.switch_view(ViewId::Logs).unwrap();
        assert_eq!(
            app.shortcut_table()
                .lookup(KeyCode::Char('n'), KeyModifiers::ALT),
            None
        );
        assert_eq!(app.shortcut_table().len(), globals + 2);
        // Globals are never touched by a switch.
        assert_eq!(
            app.shortcut_table()
                .lookup(KeyCode::Char('1'), KeyModifiers::ALT),
            Some(KeyAction::SwitchView(ViewId::Channels))
        );
    }

    #[tokio::test]
    async fn switch_to_current_view_is_a_noop() {
        let mut app = app();
        let before = app.shortcut_table().len();
        app.switch_view(ViewId::Channels).unwrap();
        assert_eq!(app.shortcut_table().len(), before);
    }

    #[tokio::test]
    async fn quit_key_sets_the_flag() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn confirmed_address_form_calls_the_source_and_shows_result() {
        let mut source = MockNodeSource::new();
        source.expect_get_node_info().returning(|| Ok(Default::default()));
        source
            .expect_get_wallet_balance()
            .returning(|| Ok(Default::default()));
        source
            .expect_list_wallet_transactions()
            .returning(|| Ok(Vec::new()));
        source
            .expect_new_wallet_address()
            .times(1)
            .returning(|_| Ok("bc1qgenerated".to_string()));
        let mut app = App::new(Arc::new(source), 60).unwrap();

        app.switch_view(ViewId::WalletTxs).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT))
            .await
            .unwrap();
        assert!(app.active_view_mut().form_mut().is_some());

        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .await
            .unwrap();
        let form = app.active_view_mut().form_mut().unwrap();
        assert_eq!(form.value("address"), Some("bc1qgenerated"));
    }

    #[tokio::test]
    async fn cancelled_address_form_makes_no_source_call() {
        let mut source = MockNodeSource::new();
        source.expect_get_node_info().returning(|| Ok(Default::default()));
        source
            .expect_get_wallet_balance()
            .returning(|| Ok(Default::default()));
        source
            .expect_list_wallet_transactions()
            .returning(|| Ok(Vec::new()));
        source.expect_new_wallet_address().times(0);
        let mut app = App::new(Arc::new(source), 60).unwrap();

        app.switch_view(ViewId::WalletTxs).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT))
            .await
            .unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(app.active_view_mut().form_mut().is_none());
        assert!(app.log_buffer().is_empty());
    }
}
