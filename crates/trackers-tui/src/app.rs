//! App — component-based event loop hosting the tracker view.
//!
//! - `App` owns the components, the `TrackersView` and `AppState`.
//! - Terminal input and background results arrive as `AppMessage`s on one
//!   mpsc channel; the view's own results arrive on its `ViewEvent` channel.
//! - The view's refresh deadline is one more branch of the `select!`.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use trackers_proto::api::{TrackerApi, WebUiClient};
use trackers_proto::config::Config;
use trackers_proto::torrent::TorrentInfo;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        context_menu::ContextMenu, torrent_list::TorrentList, tracker_dialog::TrackerDialog,
        tracker_table,
    },
    focus::FocusRing,
    theme::C_BG,
    view::{
        host::{DialogQueue, SystemClipboard},
        menu::MenuItems,
        poller,
        table::{KeyedTable, TrackerTable},
        Notice, TrackersView, ViewEvent,
    },
    widgets::{
        pane_chrome::draw_hidden_pane,
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

type Trackers = TrackersView<WebUiClient, KeyedTable, MenuItems, DialogQueue, SystemClipboard>;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Torrents(Result<Vec<TorrentInfo>, String>),
    /// An add or edit dialog submission finished.
    DialogDone {
        what: String,
        result: Result<(), String>,
    },
}

pub struct App {
    api: Arc<WebUiClient>,
    view: Trackers,
    view_rx: Option<mpsc::Receiver<ViewEvent>>,
    state: AppState,
    focus: FocusRing,
    torrent_list: TorrentList,
    context_menu: ContextMenu,
    dialog: TrackerDialog,
    toast: ToastManager,
    torrents_interval: Duration,
    msg_tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(api: WebUiClient, config: &Config) -> Self {
        let api = Arc::new(api);
        let (view_tx, view_rx) = mpsc::channel(64);
        let view = TrackersView::new(
            Arc::clone(&api),
            KeyedTable::new(),
            MenuItems::new(),
            DialogQueue::default(),
            SystemClipboard,
            config.polling.interval(),
            view_tx,
        );
        let state = AppState::new(api.base_url().as_str(), config.polling.interval().as_secs());

        Self {
            api,
            view,
            view_rx: Some(view_rx),
            state,
            focus: FocusRing::new(vec![ComponentId::TorrentList, ComponentId::Trackers]),
            torrent_list: TorrentList::new(),
            context_menu: ContextMenu::new(),
            dialog: TrackerDialog::new(),
            toast: ToastManager::new(),
            torrents_interval: config.polling.torrents_interval(),
            msg_tx: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut view_rx = self
            .view_rx
            .take()
            .context("tracker view channel already taken")?;

        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            while let Ok(ev) = event::read() {
                if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
        });

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut torrents_refresh = tokio::time::interval(self.torrents_interval);
        torrents_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Toast expiry + spinner animation.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // No torrent yet: clears the table and arms the first tick.
        self.view.update_data();

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = true;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                }

                Some(ev) = view_rx.recv() => {
                    let notice = self.view.on_event(ev);
                    self.on_notice(notice);
                }

                _ = poller::wait_for(self.view.next_tick_at()) => {
                    self.view.on_timer();
                    self.sync_view_state();
                }

                _ = torrents_refresh.tick() => {
                    self.spawn_torrents_fetch(tx.clone());
                    needs_redraw = false;
                }

                _ = toast_tick.tick() => {
                    needs_redraw = !self.toast.is_empty();
                    self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("trackers: exiting");
        Ok(())
    }

    fn spawn_torrents_fetch(&self, tx: mpsc::Sender<AppMessage>) {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = api.torrents().await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Torrents(result)).await;
        });
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(_) => {}
            AppMessage::Torrents(Ok(torrents)) => {
                if !self.state.connected {
                    info!("trackers: connected to {}", self.state.base_url);
                }
                self.state.connected = true;
                self.state.torrents_error = None;
                let moved = self.torrent_list.sync(&torrents);
                self.state.torrents = torrents;
                if let Some(action) = moved {
                    self.dispatch(action);
                }
            }
            AppMessage::Torrents(Err(e)) => {
                if self.state.connected {
                    warn!("trackers: torrent list failed: {}", e);
                }
                self.state.connected = false;
                self.state.torrents_error = Some(e);
            }
            AppMessage::DialogDone { what, result } => {
                match result {
                    Ok(()) => self.toast.resolve_spinner(Severity::Success, what),
                    Err(e) => self
                        .toast
                        .resolve_spinner(Severity::Error, format!("{} failed: {}", what, e)),
                }
                self.view.on_dialog_closed();
                self.sync_view_state();
            }
        }
    }

    fn on_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Refreshed(_) => {
                self.state.last_tracker_update = Some(chrono::Local::now());
                self.state.tracker_error = None;
            }
            Notice::Stale => {}
            Notice::FetchFailed(e) => self.state.tracker_error = Some(e),
            Notice::Removed(n) => self
                .toast
                .resolve_spinner(Severity::Success, format!("removed {} tracker(s)", n)),
            Notice::RemoveFailed(e) => self
                .toast
                .resolve_spinner(Severity::Error, format!("remove failed: {}", e)),
        }
        self.sync_view_state();
    }

    /// Mirror what the components read from the view into `AppState`.
    fn sync_view_state(&mut self) {
        self.state.trackers_loading = self.view.is_fetching();
        self.state.input_mode = if self.dialog.is_open() {
            InputMode::Dialog
        } else if self.context_menu.visible {
            InputMode::Menu
        } else {
            InputMode::Normal
        };
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Modal layers capture all keys.
        if self.dialog.is_open() {
            return self.dialog.handle_key(key, &self.state);
        }
        if self.context_menu.visible {
            return self.context_menu.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('t') => return vec![Action::ToggleTrackerPane],
            KeyCode::Char('r') => return vec![Action::RefreshNow],
            KeyCode::Char('1') => {
                self.focus.set(ComponentId::TorrentList);
                return vec![];
            }
            KeyCode::Char('2') => {
                self.focus.set(ComponentId::Trackers);
                return vec![];
            }
            _ => {}
        }

        match self.focus.current() {
            Some(ComponentId::TorrentList) => self.torrent_list.handle_key(key, &self.state),
            Some(ComponentId::Trackers) if self.view.is_visible() => tracker_table::handle_key(key),
            _ => vec![],
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.torrent_list.on_action(&action, s));
            out.extend(self.context_menu.on_action(&action, s));
            out.extend(self.dialog.on_action(&action, s));
            out
        };
        self.apply_action(action);
        for a in secondary {
            self.apply_action(a);
        }
        self.sync_view_state();
    }

    fn apply_action(&mut self, action: Action) {
        if action != Action::Noop {
            debug!("apply_action: {:?}", action);
        }
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::SelectTorrent(hash) => self.view.set_subject(hash),

            // ── Tracker table ─────────────────────────────────────────────────
            Action::CursorUp(n) => self.view.table_mut().cursor_up(n),
            Action::CursorDown(n) => self.view.table_mut().cursor_down(n),
            Action::CursorFirst => self.view.table_mut().cursor_first(),
            Action::CursorLast => self.view.table_mut().cursor_last(),
            Action::CursorUpKeep => self.view.table_mut().cursor_up_keep(1),
            Action::CursorDownKeep => self.view.table_mut().cursor_down_keep(1),
            Action::ToggleRowSelection => self.view.table_mut().toggle_cursor_selection(),
            Action::SelectAllRows => self.view.table_mut().select_all(),

            // ── Context menu ──────────────────────────────────────────────────
            Action::OpenMenu => {
                self.view.refresh_menu();
                self.state.menu_items = self.view.menu().visible();
            }
            Action::CloseMenu => {}

            // ── Tracker actions ───────────────────────────────────────────────
            Action::AddTracker => {
                if !self.view.add_tracker() {
                    self.toast.warning("select a torrent first");
                }
                self.open_requested_dialog();
            }
            Action::EditTracker => {
                let row_id = self.view.table().cursor_row_id().map(str::to_string);
                let opened = row_id.is_some_and(|id| self.view.edit_tracker(&id));
                if !opened {
                    self.toast.warning("this tracker can't be edited");
                }
                self.open_requested_dialog();
            }
            Action::RemoveTrackers => {
                let count = self.view.table().selected_rows_ids().len();
                if self.view.remove_trackers() {
                    self.toast.spinner(format!("removing {} tracker(s)…", count));
                } else {
                    self.toast.warning("nothing removable selected");
                }
            }
            Action::CopyTrackerUrls => match self.view.copy_urls() {
                Ok(Some(text)) => {
                    let n = text.lines().count();
                    self.toast.success(format!("copied {} url(s)", n));
                }
                Ok(None) => self.toast.info("no tracker selected"),
                Err(e) => {
                    warn!("trackers: clipboard: {:#}", e);
                    self.toast.error(format!("clipboard: {}", e));
                }
            },

            // ── Dialogs ───────────────────────────────────────────────────────
            Action::SubmitAddTrackers { hash, urls } => {
                let what = format!("added {} tracker(s)", urls.len());
                self.toast.spinner("adding trackers…");
                self.spawn_mutation(what, move |api| async move {
                    api.add_trackers(&hash, &urls).await
                });
            }
            Action::SubmitEditTracker {
                hash,
                orig_url,
                new_url,
            } => {
                self.toast.spinner("saving tracker…");
                self.spawn_mutation("tracker updated".to_string(), move |api| async move {
                    api.edit_tracker(&hash, &orig_url, &new_url).await
                });
            }
            Action::DialogClosed => self.view.on_dialog_closed(),

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleTrackerPane => {
                let visible = !self.view.is_visible();
                self.view.set_visible(visible);
                if !visible {
                    self.focus.set(ComponentId::TorrentList);
                }
            }
            Action::RefreshNow => self.view.update_data(),

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    fn open_requested_dialog(&mut self) {
        if let Some(request) = self.view.host_mut().take() {
            self.dialog.open(request);
        }
    }

    /// Run an add/edit call in the background and report it as `DialogDone`.
    fn spawn_mutation<F, Fut>(&self, what: String, call: F)
    where
        F: FnOnce(Arc<WebUiClient>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), trackers_proto::api::ApiError>> + Send,
    {
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = call(api).await.map_err(|e| {
                warn!("trackers: {}: {}", what, e);
                e.to_string()
            });
            let _ = tx.send(AppMessage::DialogDone { what, result }).await;
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);
        let (body, status_area, keys_area) = (outer[0], outer[1], outer[2]);

        let tracker_h = if self.view.is_visible() {
            Constraint::Percentage(60)
        } else {
            Constraint::Length(1)
        };
        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), tracker_h])
            .split(body);

        let torrents_focused = self.focus.is_focused(ComponentId::TorrentList);
        self.torrent_list
            .draw(frame, panes[0], torrents_focused, &self.state);
        self.draw_trackers(frame, panes[1]);

        status_bar::draw_status_line(frame, status_area, &self.state);
        status_bar::draw_keys_bar(frame, keys_area, self.state.input_mode);

        self.context_menu.draw(frame, area, true, &self.state);
        self.dialog.draw(frame, area, true, &self.state);
        self.toast.draw(frame, area);
    }

    fn draw_trackers(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focus.is_focused(ComponentId::Trackers);
        let hash = self.view.current_hash().to_string();
        let subject_name = (!hash.is_empty())
            .then(|| self.state.torrent_name(&hash).unwrap_or(&hash).to_string());

        if !self.view.is_visible() {
            let summary = format!("hidden · press t ({} rows)", self.view.table().len());
            draw_hidden_pane(frame, area, "trackers", Some(&summary), focused);
            return;
        }
        tracker_table::draw(
            frame,
            area,
            focused,
            self.view.table_mut(),
            subject_name.as_deref(),
            &self.state,
        );
    }
}
