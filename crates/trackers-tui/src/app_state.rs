//! AppState — shared read-only data passed to components during render/event.
//!
//! Only the App event loop writes to it.

use chrono::{DateTime, Local};

use trackers_proto::torrent::TorrentInfo;

use crate::view::menu::MenuItem;
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Server ─────────────────────────────────────────────────────────────
    pub base_url: String,
    /// Last torrent list request succeeded.
    pub connected: bool,
    pub torrents: Vec<TorrentInfo>,
    pub torrents_error: Option<String>,

    // ── Tracker pane ────────────────────────────────────────────────────────
    pub trackers_loading: bool,
    pub last_tracker_update: Option<DateTime<Local>>,
    pub tracker_error: Option<String>,
    /// Context-menu entries for the current selection.
    pub menu_items: Vec<MenuItem>,
    pub poll_interval_secs: u64,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(base_url: impl Into<String>, poll_interval_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            connected: false,
            torrents: Vec::new(),
            torrents_error: None,
            trackers_loading: false,
            last_tracker_update: None,
            tracker_error: None,
            menu_items: MenuItem::ALL.to_vec(),
            poll_interval_secs,
            input_mode: InputMode::Normal,
        }
    }

    pub fn torrent_name(&self, hash: &str) -> Option<&str> {
        self.torrents
            .iter()
            .find(|t| t.hash == hash)
            .map(|t| t.name.as_str())
    }
}
