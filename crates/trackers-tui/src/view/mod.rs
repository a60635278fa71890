//! TrackersView — controller for the tracker table of the selected torrent.
//!
//! One instance per tracker pane. It owns the refresh timer, the displayed
//! subject (`current_hash`) and its collaborators, which are injected at
//! construction: the API, the table widget, the context menu, the dialog host
//! and the clipboard.
//!
//! Network calls run on spawned tasks and report back as [`ViewEvent`]s on
//! the channel handed to `new`; the owning event loop feeds them to
//! [`TrackersView::on_event`]. Every fetch carries a sequence number and the
//! hash it was issued for, and only the latest fetch for the current subject
//! is ever painted. Switching subject also cancels the in-flight fetch.

pub mod host;
pub mod menu;
pub mod poller;
pub mod sync;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use trackers_proto::api::{ApiError, TrackerApi};
use trackers_proto::tracker::{is_static_tracker, TrackerRecord};

use host::{Clipboard, DialogHost, DialogRequest};
use menu::{apply_selection_rule, row_actions_allowed, TrackerMenu};
use poller::PollTimer;
use table::TrackerTable;

/// Results of background work, routed back into the view.
#[derive(Debug)]
pub enum ViewEvent {
    Trackers {
        seq: u64,
        hash: String,
        result: Result<Vec<TrackerRecord>, ApiError>,
    },
    Removed {
        hash: String,
        count: usize,
        result: Result<(), ApiError>,
    },
}

/// What handling a [`ViewEvent`] amounted to, for status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Fresh rows painted (count may be zero).
    Refreshed(usize),
    /// Response for an older request or another torrent; ignored.
    Stale,
    FetchFailed(String),
    Removed(usize),
    RemoveFailed(String),
}

pub struct TrackersView<A, T, M, H, C> {
    api: Arc<A>,
    table: T,
    menu: M,
    host: H,
    clipboard: C,
    events: mpsc::Sender<ViewEvent>,

    timer: PollTimer,
    interval: Duration,
    visible: bool,
    /// Torrent selected in the torrent list; empty when none.
    subject: String,
    /// Torrent whose trackers the table shows; empty when none.
    current_hash: String,
    seq: u64,
    inflight: Option<CancellationToken>,
}

impl<A, T, M, H, C> TrackersView<A, T, M, H, C>
where
    A: TrackerApi,
    T: TrackerTable,
    M: TrackerMenu,
    H: DialogHost,
    C: Clipboard,
{
    pub fn new(
        api: Arc<A>,
        table: T,
        menu: M,
        host: H,
        clipboard: C,
        interval: Duration,
        events: mpsc::Sender<ViewEvent>,
    ) -> Self {
        Self {
            api,
            table,
            menu,
            host,
            clipboard,
            events,
            timer: PollTimer::new(),
            interval,
            visible: true,
            subject: String::new(),
            current_hash: String::new(),
            seq: 0,
            inflight: None,
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    pub fn menu(&self) -> &M {
        &self.menu
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_fetching(&self) -> bool {
        self.inflight.is_some()
    }

    /// When the next scheduled tick is due, if one is armed.
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    // ── Polling ───────────────────────────────────────────────────────────────

    /// The torrent list selection changed. Refreshes at once when it differs
    /// from what the table shows.
    pub fn set_subject(&mut self, hash: impl Into<String>) {
        let hash = hash.into();
        if hash == self.subject {
            return;
        }
        debug!("trackers: subject {:?} -> {:?}", self.subject, hash);
        self.subject = hash;
        if self.subject != self.current_hash {
            self.update_data();
        }
    }

    /// Pane shown or hidden. Showing it refreshes immediately; hiding it lets
    /// the next tick lapse without re-arming.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.update_data();
        }
    }

    /// Cancel the pending tick and run one now.
    pub fn update_data(&mut self) {
        self.timer.cancel();
        self.tick();
    }

    /// The armed deadline passed.
    pub fn on_timer(&mut self) {
        self.timer.cancel();
        self.tick();
    }

    /// One run of the refresh logic.
    pub fn tick(&mut self) {
        if !self.visible {
            debug!("trackers: pane hidden, skipping tick");
            return;
        }

        if self.subject.is_empty() {
            self.table.clear();
            self.cancel_inflight();
            self.current_hash.clear();
            self.timer.arm(self.interval);
            return;
        }

        if self.subject != self.current_hash {
            self.table.clear();
            self.cancel_inflight();
            self.current_hash = self.subject.clone();
        }

        self.spawn_fetch();
    }

    fn cancel_inflight(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }

    fn spawn_fetch(&mut self) {
        // A newer request supersedes whatever is still running.
        self.cancel_inflight();
        self.seq += 1;
        let seq = self.seq;
        let hash = self.current_hash.clone();
        let token = CancellationToken::new();
        self.inflight = Some(token.clone());

        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        debug!("trackers: fetch #{} for {}", seq, hash);
        tokio::spawn(async move {
            let fetched = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                result = api.trackers(&hash) => Some(result),
            };
            match fetched {
                Some(result) => {
                    let _ = tx.send(ViewEvent::Trackers { seq, hash, result }).await;
                }
                None => debug!("trackers: fetch #{} cancelled", seq),
            }
        });
    }

    // ── Background results ────────────────────────────────────────────────────

    pub fn on_event(&mut self, event: ViewEvent) -> Notice {
        match event {
            ViewEvent::Trackers { seq, hash, result } => {
                if seq != self.seq || hash != self.current_hash {
                    debug!(
                        "trackers: dropping stale response #{} for {} (latest #{} for {:?})",
                        seq, hash, self.seq, self.current_hash
                    );
                    return Notice::Stale;
                }
                self.inflight = None;
                self.timer.arm(self.interval);

                match result {
                    Ok(records) => {
                        let painted = sync::render_trackers(&mut self.table, &records);
                        debug!("trackers: {} rows for {}", painted, hash);
                        Notice::Refreshed(painted)
                    }
                    Err(e) => {
                        warn!("trackers: fetch for {} failed: {}", hash, e);
                        Notice::FetchFailed(e.to_string())
                    }
                }
            }
            ViewEvent::Removed {
                hash,
                count,
                result,
            } => match result {
                Ok(()) => {
                    info!("trackers: removed {} from {}", count, hash);
                    self.update_data();
                    Notice::Removed(count)
                }
                Err(e) => {
                    warn!("trackers: remove from {} failed: {}", hash, e);
                    Notice::RemoveFailed(e.to_string())
                }
            },
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    /// Context menu is about to open.
    pub fn refresh_menu(&mut self) {
        let selected = self.table.selected_rows_ids();
        apply_selection_rule(&mut self.menu, &selected);
    }

    /// Open the add dialog for the current torrent.
    pub fn add_tracker(&mut self) -> bool {
        if self.current_hash.is_empty() {
            return false;
        }
        self.host.open(DialogRequest::AddTrackers {
            hash: self.current_hash.clone(),
        });
        true
    }

    /// Open the edit dialog for `row_id`, which becomes the only selected row.
    pub fn edit_tracker(&mut self, row_id: &str) -> bool {
        if self.current_hash.is_empty() {
            return false;
        }
        let Some(url) = self.table.row(row_id).map(|row| row.url.clone()) else {
            return false;
        };
        self.table.select_row(row_id);
        if is_static_tracker(&url) {
            debug!("trackers: refusing to edit {}", url);
            return false;
        }
        self.host.open(DialogRequest::EditTracker {
            hash: self.current_hash.clone(),
            url,
        });
        true
    }

    /// Add or edit dialog has closed, submitted or not.
    pub fn on_dialog_closed(&mut self) {
        self.update_data();
    }

    /// Ask the server to drop the selected trackers. Returns whether a
    /// request went out.
    pub fn remove_trackers(&mut self) -> bool {
        if self.current_hash.is_empty() {
            return false;
        }
        let urls = self.table.selected_rows_ids();
        if !row_actions_allowed(&urls) {
            debug!("trackers: refusing to remove {:?}", urls);
            return false;
        }

        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        let hash = self.current_hash.clone();
        let count = urls.len();
        tokio::spawn(async move {
            let result = api.remove_trackers(&hash, &urls).await;
            let _ = tx
                .send(ViewEvent::Removed {
                    hash,
                    count,
                    result,
                })
                .await;
        });
        true
    }

    /// Copy the selected urls, one per line. Returns the copied text.
    pub fn copy_urls(&mut self) -> anyhow::Result<Option<String>> {
        let urls = self.table.selected_rows_ids();
        if urls.is_empty() {
            return Ok(None);
        }
        if !row_actions_allowed(&urls) {
            debug!("trackers: refusing to copy {:?}", urls);
            return Ok(None);
        }
        let text = urls.join("\n");
        self.clipboard.set_text(text.clone())?;
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests;
