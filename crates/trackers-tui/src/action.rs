//! Action enum — user intents and internal events routed through the App.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    TorrentList,
    Trackers,
    ContextMenu,
    TrackerDialog,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Torrent list selection moved; empty when nothing is selected.
    SelectTorrent(String),

    // ── Tracker table ────────────────────────────────────────────────────────
    CursorUp(usize),
    CursorDown(usize),
    CursorFirst,
    CursorLast,
    /// Move without touching the selection (for building multi-selections).
    CursorUpKeep,
    CursorDownKeep,
    ToggleRowSelection,
    SelectAllRows,

    // ── Context menu ─────────────────────────────────────────────────────────
    OpenMenu,
    CloseMenu,

    // ── Tracker actions ──────────────────────────────────────────────────────
    AddTracker,
    EditTracker,
    RemoveTrackers,
    CopyTrackerUrls,

    // ── Dialogs ──────────────────────────────────────────────────────────────
    SubmitAddTrackers { hash: String, urls: Vec<String> },
    SubmitEditTracker {
        hash: String,
        orig_url: String,
        new_url: String,
    },
    /// Dialog dismissed without submitting.
    DialogClosed,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleTrackerPane,
    RefreshNow,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Noop,
}
