//! Dialog and clipboard seams of the tracker view.

/// A request to open the add or edit dialog for a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogRequest {
    AddTrackers { hash: String },
    EditTracker { hash: String, url: String },
}

impl DialogRequest {
    pub fn hash(&self) -> &str {
        match self {
            DialogRequest::AddTrackers { hash } | DialogRequest::EditTracker { hash, .. } => hash,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DialogRequest::AddTrackers { .. } => "Add trackers",
            DialogRequest::EditTracker { .. } => "Tracker editing",
        }
    }
}

/// Opens modal dialogs. The host must report closure back to the view
/// (`TrackersView::on_dialog_closed`) once the dialog is gone.
pub trait DialogHost {
    fn open(&mut self, request: DialogRequest);
}

/// Hands dialog requests over to whoever draws them.
#[derive(Debug, Default)]
pub struct DialogQueue {
    pending: Option<DialogRequest>,
}

impl DialogQueue {
    pub fn take(&mut self) -> Option<DialogRequest> {
        self.pending.take()
    }
}

impl DialogHost for DialogQueue {
    fn open(&mut self, request: DialogRequest) {
        // Only one dialog exists at a time; a newer request replaces an unclaimed one.
        self.pending = Some(request);
    }
}

pub trait Clipboard {
    fn set_text(&mut self, text: String) -> anyhow::Result<()>;
}

/// System clipboard through `arboard`. Opened per copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: String) -> anyhow::Result<()> {
        arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text))?;
        Ok(())
    }
}
