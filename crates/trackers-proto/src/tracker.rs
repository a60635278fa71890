//! Tracker entries as reported by the WebUI, and their display form.

use serde::{Deserialize, Deserializer, Serialize};

/// Row keys starting with this prefix are entries the engine injects itself
/// (DHT, PeX, LSD). They cannot be edited, removed or copied.
pub const STATIC_TRACKER_PREFIX: &str = "** [";

/// Placeholder shown for counters the server reports as unknown.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for status codes outside 0..=4.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// One element of `GET /api/v2/torrents/trackers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerRecord {
    pub url: String,
    /// `None` when the server sends -1, null, an empty string or nothing.
    #[serde(default, deserialize_with = "deserialize_tier")]
    pub tier: Option<i64>,
    /// A missing status decodes as an out-of-range code.
    #[serde(default = "unknown_status")]
    pub status: i64,
    #[serde(default = "unknown_count")]
    pub num_peers: i64,
    #[serde(default = "unknown_count")]
    pub num_seeds: i64,
    #[serde(default = "unknown_count")]
    pub num_leeches: i64,
    #[serde(default = "unknown_count")]
    pub num_downloaded: i64,
    #[serde(default)]
    pub msg: String,
}

fn unknown_count() -> i64 {
    -1
}

fn unknown_status() -> i64 {
    -1
}

/// Older servers send the tier of static entries as `""`; newer ones send -1.
fn deserialize_tier<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTier {
        Int(i64),
        Text(String),
    }

    let tier = match Option::<RawTier>::deserialize(deserializer)? {
        Some(RawTier::Int(n)) => Some(n),
        Some(RawTier::Text(s)) => s.trim().parse::<i64>().ok(),
        None => None,
    };
    Ok(tier.filter(|n| *n >= 0))
}

/// Announce state of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStatus {
    Disabled,
    NotContacted,
    Working,
    Updating,
    NotWorking,
    Unknown(i64),
}

impl TrackerStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Disabled,
            1 => Self::NotContacted,
            2 => Self::Working,
            3 => Self::Updating,
            4 => Self::NotWorking,
            other => Self::Unknown(other),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::NotContacted => "Not contacted yet",
            Self::Working => "Working",
            Self::Updating => "Updating...",
            Self::NotWorking => "Not working",
            Self::Unknown(_) => UNKNOWN_STATUS,
        }
    }
}

/// Display label for a raw status code.
pub fn status_label(code: i64) -> &'static str {
    TrackerStatus::from_code(code).label()
}

/// True for engine-injected entries that must not be edited or removed.
pub fn is_static_tracker(row_id: &str) -> bool {
    row_id.starts_with(STATIC_TRACKER_PREFIX)
}

fn format_count(n: i64) -> String {
    if n >= 0 {
        n.to_string()
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// A tracker as the table displays it. Every cell is already text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerRow {
    /// Row key; equal to `url`.
    pub row_id: String,
    pub tier: String,
    pub url: String,
    pub status: String,
    pub peers: String,
    pub seeds: String,
    pub leeches: String,
    pub downloaded: String,
    pub message: String,
}

impl TrackerRow {
    pub fn is_static(&self) -> bool {
        is_static_tracker(&self.row_id)
    }
}

impl From<&TrackerRecord> for TrackerRow {
    fn from(record: &TrackerRecord) -> Self {
        Self {
            row_id: record.url.clone(),
            tier: record
                .tier
                .filter(|t| *t >= 0)
                .map(|t| t.to_string())
                .unwrap_or_default(),
            url: record.url.clone(),
            status: status_label(record.status).to_string(),
            peers: format_count(record.num_peers),
            seeds: format_count(record.num_seeds),
            leeches: format_count(record.num_leeches),
            downloaded: format_count(record.num_downloaded),
            message: record.msg.clone(),
        }
    }
}
