use serde::{Deserialize, Serialize};

/// One element of `GET /api/v2/torrents/info`. Only the fields the torrent
/// list shows are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentInfo {
    pub hash: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    /// 0.0..=1.0
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub num_seeds: i64,
    #[serde(default)]
    pub num_leechs: i64,
}

impl TorrentInfo {
    pub fn percent_done(&self) -> u8 {
        (self.progress.clamp(0.0, 1.0) * 100.0).floor() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let list: Vec<TorrentInfo> = serde_json::from_str(
            r#"[{"hash":"abc","name":"debian.iso","state":"uploading",
                 "progress":0.999,"num_seeds":4,"num_leechs":1,"ratio":2.5}]"#,
        )
        .unwrap();
        assert_eq!(list[0].hash, "abc");
        assert_eq!(list[0].percent_done(), 99);
    }
}
