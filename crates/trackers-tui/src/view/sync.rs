//! Repaints the tracker table from a fresh server response.

use trackers_proto::tracker::{TrackerRecord, TrackerRow};

use super::table::TrackerTable;

/// Replace the table contents with `records`, keeping the selection.
///
/// The table is always cleared. An empty response stops there: nothing is
/// painted and nothing is reselected. Otherwise every record becomes a row
/// keyed by its url, the table is repainted and zebra-striped, and the rows
/// that were selected before and still exist are selected again.
///
/// Returns the number of records applied.
pub fn render_trackers<T: TrackerTable + ?Sized>(table: &mut T, records: &[TrackerRecord]) -> usize {
    let selected = table.selected_rows_ids();
    table.clear();

    if records.is_empty() {
        return 0;
    }

    for record in records {
        table.update_row_data(TrackerRow::from(record));
    }
    table.update_table(false);
    table.alt_row();

    if !selected.is_empty() {
        table.reselect_rows(&selected);
    }
    records.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::table::KeyedTable;

    fn record(url: &str, status: i64) -> TrackerRecord {
        TrackerRecord {
            url: url.to_string(),
            tier: Some(0),
            status,
            num_peers: 5,
            num_seeds: 3,
            num_leeches: 2,
            num_downloaded: -1,
            msg: String::new(),
        }
    }

    /// Records the order of calls the synchronizer makes.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
        selection: Vec<String>,
    }

    impl TrackerTable for CallLog {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }
        fn update_row_data(&mut self, row: TrackerRow) {
            self.calls.push(format!("row {}", row.row_id));
        }
        fn update_table(&mut self, full_redraw: bool) {
            self.calls.push(format!("update_table {}", full_redraw));
        }
        fn alt_row(&mut self) {
            self.calls.push("alt_row".into());
        }
        fn selected_rows_ids(&self) -> Vec<String> {
            self.selection.clone()
        }
        fn reselect_rows(&mut self, ids: &[String]) {
            self.calls.push(format!("reselect {}", ids.join(",")));
        }
        fn select_row(&mut self, _id: &str) {}
        fn row(&self, _id: &str) -> Option<&TrackerRow> {
            None
        }
    }

    #[test]
    fn test_call_order() {
        let mut log = CallLog {
            selection: vec!["http://b".into()],
            ..Default::default()
        };
        render_trackers(&mut log, &[record("http://a", 2), record("http://b", 1)]);
        assert_eq!(
            log.calls,
            vec![
                "clear",
                "row http://a",
                "row http://b",
                "update_table false",
                "alt_row",
                "reselect http://b",
            ]
        );
    }

    #[test]
    fn test_empty_response_only_clears() {
        let mut log = CallLog {
            selection: vec!["http://b".into()],
            ..Default::default()
        };
        assert_eq!(render_trackers(&mut log, &[]), 0);
        assert_eq!(log.calls, vec!["clear"]);
    }

    #[test]
    fn test_no_reselect_without_prior_selection() {
        let mut log = CallLog::default();
        render_trackers(&mut log, &[record("http://a", 2)]);
        assert!(!log.calls.iter().any(|c| c.starts_with("reselect")));
    }

    #[test]
    fn test_selection_survives_and_vanished_keys_drop() {
        let mut table = KeyedTable::new();
        render_trackers(
            &mut table,
            &[record("http://a", 2), record("http://b", 2), record("http://c", 2)],
        );
        table.reselect_rows(&["http://a".to_string(), "http://c".to_string()]);

        render_trackers(&mut table, &[record("http://a", 3), record("http://b", 2)]);

        assert_eq!(table.selected_rows_ids(), vec!["http://a".to_string()]);
        assert_eq!(table.painted()[0].status, "Updating...");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_identical_responses_are_idempotent() {
        let records = vec![record("http://a", 2), record("** [DHT] **", 2)];
        let mut table = KeyedTable::new();
        render_trackers(&mut table, &records);
        table.reselect_rows(&["** [DHT] **".to_string()]);

        render_trackers(&mut table, &records);
        let first_rows = table.painted().to_vec();
        let first_sel = table.selected_rows_ids();

        render_trackers(&mut table, &records);
        assert_eq!(table.painted(), first_rows.as_slice());
        assert_eq!(table.selected_rows_ids(), first_sel);
        assert_eq!(first_sel, vec!["** [DHT] **".to_string()]);
    }

    #[test]
    fn test_scenario_row() {
        let mut table = KeyedTable::new();
        render_trackers(&mut table, &[record("http://t1/ann", 2)]);
        let row = &table.painted()[0];
        assert_eq!(
            (
                row.tier.as_str(),
                row.status.as_str(),
                row.peers.as_str(),
                row.seeds.as_str(),
                row.leeches.as_str(),
                row.downloaded.as_str()
            ),
            ("0", "Working", "5", "3", "2", "N/A")
        );
        assert!(!table.is_striped(0));
    }
}
