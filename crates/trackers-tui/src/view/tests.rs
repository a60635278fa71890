//! Behaviour of the tracker view against a scripted in-memory API.

use super::host::DialogQueue;
use super::menu::{MenuItem, MenuItems};
use super::table::KeyedTable;
use super::*;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use reqwest::StatusCode;
use trackers_proto::torrent::TorrentInfo;

const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const DHT: &str = "** [DHT] **";
const T1: &str = "http://t1/ann";
const T2: &str = "udp://t2:6969/announce";

fn server_error() -> ApiError {
    ApiError::Status {
        endpoint: "test",
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn record(url: &str, tier: Option<i64>, status: i64) -> TrackerRecord {
    TrackerRecord {
        url: url.to_string(),
        tier,
        status,
        num_peers: 5,
        num_seeds: 3,
        num_leeches: 2,
        num_downloaded: -1,
        msg: String::new(),
    }
}

#[derive(Default)]
struct FakeApi {
    lists: Mutex<HashMap<String, Vec<TrackerRecord>>>,
    fail_fetch: AtomicBool,
    fail_remove: AtomicBool,
    fetches: Mutex<Vec<String>>,
    removes: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeApi {
    fn with_lists() -> Arc<Self> {
        let api = FakeApi::default();
        {
            let mut lists = api.lists.lock().unwrap();
            lists.insert(
                HASH_A.to_string(),
                vec![
                    record(DHT, None, 2),
                    record(T1, Some(0), 2),
                    record(T2, Some(1), 4),
                ],
            );
            lists.insert(HASH_B.to_string(), vec![record("http://b/ann", Some(0), 1)]);
        }
        Arc::new(api)
    }

    fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

impl TrackerApi for FakeApi {
    async fn trackers(&self, hash: &str) -> Result<Vec<TrackerRecord>, ApiError> {
        self.fetches.lock().unwrap().push(hash.to_string());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(hash)
            .cloned()
            .unwrap_or_default())
    }

    async fn remove_trackers(&self, hash: &str, urls: &[String]) -> Result<(), ApiError> {
        self.removes
            .lock()
            .unwrap()
            .push((hash.to_string(), urls.to_vec()));
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        if let Some(list) = self.lists.lock().unwrap().get_mut(hash) {
            list.retain(|r| !urls.contains(&r.url));
        }
        Ok(())
    }

    async fn add_trackers(&self, _hash: &str, _urls: &[String]) -> Result<(), ApiError> {
        Ok(())
    }

    async fn edit_tracker(&self, _hash: &str, _orig: &str, _new: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn torrents(&self) -> Result<Vec<TorrentInfo>, ApiError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
struct FakeClipboard {
    text: Arc<Mutex<Option<String>>>,
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: String) -> anyhow::Result<()> {
        *self.text.lock().unwrap() = Some(text);
        Ok(())
    }
}

type TestView = TrackersView<FakeApi, KeyedTable, MenuItems, DialogQueue, FakeClipboard>;

fn new_view(api: Arc<FakeApi>) -> (TestView, mpsc::Receiver<ViewEvent>, FakeClipboard) {
    let (tx, rx) = mpsc::channel(16);
    let clipboard = FakeClipboard::default();
    let view = TrackersView::new(
        api,
        KeyedTable::new(),
        MenuItems::new(),
        DialogQueue::default(),
        clipboard.clone(),
        Duration::from_secs(10),
        tx,
    );
    (view, rx, clipboard)
}

/// Feed the next background result into the view.
async fn pump(view: &mut TestView, rx: &mut mpsc::Receiver<ViewEvent>) -> Notice {
    let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("no view event within 2s")
        .expect("event channel closed");
    view.on_event(event)
}

/// Let spawned tasks run, then assert nothing was sent.
async fn assert_quiet(rx: &mut mpsc::Receiver<ViewEvent>) {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(rx.try_recv().is_err(), "unexpected view event");
}

async fn loaded_view() -> (TestView, mpsc::Receiver<ViewEvent>, Arc<FakeApi>, FakeClipboard) {
    let api = FakeApi::with_lists();
    let (mut view, mut rx, clipboard) = new_view(api.clone());
    view.set_subject(HASH_A);
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(3));
    (view, rx, api, clipboard)
}

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn selecting_a_torrent_loads_its_trackers() {
    let (view, _rx, api, _) = loaded_view().await;

    assert_eq!(view.current_hash(), HASH_A);
    let rows = view.table().painted();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].row_id, DHT);
    assert_eq!(rows[0].tier, "");
    assert_eq!(rows[1].status, "Working");
    assert_eq!(rows[2].status, "Not working");
    assert_eq!(rows[1].downloaded, "N/A");
    assert!(view.table().is_striped(1));
    assert!(view.next_tick_at().is_some());
    assert!(!view.is_fetching());
    assert_eq!(*api.fetches.lock().unwrap(), vec![HASH_A.to_string()]);
}

#[tokio::test]
async fn no_torrent_selected_clears_without_fetching() {
    let api = FakeApi::with_lists();
    let (mut view, mut rx, _) = new_view(api.clone());

    view.update_data();
    assert!(view.table().is_empty());
    assert!(view.next_tick_at().is_some());
    assert_quiet(&mut rx).await;
    assert_eq!(api.fetch_count(), 0);
}

#[tokio::test]
async fn deselecting_clears_the_table_and_keeps_polling() {
    let (mut view, mut rx, api, _) = loaded_view().await;

    view.set_subject("");
    assert!(view.table().is_empty());
    assert_eq!(view.current_hash(), "");
    assert!(view.next_tick_at().is_some());

    view.on_timer();
    assert_quiet(&mut rx).await;
    assert_eq!(api.fetch_count(), 1);
}

#[tokio::test]
async fn switching_torrent_clears_rows_before_requesting() {
    let (mut view, mut rx, api, _) = loaded_view().await;

    view.set_subject(HASH_B);
    // Nothing from the first torrent may remain once the new request is out.
    assert!(view.table().is_empty());
    assert_eq!(view.current_hash(), HASH_B);

    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(1));
    assert_eq!(view.table().painted()[0].row_id, "http://b/ann");
    assert_eq!(
        *api.fetches.lock().unwrap(),
        vec![HASH_A.to_string(), HASH_B.to_string()]
    );
}

#[tokio::test]
async fn late_response_for_previous_torrent_is_discarded() {
    let (mut view, mut rx, api, _) = loaded_view().await;
    let old_list = api.lists.lock().unwrap()[HASH_A].clone();

    view.set_subject(HASH_B);
    let notice = view.on_event(ViewEvent::Trackers {
        seq: 1,
        hash: HASH_A.to_string(),
        result: Ok(old_list),
    });
    assert_eq!(notice, Notice::Stale);
    assert!(view.table().is_empty());

    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(1));
    assert_eq!(view.table().len(), 1);
}

#[tokio::test]
async fn superseded_request_for_same_torrent_is_discarded() {
    let (mut view, mut rx, _api, _) = loaded_view().await;

    view.update_data();
    view.update_data();
    // Only the second refresh reaches the channel; the first was cancelled.
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(3));
    assert_quiet(&mut rx).await;

    let notice = view.on_event(ViewEvent::Trackers {
        seq: 2,
        hash: HASH_A.to_string(),
        result: Ok(Vec::new()),
    });
    assert_eq!(notice, Notice::Stale);
    assert_eq!(view.table().len(), 3);
}

#[tokio::test]
async fn fetch_failure_leaves_display_and_rearms() {
    let (mut view, mut rx, api, _) = loaded_view().await;
    view.table_mut().reselect_rows(&ids(&[T1]));

    api.fail_fetch.store(true, Ordering::SeqCst);
    view.update_data();
    assert!(view.next_tick_at().is_none());

    assert!(matches!(
        pump(&mut view, &mut rx).await,
        Notice::FetchFailed(_)
    ));
    assert_eq!(view.table().len(), 3);
    assert_eq!(view.table().selected_rows_ids(), ids(&[T1]));
    assert!(view.next_tick_at().is_some());
}

#[tokio::test]
async fn selection_survives_a_poll() {
    let (mut view, mut rx, _api, _) = loaded_view().await;
    view.table_mut().reselect_rows(&ids(&[T2, T1]));

    view.on_timer();
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(3));
    assert_eq!(view.table().selected_rows_ids(), ids(&[T2, T1]));
}

#[tokio::test]
async fn hidden_pane_stops_polling_until_shown() {
    let (mut view, mut rx, api, _) = loaded_view().await;

    view.set_visible(false);
    view.on_timer();
    assert!(view.next_tick_at().is_none());
    assert_quiet(&mut rx).await;
    assert_eq!(api.fetch_count(), 1);

    view.set_visible(true);
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(3));
    assert_eq!(api.fetch_count(), 2);
}

#[tokio::test]
async fn remove_posts_selection_then_refreshes() {
    let (mut view, mut rx, api, _) = loaded_view().await;
    view.table_mut().reselect_rows(&ids(&[T1, T2]));

    assert!(view.remove_trackers());
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Removed(2));
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(1));

    assert_eq!(
        *api.removes.lock().unwrap(),
        vec![(HASH_A.to_string(), ids(&[T1, T2]))]
    );
    assert_eq!(view.table().painted()[0].row_id, DHT);
    assert!(view.table().selected_rows_ids().is_empty());
}

#[tokio::test]
async fn failed_remove_leaves_rows_until_next_poll() {
    let (mut view, mut rx, api, _) = loaded_view().await;
    api.fail_remove.store(true, Ordering::SeqCst);
    view.table_mut().reselect_rows(&ids(&[T1]));

    assert!(view.remove_trackers());
    assert!(matches!(
        pump(&mut view, &mut rx).await,
        Notice::RemoveFailed(_)
    ));
    assert_eq!(view.table().len(), 3);
    assert_eq!(view.table().selected_rows_ids(), ids(&[T1]));
    assert_quiet(&mut rx).await;
    assert_eq!(api.fetch_count(), 1);
}

#[tokio::test]
async fn static_rows_cannot_be_edited_or_removed() {
    let (mut view, mut rx, api, _) = loaded_view().await;

    view.table_mut().reselect_rows(&ids(&[DHT]));
    assert!(!view.remove_trackers());
    assert!(!view.edit_tracker(DHT));
    assert_eq!(view.host_mut().take(), None);

    view.table_mut().reselect_rows(&ids(&[T1, DHT]));
    assert!(!view.remove_trackers());

    assert_quiet(&mut rx).await;
    assert!(api.removes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn nothing_selected_removes_nothing() {
    let (mut view, mut rx, api, _) = loaded_view().await;
    assert!(!view.remove_trackers());
    assert_quiet(&mut rx).await;
    assert!(api.removes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn edit_narrows_selection_and_opens_dialog() {
    let (mut view, mut rx, _api, _) = loaded_view().await;
    view.table_mut().reselect_rows(&ids(&[T1, T2]));

    assert!(view.edit_tracker(T2));
    assert_eq!(view.table().selected_rows_ids(), ids(&[T2]));
    assert_eq!(
        view.host_mut().take(),
        Some(DialogRequest::EditTracker {
            hash: HASH_A.to_string(),
            url: T2.to_string(),
        })
    );

    view.on_dialog_closed();
    assert_eq!(pump(&mut view, &mut rx).await, Notice::Refreshed(3));
}

#[tokio::test]
async fn actions_need_a_selected_torrent() {
    let api = FakeApi::with_lists();
    let (mut view, _rx, _) = new_view(api);

    assert!(!view.add_tracker());
    assert!(!view.edit_tracker(T1));
    assert!(!view.remove_trackers());
    assert_eq!(view.host_mut().take(), None);
}

#[tokio::test]
async fn add_opens_dialog_for_current_torrent() {
    let (mut view, _rx, _api, _) = loaded_view().await;
    assert!(view.add_tracker());
    assert_eq!(
        view.host_mut().take(),
        Some(DialogRequest::AddTrackers {
            hash: HASH_A.to_string()
        })
    );
}

#[tokio::test]
async fn copy_puts_one_url_per_line() {
    let (mut view, _rx, _api, clipboard) = loaded_view().await;

    assert_eq!(view.copy_urls().unwrap(), None);
    assert!(clipboard.text.lock().unwrap().is_none());

    view.table_mut().reselect_rows(&ids(&[T1, T2]));
    let copied = view.copy_urls().unwrap();
    assert_eq!(copied.as_deref(), Some("http://t1/ann\nudp://t2:6969/announce"));
    assert_eq!(*clipboard.text.lock().unwrap(), copied);
}

#[tokio::test]
async fn static_rows_are_not_copied() {
    let (mut view, _rx, _api, clipboard) = loaded_view().await;

    view.table_mut().reselect_rows(&ids(&[DHT]));
    view.refresh_menu();
    assert!(!view.menu().is_visible(MenuItem::CopyTrackerUrl));
    assert_eq!(view.copy_urls().unwrap(), None);

    view.table_mut().reselect_rows(&ids(&[T1, DHT]));
    assert_eq!(view.copy_urls().unwrap(), None);
    assert!(clipboard.text.lock().unwrap().is_none());
}

#[tokio::test]
async fn menu_follows_selection() {
    let (mut view, _rx, _api, _) = loaded_view().await;

    view.refresh_menu();
    assert_eq!(view.menu().visible(), vec![MenuItem::AddTracker]);

    view.table_mut().reselect_rows(&ids(&[T1]));
    view.refresh_menu();
    assert!(view.menu().is_visible(MenuItem::RemoveTracker));

    view.table_mut().reselect_rows(&ids(&[T1, DHT]));
    view.refresh_menu();
    assert!(!view.menu().is_visible(MenuItem::EditTracker));
    assert!(!view.menu().is_visible(MenuItem::CopyTrackerUrl));
}
