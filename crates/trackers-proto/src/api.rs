//! qBittorrent WebUI API client — the torrent and tracker endpoints.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::torrent::TorrentInfo;
use crate::tracker::TrackerRecord;

/// Separator for the `urls` field of `removeTrackers`.
pub const REMOVE_URLS_SEPARATOR: &str = "|";
/// Separator for the `urls` field of `addTrackers`.
pub const ADD_URLS_SEPARATOR: &str = "\n";

const EP_TRACKERS: &str = "api/v2/torrents/trackers";
const EP_REMOVE_TRACKERS: &str = "api/v2/torrents/removeTrackers";
const EP_ADD_TRACKERS: &str = "api/v2/torrents/addTrackers";
const EP_EDIT_TRACKER: &str = "api/v2/torrents/editTracker";
const EP_TORRENTS: &str = "api/v2/torrents/info";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid WebUI base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The remote operations the tracker view depends on.
///
/// Futures are `Send` so calls can run on spawned tasks.
pub trait TrackerApi: Send + Sync + 'static {
    /// Tracker list of one torrent. An empty or `null` body yields an empty list.
    fn trackers(
        &self,
        hash: &str,
    ) -> impl Future<Output = Result<Vec<TrackerRecord>, ApiError>> + Send;

    fn remove_trackers(
        &self,
        hash: &str,
        urls: &[String],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn add_trackers(
        &self,
        hash: &str,
        urls: &[String],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn edit_tracker(
        &self,
        hash: &str,
        orig_url: &str,
        new_url: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn torrents(&self) -> impl Future<Output = Result<Vec<TorrentInfo>, ApiError>> + Send;
}

/// HTTP implementation of [`TrackerApi`] on top of `reqwest`.
#[derive(Debug, Clone)]
pub struct WebUiClient {
    client: Client,
    base: Url,
}

impl WebUiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical url".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(concat!("qbt-trackers/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Http {
                endpoint: "client",
                source,
            })?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &'static str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|e| ApiError::InvalidBaseUrl {
            url: self.base.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, ApiError> {
        let url = self.endpoint(endpoint)?;
        let response = self
            .client
            .get(url)
            .query(query)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await
            .map_err(|source| ApiError::Http { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Http { endpoint, source })?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }

    async fn post_form(
        &self,
        endpoint: &'static str,
        form: &[(&str, &str)],
    ) -> Result<(), ApiError> {
        let url = self.endpoint(endpoint)?;
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|source| ApiError::Http { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }
        debug!("{} ok", endpoint);
        Ok(())
    }
}

impl TrackerApi for WebUiClient {
    async fn trackers(&self, hash: &str) -> Result<Vec<TrackerRecord>, ApiError> {
        let list: Option<Vec<TrackerRecord>> =
            self.get_json(EP_TRACKERS, &[("hash", hash)]).await?;
        Ok(list.unwrap_or_default())
    }

    async fn remove_trackers(&self, hash: &str, urls: &[String]) -> Result<(), ApiError> {
        let joined = urls.join(REMOVE_URLS_SEPARATOR);
        self.post_form(EP_REMOVE_TRACKERS, &[("hash", hash), ("urls", &joined)])
            .await
    }

    async fn add_trackers(&self, hash: &str, urls: &[String]) -> Result<(), ApiError> {
        let joined = urls.join(ADD_URLS_SEPARATOR);
        self.post_form(EP_ADD_TRACKERS, &[("hash", hash), ("urls", &joined)])
            .await
    }

    async fn edit_tracker(
        &self,
        hash: &str,
        orig_url: &str,
        new_url: &str,
    ) -> Result<(), ApiError> {
        self.post_form(
            EP_EDIT_TRACKER,
            &[("hash", hash), ("origUrl", orig_url), ("newUrl", new_url)],
        )
        .await
    }

    async fn torrents(&self) -> Result<Vec<TorrentInfo>, ApiError> {
        let list: Option<Vec<TorrentInfo>> = self.get_json(EP_TORRENTS, &[]).await?;
        Ok(list.unwrap_or_default())
    }
}
