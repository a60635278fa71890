//! Shared types for the tracker client: WebUI wire format, display rows,
//! the API client and on-disk configuration.

pub mod api;
pub mod config;
pub mod platform;
pub mod torrent;
pub mod tracker;
