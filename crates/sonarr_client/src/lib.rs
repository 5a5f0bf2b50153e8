//! A client for the parts of the Sonarr v3 API that Nextarr drives: the series
//! catalog, per-series episode lists, monitoring flags, search commands and
//! episode-file deletion. Also home to the name-matching and episode-window
//! logic that decides what to monitor and what to prune.

pub mod cache;
mod client;
mod error;
pub mod matcher;
pub mod models;
pub mod window;

pub use client::{initialize_sonarr_client, SonarrApi, SonarrClient, SonarrClientSettings};
pub use error::SonarrError;
