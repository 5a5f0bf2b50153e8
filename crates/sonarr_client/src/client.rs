use crate::cache::SeriesCache;
use crate::error::SonarrError;
use crate::matcher;
use crate::models::{Episode, Series};
use anyhow::{Context, Result};
use async_trait::async_trait;
use nextarr_common::environment::{
    get_env_var,
    variables::{SONARR_API_KEY, SONARR_URL},
};
use reqwest::{Client, Response};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const API_KEY_HEADER: &str = "X-Api-Key";
const SERIES_CACHE_TTL: Duration = Duration::from_secs(10);

/// Settings to configure a [SonarrClient].
pub struct SonarrClientSettings {
    pub url: Url,
    pub api_key: String,
}

/// The operations the webhook handler needs from Sonarr. Split out as a trait
/// so tests can substitute an in-memory implementation.
#[async_trait]
pub trait SonarrApi {
    /// Resolve a free-text series name to a catalog entry, or [None] when no
    /// entry scores above the matching threshold.
    async fn find_series_by_name(&self, name: &str) -> Result<Option<Series>, SonarrError>;

    /// All episodes of a series, sorted ascending by (season, episode).
    async fn episodes(&self, series_id: u64) -> Result<Vec<Episode>, SonarrError>;

    /// Flip the monitored flag on a batch of episodes. Returns the raw response
    /// body for logging; Sonarr applies the batch atomically.
    async fn set_monitored(&self, episode_ids: &[u64], monitored: bool)
        -> Result<String, SonarrError>;

    /// Ask Sonarr to go search its indexers for the series. Fire-and-forget.
    async fn trigger_series_search(&self, series_id: u64) -> Result<(), SonarrError>;

    /// Delete a single episode file by its file id (not the episode id).
    async fn delete_episode_file(&self, episode_file_id: u64) -> Result<(), SonarrError>;
}

/// A [SonarrApi] implementation backed by the Sonarr v3 REST API.
pub struct SonarrClient {
    http: Client,
    base_url: String,
    api_key: String,
    series_cache: SeriesCache,
}

impl SonarrClient {
    pub fn new(settings: SonarrClientSettings) -> Self {
        SonarrClient {
            http: Client::new(),
            base_url: settings.url.as_str().trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            series_cache: SeriesCache::new(SERIES_CACHE_TTL),
        }
    }

    /// The full series catalog, served from the cache when a fetch happened
    /// within the last few seconds.
    async fn series(&self) -> Result<Arc<Vec<Series>>, SonarrError> {
        if let Some(series) = self.series_cache.get() {
            debug!("Returning the series catalog from the cache.");
            return Ok(series);
        }

        let url = format!("{}/api/v3/series", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let series: Vec<Series> = require_success(response).await?.json().await?;
        debug!("Fetched {} series from Sonarr.", series.len());
        Ok(self.series_cache.store(series))
    }
}

#[async_trait]
impl SonarrApi for SonarrClient {
    async fn find_series_by_name(&self, name: &str) -> Result<Option<Series>, SonarrError> {
        let series = self.series().await?;
        match matcher::find_best_match(name, &series) {
            Some((index, score)) => {
                let matched = &series[index];
                info!(
                    "Matched \"{}\" to \"{}\" with score {:.0}.",
                    name, matched.title, score
                );
                Ok(Some(matched.clone()))
            }
            None => {
                warn!("Could not find a series matching \"{}\".", name);
                Ok(None)
            }
        }
    }

    async fn episodes(&self, series_id: u64) -> Result<Vec<Episode>, SonarrError> {
        let url = format!("{}/api/v3/episode", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("seriesId", series_id)])
            .send()
            .await?;
        let mut episodes: Vec<Episode> = require_success(response).await?.json().await?;
        episodes.sort_by_key(|e| (e.season_number, e.episode_number));
        Ok(episodes)
    }

    async fn set_monitored(
        &self,
        episode_ids: &[u64],
        monitored: bool,
    ) -> Result<String, SonarrError> {
        let url = format!("{}/api/v3/episode/monitor", self.base_url);
        let response = self
            .http
            .put(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "episodeIds": episode_ids, "monitored": monitored }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!("Sonarr returned {} to the monitor update: {}", status, body);
        }
        Ok(body)
    }

    async fn trigger_series_search(&self, series_id: u64) -> Result<(), SonarrError> {
        let url = format!("{}/api/v3/command", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "name": "SeriesSearch", "seriesId": series_id }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            debug!("Sonarr acknowledged the search command: {}", body);
        } else {
            warn!("Sonarr returned {} to the search command: {}", status, body);
        }
        Ok(())
    }

    async fn delete_episode_file(&self, episode_file_id: u64) -> Result<(), SonarrError> {
        let url = format!("{}/api/v3/episodefile/{}", self.base_url, episode_file_id);
        let response = self
            .http
            .delete(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }
}

async fn require_success(response: Response) -> Result<Response, SonarrError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SonarrError::Status { status, body })
}

/// Build a [SonarrClient] from the environment.
pub fn initialize_sonarr_client() -> Result<SonarrClient> {
    let raw_url = get_env_var(SONARR_URL)
        .context("Could not retrieve the Sonarr base URL from the environment.")?;
    let url = Url::parse(&raw_url)
        .with_context(|| format!("Failed to parse \"{}\" as the Sonarr base URL.", raw_url))?;
    let api_key = get_env_var(SONARR_API_KEY)
        .context("Could not retrieve the Sonarr API key from the environment.")?;
    Ok(SonarrClient::new(SonarrClientSettings { url, api_key }))
}
