use async_trait::async_trait;
use nextarr_sonarr_client::models::{Episode, Series};
use nextarr_sonarr_client::{matcher, SonarrApi, SonarrError};
use nextarr_telegram_client::NotificationClient;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory stand-in for Sonarr that serves a fixed catalog and episode list
/// and records every mutation issued against it. Name matching goes through
/// the real matcher so endpoint tests exercise the same lookup as production.
#[derive(Clone, Default)]
pub struct FakeSonarr {
    pub series: Vec<Series>,
    pub episodes: Vec<Episode>,
    pub monitor_calls: Arc<RwLock<Vec<(Vec<u64>, bool)>>>,
    pub search_calls: Arc<RwLock<Vec<u64>>>,
    pub deleted_files: Arc<RwLock<Vec<u64>>>,
}

#[async_trait]
impl SonarrApi for FakeSonarr {
    async fn find_series_by_name(&self, name: &str) -> Result<Option<Series>, SonarrError> {
        Ok(matcher::find_best_match(name, &self.series).map(|(index, _)| self.series[index].clone()))
    }

    async fn episodes(&self, _series_id: u64) -> Result<Vec<Episode>, SonarrError> {
        let mut episodes = self.episodes.clone();
        episodes.sort_by_key(|e| (e.season_number, e.episode_number));
        Ok(episodes)
    }

    async fn set_monitored(
        &self,
        episode_ids: &[u64],
        monitored: bool,
    ) -> Result<String, SonarrError> {
        let mut calls = self.monitor_calls.write().await;
        calls.push((episode_ids.to_vec(), monitored));

        Ok(String::from("[]"))
    }

    async fn trigger_series_search(&self, series_id: u64) -> Result<(), SonarrError> {
        let mut calls = self.search_calls.write().await;
        calls.push(series_id);

        Ok(())
    }

    async fn delete_episode_file(&self, episode_file_id: u64) -> Result<(), SonarrError> {
        let mut deleted = self.deleted_files.write().await;
        deleted.push(episode_file_id);

        Ok(())
    }
}

/// Fake implementation of [NotificationClient] that captures the lines sent to it.
#[derive(Clone, Default)]
pub struct SpyNotificationClient {
    pub messages: Arc<RwLock<Vec<String>>>,
}

#[async_trait]
impl NotificationClient for SpyNotificationClient {
    async fn send_message(&self, text: &str) -> anyhow::Result<()> {
        let mut messages = self.messages.write().await;
        messages.push(String::from(text));

        Ok(())
    }
}

pub fn series(id: u64, title: &str, title_slug: &str) -> Series {
    Series {
        id,
        title: String::from(title),
        title_slug: String::from(title_slug),
    }
}

pub fn episode(id: u64, season: u32, number: u32, has_file: bool) -> Episode {
    Episode {
        id,
        episode_file_id: if has_file { Some(id + 1000) } else { None },
        season_number: season,
        episode_number: number,
        has_file,
        title: format!("Episode {}", number),
    }
}
