//! Handles the media-server download notification: push the monitoring window
//! forward past the viewer's position, then prune what has fallen behind it.

use crate::models::DownloadNotification;
use nextarr_sonarr_client::models::Episode;
use nextarr_sonarr_client::window::{self, NextEpisodes};
use nextarr_sonarr_client::{SonarrApi, SonarrError};
use nextarr_telegram_client::NotificationClient;
use tracing::{error, info, warn};

/// How far past the cursor the two-episode monitoring window starts.
const NEXT_EPISODE_LOOKAHEAD: usize = 2;
/// Episodes kept on disk between the cursor and the newest pruned episode.
const DELETE_DISTANCE: usize = 2;
/// Maximum number of episode files pruned per notification.
const DELETE_COUNT: usize = 3;

/// What the handler should tell the notifying media server.
#[derive(Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Upcoming episodes were set to monitored and a search was triggered.
    MonitoringAdded,
    /// Nothing in the catalog matched the reported series name.
    SeriesNotFound,
    /// The reported (season, episode) pair is not in the series' episode list.
    CursorNotFound,
    /// The cursor sits at the end of the list; there is nothing left to monitor.
    NoUpcomingEpisodes,
    /// Every episode in the upcoming window already has a file.
    AllUpcomingDownloaded,
}

/// Process a download notification end to end. Fetch failures bubble up;
/// mutation and notification failures are logged and the handling continues.
pub async fn handle_download_notification<S, N>(
    sonarr: &S,
    notifier: &N,
    notification: &DownloadNotification,
) -> Result<WebhookOutcome, SonarrError>
where
    S: SonarrApi,
    N: NotificationClient,
{
    let season = notification.season_number;
    let episode = notification.episode_number;

    let series = match sonarr.find_series_by_name(&notification.series_name).await? {
        Some(series) => series,
        None => {
            notify(
                notifier,
                &format!(
                    "Could not find series with title {}",
                    notification.series_name
                ),
            )
            .await;
            return Ok(WebhookOutcome::SeriesNotFound);
        }
    };

    let episodes = sonarr.episodes(series.id).await?;
    let index = match window::locate_index(&episodes, season, episode) {
        Some(index) => index,
        None => {
            error!(
                "Could not find S{}E{} in the episode list of \"{}\".",
                season, episode, series.title
            );
            notify(
                notifier,
                &format!(
                    "Could not find next episode for {} S{}E{}",
                    series.title, season, episode
                ),
            )
            .await;
            return Ok(WebhookOutcome::CursorNotFound);
        }
    };

    let outcome = match window::next_episodes(&episodes, index, NEXT_EPISODE_LOOKAHEAD) {
        NextEpisodes::Monitorable(next) => {
            let ids: Vec<u64> = next.iter().map(|e| e.id).collect();
            let monitor_response = sonarr.set_monitored(&ids, true).await?;
            info!("Monitor update response: {}", monitor_response);
            sonarr.trigger_series_search(series.id).await?;

            let positions = next
                .iter()
                .map(|e| format!("S{}E{}", e.season_number, e.episode_number))
                .collect::<Vec<_>>()
                .join(", ");
            notify(
                notifier,
                &format!(
                    "Added monitoring for next episodes {} for {} starting from S{}E{}",
                    positions, series.title, season, episode
                ),
            )
            .await;
            WebhookOutcome::MonitoringAdded
        }
        NextEpisodes::NoneRemaining => {
            notify(
                notifier,
                &format!(
                    "Could not find next episodes for {} S{}E{}",
                    series.title, season, episode
                ),
            )
            .await;
            WebhookOutcome::NoUpcomingEpisodes
        }
        NextEpisodes::AllDownloaded => {
            notify(
                notifier,
                &format!(
                    "No episodes without files found after S{}E{} of {}",
                    season, episode, series.title
                ),
            )
            .await;
            WebhookOutcome::AllUpcomingDownloaded
        }
    };

    prune_watched(sonarr, notifier, &series.title, &episodes, index).await;

    Ok(outcome)
}

/// Delete the files of episodes that have fallen behind the cursor. Each
/// deletion is independent: a failure is logged and the remaining files are
/// still attempted. Only reported to the notification sink, never to the
/// HTTP caller.
async fn prune_watched<S, N>(
    sonarr: &S,
    notifier: &N,
    series_title: &str,
    episodes: &[Episode],
    index: usize,
) where
    S: SonarrApi,
    N: NotificationClient,
{
    for episode in window::episodes_to_delete(episodes, index, DELETE_DISTANCE, DELETE_COUNT) {
        let file_id = match episode.episode_file_id {
            Some(id) => id,
            None => {
                warn!(
                    "S{}E{} of \"{}\" has a file but no episode file id; skipping deletion.",
                    episode.season_number, episode.episode_number, series_title
                );
                continue;
            }
        };

        match sonarr.delete_episode_file(file_id).await {
            Ok(()) => {
                notify(
                    notifier,
                    &format!(
                        "Deleted episode file for {} S{}E{}",
                        series_title, episode.season_number, episode.episode_number
                    ),
                )
                .await;
            }
            Err(e) => {
                error!(
                    "Failed to delete episode file {} for \"{}\" S{}E{}: {}",
                    file_id, series_title, episode.season_number, episode.episode_number, e
                );
            }
        }
    }
}

/// Mirror a line to the notification sink. Sink failures are logged and
/// swallowed; notifications never decide the outcome of a request.
async fn notify<N: NotificationClient>(notifier: &N, text: &str) {
    info!("{}", text);
    if let Err(e) = notifier.send_message(text).await {
        error!(
            "Encountered error while sending the notification message: {:?}",
            e
        );
    }
}
