//! Positional arithmetic over a sorted episode list, relative to the playback
//! cursor reported by the media server.
//!
//! Everything here assumes the list is sorted ascending by
//! `(season_number, episode_number)` — [crate::SonarrApi::episodes] guarantees
//! that — because the cursor is located purely by linear index.

use crate::models::Episode;

/// Result of scanning for upcoming episodes worth monitoring.
#[derive(Debug, PartialEq)]
pub enum NextEpisodes {
    /// Upcoming episodes that are still missing their files.
    Monitorable(Vec<Episode>),
    /// The window held episodes, but every one of them is already on disk.
    AllDownloaded,
    /// The cursor sits too close to the end of the list; the window is empty.
    NoneRemaining,
}

/// Position of the first episode matching the cursor, or [None] if the
/// reported (season, episode) pair is absent from the list.
pub fn locate_index(episodes: &[Episode], season: u32, episode: u32) -> Option<usize> {
    episodes
        .iter()
        .position(|e| e.season_number == season && e.episode_number == episode)
}

/// The two episodes starting one position before `lookahead` past the cursor,
/// filtered to those missing files. Never returns an episode that already has
/// a file; the two empty outcomes are distinguished so they can be reported
/// separately.
pub fn next_episodes(episodes: &[Episode], index: usize, lookahead: usize) -> NextEpisodes {
    let start = (index + lookahead).saturating_sub(1).min(episodes.len());
    let end = (index + lookahead + 1).min(episodes.len());
    let window = &episodes[start..end];
    if window.is_empty() {
        return NextEpisodes::NoneRemaining;
    }

    let monitorable: Vec<Episode> = window.iter().filter(|e| !e.has_file).cloned().collect();
    if monitorable.is_empty() {
        NextEpisodes::AllDownloaded
    } else {
        NextEpisodes::Monitorable(monitorable)
    }
}

/// A block of up to `count` episodes ending `distance` positions before the
/// cursor, filtered to those with a file on disk. Near the start of a series
/// the block truncates to whatever prefix exists, so fewer than `count`
/// candidates may come back.
pub fn episodes_to_delete(
    episodes: &[Episode],
    index: usize,
    distance: usize,
    count: usize,
) -> Vec<Episode> {
    let end = index.saturating_sub(distance).min(episodes.len());
    let start = index.saturating_sub(distance + count).min(end);
    episodes[start..end]
        .iter()
        .filter(|e| e.has_file)
        .cloned()
        .collect()
}
