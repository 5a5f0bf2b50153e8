use serde::{Deserialize, Serialize};

/// A record of an episode as Sonarr tracks it.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u64,
    /// Identifier of the file on disk, when one exists. This is the handle the
    /// episode-file DELETE endpoint expects, not the episode id.
    #[serde(default)]
    pub episode_file_id: Option<u64>,
    pub season_number: u32,
    pub episode_number: u32,
    pub has_file: bool,
    pub title: String,
}
