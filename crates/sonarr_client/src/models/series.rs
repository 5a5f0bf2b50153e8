use serde::{Deserialize, Serialize};

/// General data about a series in the Sonarr catalog. A snapshot; never written back.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: u64,
    pub title: String,
    pub title_slug: String,
}
