//! Model for the inbound notification body pushed by the media server.

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// The notification pushed when an episode finishes downloading, carrying the
/// viewer's playback cursor. Depending on the sending plugin, season and
/// episode numbers arrive as JSON numbers or as numeric strings, so both are
/// accepted.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DownloadNotification {
    pub series_name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub season_number: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub episode_number: u32,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        String(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::String(s) => s.trim().parse().map_err(de::Error::custom),
    }
}
