//! Models for the Sonarr v3 API resources Nextarr reads and mutates.
//! Source: https://sonarr.tv/docs/api/ (series and episode resources).

mod episode;
mod series;

pub use episode::Episode;
pub use series::Series;
