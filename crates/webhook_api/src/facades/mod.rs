//! Services for turning an inbound download notification into Sonarr mutations
//! and notification-sink messages.

mod download_facade;

pub use download_facade::{handle_download_notification, WebhookOutcome};
