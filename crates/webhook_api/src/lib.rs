//! Configuration and handling of download notifications pushed by the media server.

use crate::facades::{handle_download_notification, WebhookOutcome};
use crate::models::DownloadNotification;
use crate::nextarr_api_error::NextarrApiError;
use actix_web::{web, Error, HttpResponse};
use anyhow::{Context, Result};
use futures_util::StreamExt;
use nextarr_sonarr_client::SonarrApi;
use nextarr_telegram_client::NotificationClient;
use serde::{Deserialize, Serialize};
use std::str;
use tracing::{debug, debug_span, error};
use tracing_actix_web::RootSpan;

mod facades;
mod models;
mod nextarr_api_error;
mod nextarr_root_span;

const MAX_SIZE: usize = 262_144; // Limit max payload size to 256k.

pub use nextarr_root_span::NextarrRootSpan;

/// Configure the webhook API endpoints.
pub fn webhook_config<S, N>(cfg: &mut web::ServiceConfig)
where
    S: SonarrApi + Send + Sync + 'static,
    N: NotificationClient + Send + Sync + 'static,
{
    cfg.service(web::resource("/webhook").route(web::post().to(webhook::<S, N>)))
        .service(web::resource("/health").route(web::get().to(health)));
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

fn parse_body<'de, T>(body: &'de web::BytesMut) -> Result<T>
where
    T: Deserialize<'de>,
{
    serde_json::from_slice::<T>(body).with_context(|| {
        let span = debug_span!("Parsing Request Body");
        span.in_scope(|| {
            let str_body = str::from_utf8(body).unwrap_or("Could not convert body to string.");
            debug!("Request body: {}", str_body)
        });

        "Encountered an error while parsing the notification request body."
    })
}

async fn webhook<S, N>(
    root_span: RootSpan,
    sonarr: web::Data<S>,
    notifier: web::Data<N>,
    mut payload: web::Payload,
) -> Result<HttpResponse, Error>
where
    S: SonarrApi + Send + Sync + 'static,
    N: NotificationClient + Send + Sync + 'static,
{
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if (body.len() + chunk.len()) > MAX_SIZE {
            return Err(NextarrApiError::bad_request(
                format!("Body exceeded limit of {} kilobytes.", MAX_SIZE).as_str(),
            )
            .into());
        }

        body.extend_from_slice(&chunk);
    }

    let notification = match parse_body::<DownloadNotification>(&body) {
        Ok(n) => n,
        Err(e) => {
            debug!("Encountered error while parsing the notification: {:?}", e);
            return Err(NextarrApiError::invalid_json().into());
        }
    };
    root_span.record("series_name", notification.series_name.as_str());
    root_span.record(
        "playback_cursor",
        format!(
            "S{}E{}",
            notification.season_number, notification.episode_number
        )
        .as_str(),
    );

    match handle_download_notification(sonarr.get_ref(), notifier.get_ref(), &notification).await {
        Ok(WebhookOutcome::MonitoringAdded) => {
            Ok(HttpResponse::Ok().json(StatusBody { status: "received" }))
        }
        Ok(WebhookOutcome::SeriesNotFound) => Err(NextarrApiError::series_not_found().into()),
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => {
            error!("A Sonarr call failed while handling the notification: {:?}", e);
            Err(NextarrApiError::upstream_unavailable().into())
        }
    }
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(StatusBody { status: "ok" })
}
