extern crate dotenv;

use anyhow::{Context, Result};
use dotenv::dotenv;
use nextarr_common::environment::{
    get_env_var,
    variables::{LOG_FILTER, WEB_PORT},
};
use nextarr_sonarr_client::{initialize_sonarr_client, SonarrClient};
use nextarr_telegram_client::{initialize_telegram_client, TelegramClient};
use nextarr_webhook_api::{webhook_config, NextarrRootSpan};
use std::str::FromStr;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    use actix_web::{web, App, HttpServer};

    dotenv().ok();

    // Set up logging framework, reading filter configuration from the environment variable
    // or defaulting to warning logs and above globally if the filter isn't specified.
    let filter = EnvFilter::try_from_env(LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::default())
        .add_directive(LevelFilter::WARN.into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Initializing Nextarr...");

    info!("Setting up the Sonarr API client...");
    let sonarr = web::Data::new(initialize_sonarr_client()?);

    info!("Setting up the Telegram notification client...");
    let telegram = web::Data::new(initialize_telegram_client()?);

    info!("Starting up web server...");
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(telegram.clone())
            .configure(webhook_config::<SonarrClient, TelegramClient>)
    })
    .bind(format!("0.0.0.0:{}", get_port()?))?
    .run();

    info!("Nextarr started!");
    http_server.await?;

    info!("Shutting Nextarr down.");
    Ok(())
}

fn get_port() -> Result<String> {
    let value = match get_env_var(WEB_PORT) {
        Ok(v) => v,
        Err(_) => String::from("8080"),
    };
    match u16::from_str(&value) {
        Ok(_) => Ok(value),
        Err(e) => Err(e).context(format!("Failed to parse \"{}\" as a valid port.", value)),
    }
}
