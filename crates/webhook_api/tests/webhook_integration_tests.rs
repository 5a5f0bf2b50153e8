use actix_web::http::header::ContentType;
use actix_web::http::{Method, StatusCode};
use actix_web::{test, web, App};
use nextarr_webhook_api::{webhook_config, NextarrRootSpan};
use tracing_actix_web::TracingLogger;

mod common;

use common::{episode, series, FakeSonarr, SpyNotificationClient};

const NOTIFICATION_BODY: &str = "{
    \"SeriesName\": \"Gravity Falls\",
    \"SeasonNumber\": 1,
    \"EpisodeNumber\": 1
}";

/// A catalog of one series with four episodes: the first two on disk, the last
/// two still missing.
fn default_fake_sonarr() -> FakeSonarr {
    FakeSonarr {
        series: vec![series(2, "Gravity Falls", "gravity-falls")],
        episodes: vec![
            episode(11, 1, 1, true),
            episode(12, 1, 2, true),
            episode(13, 1, 3, false),
            episode(14, 1, 4, false),
        ],
        ..FakeSonarr::default()
    }
}

#[actix_rt::test]
async fn webhook_post_returns_200_and_monitors_next_episodes_given_known_series() {
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        .set_payload(NOTIFICATION_BODY)
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::OK, resp.status());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!("received", body["status"]);
    // The window past S01E01 is [S01E02, S01E03]; only S01E03 lacks a file.
    let monitor_calls = sonarr.monitor_calls.read().await;
    assert_eq!(vec![(vec![13], true)], *monitor_calls);
    let search_calls = sonarr.search_calls.read().await;
    assert_eq!(vec![2], *search_calls);
    let messages = notifier.messages.read().await;
    assert!(messages
        .iter()
        .any(|m| m.contains("Added monitoring for next episodes S1E3 for Gravity Falls")));
}

#[actix_rt::test]
async fn webhook_post_accepts_string_cursor_values() {
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let body = "{
    \"SeriesName\": \"Gravity Falls\",
    \"SeasonNumber\": \"1\",
    \"EpisodeNumber\": \"1\"
}";
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        .set_payload(body)
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::OK, resp.status());
}

#[actix_rt::test]
async fn webhook_post_returns_404_and_mutates_nothing_given_unknown_series() {
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let body = "{
    \"SeriesName\": \"Nonexistent Show\",
    \"SeasonNumber\": 1,
    \"EpisodeNumber\": 1
}";
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        .set_payload(body)
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::NOT_FOUND, resp.status());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!("Series not found", body["detail"]);
    assert!(sonarr.monitor_calls.read().await.is_empty());
    assert!(sonarr.search_calls.read().await.is_empty());
    assert!(sonarr.deleted_files.read().await.is_empty());
    let messages = notifier.messages.read().await;
    assert!(messages
        .iter()
        .any(|m| m.contains("Could not find series with title Nonexistent Show")));
}

#[actix_rt::test]
async fn webhook_post_returns_400_with_detail_given_invalid_json() {
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        // Not a notification request body.
        .set_payload("{\"SeriesName\": ")
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::BAD_REQUEST, resp.status());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!("Invalid JSON", body["detail"]);
    assert!(sonarr.monitor_calls.read().await.is_empty());
}

#[actix_rt::test]
async fn webhook_post_returns_204_and_prunes_old_files_given_cursor_at_end_of_list() {
    // Cursor on S01E04: no upcoming episodes remain, and the delete block
    // behind the cursor truncates to [S01E01], the only old file on disk.
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let body = "{
    \"SeriesName\": \"Gravity Falls\",
    \"SeasonNumber\": 1,
    \"EpisodeNumber\": 4
}";
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        .set_payload(body)
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::NO_CONTENT, resp.status());
    assert!(sonarr.monitor_calls.read().await.is_empty());
    let deleted = sonarr.deleted_files.read().await;
    assert_eq!(vec![1011], *deleted);
    let messages = notifier.messages.read().await;
    assert!(messages
        .iter()
        .any(|m| m.contains("Could not find next episodes for Gravity Falls S1E4")));
    assert!(messages
        .iter()
        .any(|m| m.contains("Deleted episode file for Gravity Falls S1E1")));
}

#[actix_rt::test]
async fn webhook_post_returns_204_given_next_episodes_already_have_files() {
    // Arrange
    let sonarr = web::Data::new(FakeSonarr {
        series: vec![series(2, "Gravity Falls", "gravity-falls")],
        episodes: vec![
            episode(11, 1, 1, true),
            episode(12, 1, 2, true),
            episode(13, 1, 3, true),
            episode(14, 1, 4, false),
        ],
        ..FakeSonarr::default()
    });
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        .set_payload(NOTIFICATION_BODY)
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::NO_CONTENT, resp.status());
    assert!(sonarr.monitor_calls.read().await.is_empty());
    let messages = notifier.messages.read().await;
    assert!(messages
        .iter()
        .any(|m| m.contains("No episodes without files found after S1E1 of Gravity Falls")));
}

#[actix_rt::test]
async fn webhook_post_returns_204_given_cursor_not_in_episode_list() {
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let body = "{
    \"SeriesName\": \"Gravity Falls\",
    \"SeasonNumber\": 7,
    \"EpisodeNumber\": 1
}";
    let req = test::TestRequest::default()
        .insert_header(ContentType::json())
        .method(Method::POST)
        .uri("/webhook")
        .set_payload(body)
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::NO_CONTENT, resp.status());
    assert!(sonarr.monitor_calls.read().await.is_empty());
    assert!(sonarr.deleted_files.read().await.is_empty());
}

#[actix_rt::test]
async fn health_returns_200_with_ok_status() {
    // Arrange
    let sonarr = web::Data::new(default_fake_sonarr());
    let notifier = web::Data::new(SpyNotificationClient::default());
    let app = test::init_service(
        App::new()
            .wrap(TracingLogger::<NextarrRootSpan>::new())
            .app_data(sonarr.clone())
            .app_data(notifier.clone())
            .configure(webhook_config::<FakeSonarr, SpyNotificationClient>),
    )
    .await;
    let req = test::TestRequest::default()
        .method(Method::GET)
        .uri("/health")
        .to_request();

    // Act
    let resp = test::call_service(&app, req).await;

    // Assert
    assert_eq!(StatusCode::OK, resp.status());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!("ok", body["status"]);
}
