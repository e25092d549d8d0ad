// Shared test utilities for integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use gigboard_db::entities::{artist, show, venue};
use gigboard_db::{genres, AppState, DatabaseConfig};
use gigboard_migration::{Migrator, MigratorTrait};
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set};
use std::sync::Arc;
use tower::ServiceExt;

/// Router backed by a fresh, migrated in-memory SQLite database.
pub async fn test_app() -> (Router, DatabaseConnection) {
    let db = gigboard_db::connect(&DatabaseConfig::in_memory())
        .await
        .unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();

    let state = Arc::new(AppState { db: db.clone() });
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
    (gigboard_server::router(state, static_dir), db)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST an urlencoded form. Repeat a key to submit a multi-select.
pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// ─── Seed data ──────────────────────────────────────────────────────

pub async fn seed_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
    venue_genres: &[&str],
) -> venue::Model {
    let genre_list: Vec<String> = venue_genres.iter().map(|g| g.to_string()).collect();
    venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set(Some("123-123-1234".to_string())),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set(genres::encode(&genre_list)),
        seeking_talent: Set(true),
        seeking_description: Set(Some("Looking for local artists".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_artist(db: &DatabaseConnection, name: &str, artist_genres: &[&str]) -> artist::Model {
    let genre_list: Vec<String> = artist_genres.iter().map(|g| g.to_string()).collect();
    artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(None),
        image_link: Set(Some("https://img.example.com/artist.jpg".to_string())),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set(genres::encode(&genre_list)),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTimeWithTimeZone,
) -> show::Model {
    show::ActiveModel {
        start_time: Set(start_time),
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn days_from_now(days: i64) -> DateTimeWithTimeZone {
    (chrono::Utc::now() + chrono::Duration::days(days)).fixed_offset()
}
