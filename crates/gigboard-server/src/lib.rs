use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use gigboard_db::AppState;
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod routes;
pub mod templates;

/// Build the full application router.
pub fn router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/healthz", get(routes::healthz))
        // Venues
        .route("/venues", get(routes::venues::list_venues))
        .route("/venues/search", post(routes::venues::search_venues))
        .route(
            "/venues/create",
            get(routes::venues::create_venue_form).post(routes::venues::create_venue),
        )
        .route(
            "/venues/{id}",
            get(routes::venues::show_venue).delete(routes::venues::delete_venue),
        )
        .route(
            "/venues/{id}/edit",
            get(routes::venues::edit_venue_form).post(routes::venues::edit_venue),
        )
        // Artists
        .route("/artists", get(routes::artists::list_artists))
        .route("/artists/search", post(routes::artists::search_artists))
        .route(
            "/artists/create",
            get(routes::artists::create_artist_form).post(routes::artists::create_artist),
        )
        .route("/artists/{id}", get(routes::artists::show_artist))
        .route(
            "/artists/{id}/edit",
            get(routes::artists::edit_artist_form).post(routes::artists::edit_artist),
        )
        // Shows
        .route("/shows", get(routes::shows::list_shows))
        .route(
            "/shows/create",
            get(routes::shows::create_show_form).post(routes::shows::create_show),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(error::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}
