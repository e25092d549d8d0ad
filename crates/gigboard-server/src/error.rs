//! Failures of read paths and their error pages.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::templates::{NotFoundTemplate, ServerErrorTemplate};
use gigboard_db::genres::GenresError;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("page not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Genres(#[from] GenresError),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => error_page(StatusCode::NOT_FOUND, NotFoundTemplate.render()),
            other => {
                tracing::error!(error = %other, "request failed");
                error_page(StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate.render())
            }
        }
    }
}

fn error_page(status: StatusCode, body: askama::Result<String>) -> Response {
    match body {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render error page");
            (status, status.canonical_reason().unwrap_or("Error")).into_response()
        }
    }
}

/// Render a template into a full page.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, PageError> {
    Ok(Html(template.render()?))
}

/// Parse a numeric path id; anything else is a missing page.
pub fn parse_id(raw: &str) -> Result<i32, PageError> {
    raw.parse().map_err(|_| PageError::NotFound)
}

/// Fallback for unknown routes.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
