use axum::{extract::State, response::Html};
use axum_extra::extract::{Form, FormRejection};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use std::sync::Arc;

use super::{create_record, form_rejected, now};
use crate::error::{render, PageError};
use crate::filters::raw_datetime;
use crate::forms::ShowForm;
use crate::templates::{NewShowTemplate, ShowListing, ShowsTemplate};
use gigboard_db::entities::{artist, show, venue};
use gigboard_db::AppState;

/// Join shows with their venue and artist rows. Shows whose venue or artist
/// is missing are skipped.
pub(crate) fn project_listings(
    rows: Vec<(show::Model, Option<venue::Model>)>,
    artists: &HashMap<i32, artist::Model>,
) -> Vec<ShowListing> {
    rows.into_iter()
        .filter_map(|(show, venue)| {
            let venue = venue?;
            let artist = artists.get(&show.artist_id)?;
            Some(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name,
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone().unwrap_or_default(),
                start_time: raw_datetime(&show.start_time),
            })
        })
        .collect()
}

/// GET /shows
pub async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let rows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(&state.db)
        .await?;

    let mut artist_ids: Vec<i32> = rows.iter().map(|(s, _)| s.artist_id).collect();
    artist_ids.sort_unstable();
    artist_ids.dedup();
    let artists: HashMap<i32, artist::Model> = if artist_ids.is_empty() {
        HashMap::new()
    } else {
        artist::Entity::find()
            .filter(artist::Column::Id.is_in(artist_ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    render(&ShowsTemplate {
        shows: project_listings(rows, &artists),
    })
}

/// GET /shows/create
pub async fn create_show_form() -> Result<Html<String>, PageError> {
    render(&NewShowTemplate {
        default_start_time: now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ShowForm>, FormRejection>,
) -> Result<Html<String>, PageError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejected("Show", rejection),
    };
    let validated = form
        .validate()
        .map(|s| (show::ActiveModel::from(s), "Show was successfully listed!".to_string()));
    create_record(&state.db, "Show", validated).await
}
