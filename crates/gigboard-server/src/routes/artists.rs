use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::{Form, FormRejection};
use sea_orm::{prelude::DateTimeWithTimeZone, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use std::sync::Arc;

use super::{create_record, form_rejected, name_contains, now, SearchForm};
use crate::error::{parse_id, render, PageError};
use crate::filters::format_datetime;
use crate::forms::{ArtistForm, GENRES, STATES};
use crate::templates::{
    choices, ArtistDetail, ArtistSummary, ArtistsTemplate, EditArtistTemplate, EditFields,
    NewArtistTemplate, SearchHit, SearchTemplate, ShowArtistTemplate, ShowCard,
};
use gigboard_db::entities::{artist, show, venue};
use gigboard_db::{genres, timeline, AppState};

fn upcoming_by_artist(shows: &[show::Model], now: &DateTimeWithTimeZone) -> HashMap<i32, usize> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for s in shows {
        if timeline::is_upcoming(&s.start_time, now) {
            *counts.entry(s.artist_id).or_default() += 1;
        }
    }
    counts
}

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|a| ArtistSummary {
            id: a.id,
            name: a.name,
        })
        .collect();

    render(&ArtistsTemplate { artists })
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let artists = artist::Entity::find()
        .filter(name_contains(artist::Column::Name, &form.search_term))
        .order_by_asc(artist::Column::Name)
        .all(&state.db)
        .await?;

    let ids: Vec<i32> = artists.iter().map(|a| a.id).collect();
    let shows = if ids.is_empty() {
        Vec::new()
    } else {
        show::Entity::find()
            .filter(show::Column::ArtistId.is_in(ids))
            .all(&state.db)
            .await?
    };
    let upcoming = upcoming_by_artist(&shows, &now());

    let results: Vec<SearchHit> = artists
        .into_iter()
        .map(|a| SearchHit {
            num_upcoming_shows: Some(upcoming.get(&a.id).copied().unwrap_or(0)),
            id: a.id,
            name: a.name,
        })
        .collect();

    render(&SearchTemplate {
        slice: "artists",
        search_term: form.search_term,
        count: results.len(),
        results,
    })
}

/// GET /artists/{id}
pub async fn show_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    let artist = artist::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(PageError::NotFound)?;
    let genres = genres::decode(&artist.genres)?;

    let shows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(&state.db)
        .await?;

    let cards = shows.into_iter().filter_map(|(show, venue)| {
        let venue = venue?;
        Some((
            show.start_time,
            ShowCard {
                id: venue.id,
                name: venue.name,
                image_link: venue.image_link.unwrap_or_default(),
                start_time: format_datetime(&show.start_time),
            },
        ))
    });
    let split = timeline::partition(cards, &now(), |(start, _)| *start);
    let past_shows: Vec<ShowCard> = split.past.into_iter().map(|(_, card)| card).collect();
    let upcoming_shows: Vec<ShowCard> = split.upcoming.into_iter().map(|(_, card)| card).collect();

    render(&ShowArtistTemplate {
        artist: ArtistDetail {
            id: artist.id,
            name: artist.name,
            genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone.unwrap_or_default(),
            website: artist.website.unwrap_or_default(),
            facebook_link: artist.facebook_link.unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.unwrap_or_default(),
            image_link: artist.image_link.unwrap_or_default(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        },
    })
}

/// GET /artists/create
pub async fn create_artist_form() -> Result<Html<String>, PageError> {
    let none: &[&str] = &[];
    render(&NewArtistTemplate {
        states: choices(STATES, none),
        genres: choices(GENRES, none),
    })
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ArtistForm>, FormRejection>,
) -> Result<Html<String>, PageError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejected("Artist", rejection),
    };
    let validated = form.validate().map(|a| {
        let success = format!("Artist {} was successfully listed!", a.name);
        (artist::ActiveModel::from(a), success)
    });
    create_record(&state.db, "Artist", validated).await
}

/// GET /artists/{id}/edit
///
/// Editing is not implemented: the form always shows the same sample artist.
pub async fn edit_artist_form(Path(id): Path<String>) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    tracing::debug!(artist_id = id, "rendering sample artist for edit form");
    render(&EditArtistTemplate {
        artist: EditFields {
            id: 4,
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            phone: "326-123-5000".into(),
            website: "https://www.gunsnpetalsband.com".into(),
            facebook_link: "https://www.facebook.com/GunsNPetals".into(),
            seeking: true,
            seeking_description: "Looking for shows to perform at in the San Francisco Bay Area!"
                .into(),
            image_link: "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&auto=format&fit=crop&w=300&q=80".into(),
        },
        states: choices(STATES, &["CA"]),
        genres: choices(GENRES, &["Rock n Roll"]),
    })
}

/// POST /artists/{id}/edit
pub async fn edit_artist(Path(id): Path<String>) -> Result<Redirect, PageError> {
    let id = parse_id(&id)?;
    Ok(Redirect::to(&format!("/artists/{id}")))
}
