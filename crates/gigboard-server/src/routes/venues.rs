use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::{Form, FormRejection};
use sea_orm::{prelude::DateTimeWithTimeZone, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::{create_record, form_rejected, name_contains, now, SearchForm};
use crate::error::{parse_id, render, PageError};
use crate::filters::format_datetime;
use crate::forms::{VenueForm, GENRES, STATES};
use crate::templates::{
    choices, Area, EditFields, EditVenueTemplate, NewVenueTemplate, SearchHit, SearchTemplate,
    ShowCard, ShowVenueTemplate, VenueDetail, VenueSummary, VenuesTemplate,
};
use gigboard_db::entities::{artist, show, venue};
use gigboard_db::{genres, timeline, AppState};

/// Group venues by (city, state), counting each venue's upcoming shows.
///
/// Groups are ordered by city then state; members keep the input order.
pub(crate) fn group_by_area(
    venues: Vec<venue::Model>,
    shows: &[show::Model],
    now: &DateTimeWithTimeZone,
) -> Vec<Area> {
    let mut upcoming: HashMap<i32, usize> = HashMap::new();
    for s in shows {
        if timeline::is_upcoming(&s.start_time, now) {
            *upcoming.entry(s.venue_id).or_default() += 1;
        }
    }

    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for v in venues {
        let num_upcoming_shows = upcoming.get(&v.id).copied().unwrap_or(0);
        areas.entry((v.city, v.state)).or_default().push(VenueSummary {
            id: v.id,
            name: v.name,
            num_upcoming_shows,
        });
    }

    areas
        .into_iter()
        .map(|((city, state), venues)| Area {
            city,
            state,
            venues,
        })
        .collect()
}

/// GET /venues
pub async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Name)
        .all(&state.db)
        .await?;
    let shows = show::Entity::find().all(&state.db).await?;

    render(&VenuesTemplate {
        areas: group_by_area(venues, &shows, &now()),
    })
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let venues = venue::Entity::find()
        .filter(name_contains(venue::Column::Name, &form.search_term))
        .order_by_asc(venue::Column::Name)
        .all(&state.db)
        .await?;

    let results: Vec<SearchHit> = venues
        .into_iter()
        .map(|v| SearchHit {
            id: v.id,
            name: v.name,
            num_upcoming_shows: None,
        })
        .collect();

    render(&SearchTemplate {
        slice: "venues",
        search_term: form.search_term,
        count: results.len(),
        results,
    })
}

/// GET /venues/{id}
pub async fn show_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    let venue = venue::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(PageError::NotFound)?;
    let genres = genres::decode(&venue.genres)?;

    let shows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(&state.db)
        .await?;

    let cards = shows.into_iter().filter_map(|(show, artist)| {
        let artist = artist?;
        Some((
            show.start_time,
            ShowCard {
                id: artist.id,
                name: artist.name,
                image_link: artist.image_link.unwrap_or_default(),
                start_time: format_datetime(&show.start_time),
            },
        ))
    });
    let split = timeline::partition(cards, &now(), |(start, _)| *start);
    let past_shows: Vec<ShowCard> = split.past.into_iter().map(|(_, card)| card).collect();
    let upcoming_shows: Vec<ShowCard> = split.upcoming.into_iter().map(|(_, card)| card).collect();

    render(&ShowVenueTemplate {
        venue: VenueDetail {
            id: venue.id,
            name: venue.name,
            genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone.unwrap_or_default(),
            website: venue.website.unwrap_or_default(),
            facebook_link: venue.facebook_link.unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.unwrap_or_default(),
            image_link: venue.image_link.unwrap_or_default(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        },
    })
}

/// GET /venues/create
pub async fn create_venue_form() -> Result<Html<String>, PageError> {
    let none: &[&str] = &[];
    render(&NewVenueTemplate {
        states: choices(STATES, none),
        genres: choices(GENRES, none),
    })
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    form: Result<Form<VenueForm>, FormRejection>,
) -> Result<Html<String>, PageError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejected("Venue", rejection),
    };
    let validated = form.validate().map(|v| {
        let success = format!("Venue {} was successfully listed!", v.name);
        (venue::ActiveModel::from(v), success)
    });
    create_record(&state.db, "Venue", validated).await
}

/// DELETE /venues/{id}
///
/// Deleting venues is not implemented; the request is accepted and ignored.
pub async fn delete_venue(Path(id): Path<String>) -> StatusCode {
    tracing::debug!(venue_id = %id, "venue deletion is not implemented");
    StatusCode::NO_CONTENT
}

/// GET /venues/{id}/edit
///
/// Editing is not implemented: the form is always filled with the same
/// sample venue, whatever the id.
pub async fn edit_venue_form(Path(id): Path<String>) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    tracing::debug!(venue_id = id, "rendering sample venue for edit form");
    render(&EditVenueTemplate {
        venue: EditFields {
            id: 1,
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            phone: "123-123-1234".into(),
            website: "https://www.themusicalhop.com".into(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
            seeking: true,
            seeking_description:
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .into(),
            image_link: "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=60".into(),
        },
        address: "1015 Folsom Street".into(),
        states: choices(STATES, &["CA"]),
        genres: choices(GENRES, &["Jazz", "Reggae", "Classical", "Folk"]),
    })
}

/// POST /venues/{id}/edit
///
/// Submissions are discarded; the client is sent back to the venue page.
pub async fn edit_venue(Path(id): Path<String>) -> Result<Redirect, PageError> {
    let id = parse_id(&id)?;
    Ok(Redirect::to(&format!("/venues/{id}")))
}
