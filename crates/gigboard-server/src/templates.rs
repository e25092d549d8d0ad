//! Page templates and the view models they render.
//!
//! View models hold plain strings so templates never deal with `Option`;
//! absent values are empty strings.

use askama::Template;

// ─── View models ────────────────────────────────────────────────────

/// A select option, pre-marked when the record already carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub selected: bool,
}

pub fn choices<S: AsRef<str>>(options: &'static [&'static str], selected: &[S]) -> Vec<Choice> {
    options
        .iter()
        .map(|&value| Choice {
            value,
            selected: selected.iter().any(|s| s.as_ref() == value),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: Option<usize>,
}

/// The other side of a show as seen from a detail page: the artist on a
/// venue page, the venue on an artist page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCard {
    pub id: i32,
    pub name: String,
    pub image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
    pub past_shows: Vec<ShowCard>,
    pub upcoming_shows: Vec<ShowCard>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
    pub past_shows: Vec<ShowCard>,
    pub upcoming_shows: Vec<ShowCard>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Pre-filled values for the edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFields {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking: bool,
    pub seeking_description: String,
    pub image_link: String,
}

// ─── Pages ──────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub messages: Vec<String>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowListing>,
}

#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    /// Path prefix of the searched slice, `venues` or `artists`.
    pub slice: &'static str,
    pub search_term: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct ShowVenueTemplate {
    pub venue: VenueDetail,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ShowArtistTemplate {
    pub artist: ArtistDetail,
}

// ─── Forms ──────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "forms/new_venue.html")]
pub struct NewVenueTemplate {
    pub states: Vec<Choice>,
    pub genres: Vec<Choice>,
}

#[derive(Template)]
#[template(path = "forms/new_artist.html")]
pub struct NewArtistTemplate {
    pub states: Vec<Choice>,
    pub genres: Vec<Choice>,
}

#[derive(Template)]
#[template(path = "forms/new_show.html")]
pub struct NewShowTemplate {
    pub default_start_time: String,
}

#[derive(Template)]
#[template(path = "forms/edit_venue.html")]
pub struct EditVenueTemplate {
    pub venue: EditFields,
    pub address: String,
    pub states: Vec<Choice>,
    pub genres: Vec<Choice>,
}

#[derive(Template)]
#[template(path = "forms/edit_artist.html")]
pub struct EditArtistTemplate {
    pub artist: EditFields,
    pub states: Vec<Choice>,
    pub genres: Vec<Choice>,
}

// ─── Errors ─────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate;
