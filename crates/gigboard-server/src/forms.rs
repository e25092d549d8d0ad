//! Submitted forms and their validation.
//!
//! Forms arrive as loose strings so that a bad value becomes a field message
//! instead of an extractor rejection. `validate` turns a form into a typed
//! record ready for insertion, or into [`FormErrors`] listing every invalid
//! field in declaration order.

use regex::Regex;
use sea_orm::{prelude::DateTimeWithTimeZone, Set};
use serde::Deserialize;
use std::sync::LazyLock;

use gigboard_db::entities::{artist, show, venue};
use gigboard_db::genres;

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const REQUIRED: &str = "This field is required.";
const NOT_A_CHOICE: &str = "Not a valid choice.";
const INVALID_URL: &str = "Invalid URL.";
const INVALID_PHONE: &str = "Invalid phone number.";
const NOT_AN_INTEGER: &str = "Not a valid integer value.";
const NOT_A_DATETIME: &str = "Not a valid datetime value.";

/// Accepted `start_time` layouts, all read as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9 ().-]+$").unwrap_or_else(|e| panic!("phone pattern: {e}"))
});

// ─── Errors ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    fn add(&mut self, field: &'static str, message: &str) {
        self.errors.push((field, message.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|(field, _)| *field).collect()
    }

    /// One notification line per invalid field.
    pub fn into_messages(self) -> Vec<String> {
        self.errors
            .into_iter()
            .map(|(field, message)| format!("Invalid input in {field} field. --> ({message})"))
            .collect()
    }
}

// ─── Field checks ───────────────────────────────────────────────────

fn required(errors: &mut FormErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn one_of(errors: &mut FormErrors, field: &'static str, value: &str, choices: &[&str]) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if !choices.contains(&value) {
        errors.add(field, NOT_A_CHOICE);
    }
    value.to_string()
}

fn genre_list(errors: &mut FormErrors, field: &'static str, values: Vec<String>) -> Vec<String> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        errors.add(field, REQUIRED);
    } else if values.iter().any(|v| !GENRES.contains(&v.as_str())) {
        errors.add(field, NOT_A_CHOICE);
    }
    values
}

fn optional_url(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = optional(value)?;
    let valid = url::Url::parse(&value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false);
    if !valid {
        errors.add(field, INVALID_URL);
    }
    Some(value)
}

fn optional_phone(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = optional(value)?;
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE_RE.is_match(&value) || !(7..=15).contains(&digits) {
        errors.add(field, INVALID_PHONE);
    }
    Some(value)
}

fn integer(errors: &mut FormErrors, field: &'static str, value: &str) -> i32 {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return 0;
    }
    value.parse().unwrap_or_else(|_| {
        errors.add(field, NOT_AN_INTEGER);
        0
    })
}

/// Checkbox semantics: absent, empty or `false` means unchecked.
fn checkbox(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|v| !matches!(v.trim(), "" | "false"))
        .unwrap_or(false)
}

pub fn parse_start_time(value: &str) -> Option<DateTimeWithTimeZone> {
    let value = value.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    DATETIME_FORMATS.iter().find_map(|fmt| {
        chrono::NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

// ─── Venue ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(self) -> Result<NewVenue, FormErrors> {
        let mut errors = FormErrors::default();
        let venue = NewVenue {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: one_of(&mut errors, "state", &self.state, STATES),
            address: required(&mut errors, "address", &self.address),
            phone: optional_phone(&mut errors, "phone", &self.phone),
            image_link: optional_url(&mut errors, "image_link", &self.image_link),
            genres: genre_list(&mut errors, "genres", self.genres),
            facebook_link: optional_url(&mut errors, "facebook_link", &self.facebook_link),
            website: optional_url(&mut errors, "website_link", &self.website_link),
            seeking_talent: checkbox(&self.seeking_talent),
            seeking_description: optional(&self.seeking_description),
        };
        if errors.is_empty() {
            Ok(venue)
        } else {
            Err(errors)
        }
    }
}

impl From<NewVenue> for venue::ActiveModel {
    fn from(v: NewVenue) -> Self {
        venue::ActiveModel {
            name: Set(v.name),
            city: Set(v.city),
            state: Set(v.state),
            address: Set(v.address),
            phone: Set(v.phone),
            image_link: Set(v.image_link),
            facebook_link: Set(v.facebook_link),
            website: Set(v.website),
            genres: Set(genres::encode(&v.genres)),
            seeking_talent: Set(v.seeking_talent),
            seeking_description: Set(v.seeking_description),
            ..Default::default()
        }
    }
}

// ─── Artist ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(self) -> Result<NewArtist, FormErrors> {
        let mut errors = FormErrors::default();
        let artist = NewArtist {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: one_of(&mut errors, "state", &self.state, STATES),
            phone: optional_phone(&mut errors, "phone", &self.phone),
            image_link: optional_url(&mut errors, "image_link", &self.image_link),
            genres: genre_list(&mut errors, "genres", self.genres),
            facebook_link: optional_url(&mut errors, "facebook_link", &self.facebook_link),
            website: optional_url(&mut errors, "website_link", &self.website_link),
            seeking_venue: checkbox(&self.seeking_venue),
            seeking_description: optional(&self.seeking_description),
        };
        if errors.is_empty() {
            Ok(artist)
        } else {
            Err(errors)
        }
    }
}

impl From<NewArtist> for artist::ActiveModel {
    fn from(a: NewArtist) -> Self {
        artist::ActiveModel {
            name: Set(a.name),
            city: Set(a.city),
            state: Set(a.state),
            phone: Set(a.phone),
            image_link: Set(a.image_link),
            facebook_link: Set(a.facebook_link),
            website: Set(a.website),
            genres: Set(genres::encode(&a.genres)),
            seeking_venue: Set(a.seeking_venue),
            seeking_description: Set(a.seeking_description),
            ..Default::default()
        }
    }
}

// ─── Show ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTimeWithTimeZone,
}

impl ShowForm {
    pub fn validate(self) -> Result<NewShow, FormErrors> {
        let mut errors = FormErrors::default();
        let artist_id = integer(&mut errors, "artist_id", &self.artist_id);
        let venue_id = integer(&mut errors, "venue_id", &self.venue_id);
        let start_time = if self.start_time.trim().is_empty() {
            errors.add("start_time", REQUIRED);
            None
        } else {
            let parsed = parse_start_time(&self.start_time);
            if parsed.is_none() {
                errors.add("start_time", NOT_A_DATETIME);
            }
            parsed
        };
        match start_time {
            Some(start_time) if errors.is_empty() => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

impl From<NewShow> for show::ActiveModel {
    fn from(s: NewShow) -> Self {
        show::ActiveModel {
            start_time: Set(s.start_time),
            venue_id: Set(s.venue_id),
            artist_id: Set(s.artist_id),
            ..Default::default()
        }
    }
}
