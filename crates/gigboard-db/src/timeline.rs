//! Past/upcoming classification of shows.
//!
//! Nothing about timing is stored: a show is upcoming when it starts strictly
//! after `now` and past otherwise, so a show starting exactly at `now` is past.

use sea_orm::prelude::DateTimeWithTimeZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

pub fn classify(start_time: &DateTimeWithTimeZone, now: &DateTimeWithTimeZone) -> ShowTiming {
    if start_time > now {
        ShowTiming::Upcoming
    } else {
        ShowTiming::Past
    }
}

pub fn is_upcoming(start_time: &DateTimeWithTimeZone, now: &DateTimeWithTimeZone) -> bool {
    classify(start_time, now) == ShowTiming::Upcoming
}

/// Items split by [`classify`], each half in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

pub fn partition<T, I, F>(items: I, now: &DateTimeWithTimeZone, start_of: F) -> Partitioned<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> DateTimeWithTimeZone,
{
    let mut out = Partitioned::default();
    for item in items {
        match classify(&start_of(&item), now) {
            ShowTiming::Upcoming => out.upcoming.push(item),
            ShowTiming::Past => out.past.push(item),
        }
    }
    out
}
