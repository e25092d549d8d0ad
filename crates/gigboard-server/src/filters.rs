use sea_orm::prelude::DateTimeWithTimeZone;

/// Human-readable start time for detail pages, e.g. `Mon 05, 21, 2035 9:30PM`.
pub fn format_datetime(value: &DateTimeWithTimeZone) -> String {
    value.format("%a %m, %d, %Y %-I:%M%p").to_string()
}

/// Start time as stored, used by the show listing.
pub fn raw_datetime(value: &DateTimeWithTimeZone) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}
