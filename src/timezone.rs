use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

/// Look up a timezone by its canonical name, e.g. "Pacific/Auckland".
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// The offset from UTC `timezone` has right now.
pub fn get_local_offset(timezone: &Tz) -> UtcOffset {
    timezone.get_offset_utc(&OffsetDateTime::now_utc()).to_utc()
}

/// Today's date in `timezone`.
pub fn today(timezone: &Tz) -> Date {
    OffsetDateTime::now_utc()
        .to_offset(get_local_offset(timezone))
        .date()
}
