//! Civil-time helpers. Instants are stored in UTC and compared or displayed in
//! a fixed civil timezone.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// Convert a UTC instant to the civil timezone.
pub fn in_civil(ts: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    ts.with_timezone(&tz)
}

/// `HH:MM` in the civil timezone.
pub fn clock_label(ts: DateTime<Utc>, tz: Tz) -> String {
    in_civil(ts, tz).format("%H:%M").to_string()
}

/// Whether two instants fall on different calendar days in the civil timezone.
pub fn is_new_day(prev: DateTime<Utc>, next: DateTime<Utc>, tz: Tz) -> bool {
    let a = in_civil(prev, tz);
    let b = in_civil(next, tz);
    a.ordinal() != b.ordinal() || a.year() != b.year()
}
