use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::ModifiedJulianDate;

/// Parse a time value given as text.
///
/// Accepted forms, tried in order:
/// * a bare MJD number (`"59853.0"`)
/// * an RFC 3339 timestamp (`"2022-10-01T12:00:00Z"`)
/// * `"%Y-%m-%d %H:%M:%S"` or `"%Y-%m-%dT%H:%M:%S"`, read as UTC
/// * a calendar date (`"2022-10-01"`), read as UTC midnight
pub fn parse_time_str(value: &str) -> Option<ModifiedJulianDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(mjd) = trimmed.parse::<f64>() {
        return mjd.is_finite().then(|| ModifiedJulianDate::new(mjd));
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(ModifiedJulianDate::from_datetime(dt.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ModifiedJulianDate::from_datetime(Utc.from_utc_datetime(&naive_dt)));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(ModifiedJulianDate::from_datetime(Utc.from_utc_datetime(&midnight)));
    }

    None
}
