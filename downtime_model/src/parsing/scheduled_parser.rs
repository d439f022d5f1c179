use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::core::domain::{DowntimeCategory, DowntimeEvent};

/// Candidate keys that may contain the list of downtime rows in the JSON payload
const TABLE_KEYS: &[&str] = &[
    "downtime",
    "Downtime",
    "downtimes",
    "scheduled_downtime",
    "scheduledDowntime",
];

/// Name of the table read from SQLite sources
pub const SQLITE_TABLE: &str = "Downtime";

/// One row of a scheduled-downtime table, either `{"night", "duration", "activity"}`
/// or a `[night, duration, activity]` triple.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRow {
    Object {
        #[serde(alias = "start_night")]
        night: u32,
        #[serde(alias = "duration_days")]
        duration: u32,
        #[serde(alias = "comment", alias = "label")]
        activity: String,
    },
    Triple(u32, u32, String),
}

impl From<RawRow> for DowntimeEvent {
    fn from(row: RawRow) -> Self {
        let (night, duration, activity) = match row {
            RawRow::Object {
                night,
                duration,
                activity,
            } => (night, duration, activity),
            RawRow::Triple(night, duration, activity) => (night, duration, activity),
        };
        DowntimeEvent::new(night, duration, DowntimeCategory::Custom(activity))
    }
}

/// Parse a scheduled-downtime table from a JSON file
pub fn parse_scheduled_downtime_file(path: &Path) -> Result<Vec<DowntimeEvent>> {
    let json_content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scheduled downtime file: {}", path.display()))?;

    parse_scheduled_downtime_str(&json_content)
        .with_context(|| format!("Invalid scheduled downtime file: {}", path.display()))
}

/// Parse a scheduled-downtime table from a JSON string
pub fn parse_scheduled_downtime_str(json_str: &str) -> Result<Vec<DowntimeEvent>> {
    let value: Value =
        serde_json::from_str(json_str).context("Failed to parse scheduled downtime JSON")?;

    let rows = find_rows_array(&value)
        .context("Could not find a downtime table (e.g. \"downtime\": [...]) in JSON")?;

    let mut events = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let raw = RawRow::deserialize(row).with_context(|| {
            format!(
                "Downtime row {} must have a non-negative night, a duration and an activity: {}",
                i, row
            )
        })?;
        events.push(DowntimeEvent::from(raw));
    }

    validate_events(&events)?;
    Ok(events)
}

/// Find the array of rows in the JSON payload
fn find_rows_array(payload: &Value) -> Option<&Vec<Value>> {
    if let Some(obj) = payload.as_object() {
        for key in TABLE_KEYS {
            if let Some(arr) = obj.get(*key).and_then(Value::as_array) {
                return Some(arr);
            }
        }
        return None;
    }

    payload.as_array()
}

/// Read the `Downtime(night, duration, activity)` table of a SQLite database
#[cfg(feature = "sqlite-source")]
pub fn parse_scheduled_downtime_db(path: &Path) -> Result<Vec<DowntimeEvent>> {
    use rusqlite::{Connection, OpenFlags};

    if !path.is_file() {
        bail!("Scheduled downtime database not found: {}", path.display());
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open scheduled downtime database: {}", path.display()))?;

    let query = format!(
        "SELECT night, duration, activity FROM {} ORDER BY night",
        SQLITE_TABLE
    );
    let mut stmt = conn.prepare(&query).with_context(|| {
        format!(
            "Database {} has no {}(night, duration, activity) table",
            path.display(),
            SQLITE_TABLE
        )
    })?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .context("Failed to query scheduled downtime rows")?;

    let mut events = Vec::new();
    for (i, row) in rows.enumerate() {
        let (night, duration, activity) =
            row.with_context(|| format!("Failed to read downtime row {}", i))?;
        let night = u32::try_from(night)
            .with_context(|| format!("Downtime row {} has invalid night {}", i, night))?;
        let duration = u32::try_from(duration)
            .with_context(|| format!("Downtime row {} has invalid duration {}", i, duration))?;
        events.push(DowntimeEvent::new(
            night,
            duration,
            DowntimeCategory::Custom(activity),
        ));
    }

    validate_events(&events)?;
    Ok(events)
}

/// Check that rows have positive durations and are sorted without overlap
pub fn validate_events(events: &[DowntimeEvent]) -> Result<()> {
    let mut previous_end: Option<u32> = None;
    for (i, event) in events.iter().enumerate() {
        if event.duration_days == 0 {
            bail!(
                "Downtime row {} ('{}' at night {}) has zero duration",
                i,
                event.category,
                event.start_night
            );
        }
        let Some(end) = event.end_night() else {
            bail!(
                "Downtime row {} (night {}, {} days) ends past the last representable night",
                i,
                event.start_night,
                event.duration_days
            );
        };
        if let Some(prev) = previous_end {
            if event.start_night < prev {
                bail!(
                    "Downtime row {} (night {}) starts before row {} ends (night {})",
                    i,
                    event.start_night,
                    i - 1,
                    prev
                );
            }
        }
        previous_end = Some(end);
    }
    Ok(())
}
