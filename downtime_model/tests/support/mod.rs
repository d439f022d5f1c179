use downtime_model::io::{ScheduledDowntimeData, UnscheduledDowntimeData};
use downtime_model::models::ModifiedJulianDate;
use downtime_model::services::{TargetMap, Telemetry};
use std::path::{Path, PathBuf};

/// Survey start used across the integration tests (2022-10-01).
pub const SURVEY_START: f64 = 59853.0;

/// Telemetry built from the packaged table and the default seed.
pub fn default_telemetry() -> Telemetry {
    let start = ModifiedJulianDate::new(SURVEY_START);
    let mut efd = Telemetry::new();
    efd.insert(
        "scheduled_downtimes".to_string(),
        ScheduledDowntimeData::new(start)
            .read_data()
            .expect("packaged table loads"),
    );
    efd.insert(
        "unscheduled_downtimes".to_string(),
        UnscheduledDowntimeData::new(start)
            .make_data()
            .expect("default sampler runs"),
    );
    efd
}

pub fn target_at(t: ModifiedJulianDate) -> TargetMap {
    let mut target = TargetMap::new();
    target.insert("time".to_string(), t);
    target
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}
