#[cfg(test)]
mod tests {
    use crate::algorithms::SeedSource;
    use crate::core::domain::DowntimeCategory;
    use crate::io::loaders::{
        DowntimeSource, ScheduledDowntime, ScheduledDowntimeData, UnscheduledDowntimeData,
    };
    use crate::models::ModifiedJulianDate;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    fn start() -> ModifiedJulianDate {
        ModifiedJulianDate::new(59853.0)
    }

    /// Helper to create a temp JSON table
    fn create_temp_json_table(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_packaged_table_rows() {
        let mut scheduled = ScheduledDowntime::new();
        scheduled.initialize(None).unwrap();

        assert_eq!(scheduled.len(), 31);
        let rows = scheduled.downtimes();
        assert_eq!(rows[0].start_night, 158);
        assert_eq!(rows[0].duration_days, 7);
        assert_eq!(rows[0].category.label(), "general maintenance");
        assert_eq!(rows[4].start_night, 1103);
        assert_eq!(rows[4].duration_days, 14);
        assert_eq!(rows[4].category.label(), "recoat mirror");
        assert_eq!(rows[30].start_night, 7242);
        assert_eq!(rows[30].duration_days, 7);
    }

    #[test]
    fn test_pop_shrinks_queue() {
        let mut scheduled = ScheduledDowntime::new();
        scheduled.initialize(None).unwrap();
        let total = scheduled.total_downtime();

        let first = scheduled.pop_earliest().unwrap();
        assert_eq!(first.start_night, 158);
        assert_eq!(scheduled.len(), 30);
        assert_eq!(scheduled.total_downtime(), total - 7);
    }

    #[test]
    fn test_downtime_file_reported() {
        let mut scheduled = ScheduledDowntime::new();
        assert!(scheduled.downtime_file().is_none());
        assert!(scheduled.is_empty());

        scheduled.initialize(None).unwrap();
        assert_eq!(
            scheduled.downtime_file(),
            Some(Path::new("scheduled_downtime.json"))
        );
    }

    #[test]
    fn test_alternate_json_table() {
        let file = create_temp_json_table(
            r#"{"downtime": [{"night": 100, "duration": 7, "activity": "something to do"}]}"#,
        );

        let mut scheduled = ScheduledDowntime::new();
        scheduled.initialize(Some(file.path())).unwrap();

        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled.downtime_file(), Some(file.path()));
        let event = scheduled.pop_earliest().unwrap();
        assert_eq!(event.start_night, 100);
        assert_eq!(event.duration_days, 7);
        assert_eq!(
            event.category,
            DowntimeCategory::Custom("something to do".to_string())
        );
        assert!(scheduled.pop_earliest().is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = DowntimeSource::from_path(Path::new("downtime.csv"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Unsupported downtime table format"));

        assert!(DowntimeSource::from_path(Path::new("downtime")).is_err());
    }

    #[test]
    fn test_missing_json_table() {
        let mut scheduled = ScheduledDowntime::new();
        let result = scheduled.initialize(Some(Path::new("/nonexistent/downtime.json")));
        assert!(result.is_err());
        assert!(scheduled.downtime_file().is_none());
    }

    #[test]
    fn test_night0_uses_offset() {
        let data = ScheduledDowntimeData::new(start());
        assert!((data.night0().value() - (59853.0 - 0.34)).abs() < 1e-9);

        let data = ScheduledDowntimeData::new(start()).with_start_of_night_offset(0.0);
        assert_eq!(data.night0(), start());

        let data = UnscheduledDowntimeData::new(start()).with_start_of_night_offset(0.0);
        assert_eq!(data.night0(), start());
    }

    #[test]
    fn test_scheduled_intervals() {
        let data = ScheduledDowntimeData::new(start());
        assert_eq!(data.source(), &DowntimeSource::Packaged);

        let intervals = data.read_data().unwrap();
        assert_eq!(intervals.len(), 31);

        let first = intervals.first().unwrap();
        assert!((first.start.value() - (59853.0 - 0.34 + 158.0)).abs() < 1e-9);
        assert!((first.duration_days() - 7.0).abs() < 1e-9);
        assert_eq!(first.label, "general maintenance");

        let recoat = intervals.get(4).unwrap();
        assert!((recoat.duration_days() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_scheduled_intervals_from_alternate_table() {
        let file = create_temp_json_table(r#"[[100, 7, "something to do"]]"#);
        let data = ScheduledDowntimeData::new(start())
            .with_start_of_night_offset(0.0)
            .with_source_path(file.path())
            .unwrap();

        let intervals = data.read_data().unwrap();
        assert_eq!(intervals.len(), 1);
        let interval = intervals.first().unwrap();
        assert_eq!(interval.start, ModifiedJulianDate::new(59953.0));
        assert_eq!(interval.end, ModifiedJulianDate::new(59960.0));
    }

    #[test]
    fn test_unscheduled_intervals_default_seed() {
        let intervals = UnscheduledDowntimeData::new(start()).make_data().unwrap();
        assert_eq!(intervals.len(), 133);

        let first = intervals.first().unwrap();
        assert!((first.start.value() - (59853.0 - 0.34 + 48.0)).abs() < 1e-9);
        assert!((first.duration_days() - 3.0).abs() < 1e-9);
        assert_eq!(first.label, "intermediate event");
        assert!((intervals.total_days() - 315.0).abs() < 1e-6);
    }

    #[test]
    fn test_unscheduled_intervals_explicit_seed() {
        let intervals = UnscheduledDowntimeData::new(start())
            .with_start_of_night_offset(0.0)
            .with_seed(SeedSource::Explicit(7))
            .with_survey_length(365)
            .make_data()
            .unwrap();

        assert_eq!(intervals.len(), 7);
        let catastrophic = intervals.get(1).unwrap();
        assert_eq!(catastrophic.start, ModifiedJulianDate::new(59853.0 + 155.0));
        assert_eq!(catastrophic.label, "catastrophic event");
    }

    #[cfg(feature = "sqlite-source")]
    #[test]
    fn test_alternate_sqlite_table() {
        use rusqlite::Connection;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alt_downtime.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "CREATE TABLE Downtime(night INTEGER PRIMARY KEY, duration INTEGER, activity TEXT)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO Downtime VALUES(100, 7, 'something to do')",
            [],
        )
        .unwrap();
        drop(conn);

        assert_eq!(
            DowntimeSource::from_path(&path).unwrap(),
            DowntimeSource::Sqlite(path.clone())
        );

        let mut scheduled = ScheduledDowntime::new();
        scheduled.initialize(Some(&path)).unwrap();
        assert_eq!(scheduled.len(), 1);
        let event = scheduled.pop_earliest().unwrap();
        assert_eq!((event.start_night, event.duration_days), (100, 7));
        assert_eq!(event.category.label(), "something to do");
    }

    #[test]
    fn test_source_display() {
        assert_eq!(
            DowntimeSource::Packaged.to_string(),
            "packaged scheduled_downtime.json"
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.json");
        assert_eq!(
            DowntimeSource::Json(path.clone()).to_string(),
            path.display().to_string()
        );
    }
}
