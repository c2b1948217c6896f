use chrono::NaiveDate;
use demand_forecast::{ForecastError, HistoryLoader};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_history_from_csv_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,quantity,revenue").unwrap();
    writeln!(file, "2024-02-03, 7, 70.5").unwrap();
    writeln!(file, "2024-02-01,5,").unwrap();
    writeln!(file, "2024-02-02,6,60.0").unwrap();
    file.flush().unwrap();

    let history = HistoryLoader::from_csv(file.path()).unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history.quantities(), vec![5.0, 6.0, 7.0]);
    assert_eq!(history.first_date(), Some(date(2024, 2, 1)));
    assert_eq!(history.observations()[0].revenue, None);
    assert_eq!(history.observations()[2].revenue, Some(70.5));
}

#[test]
fn test_revenue_column_is_optional() {
    let csv = "date,quantity\n2024-02-01,5\n2024-02-02,9\n";
    let history = HistoryLoader::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(history.quantities(), vec![5.0, 9.0]);
}

#[test]
fn test_header_only_csv_is_rejected() {
    let result = HistoryLoader::from_reader("date,quantity\n".as_bytes());
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_negative_quantity_is_rejected() {
    let result = HistoryLoader::from_reader("date,quantity\n2024-02-01,-3\n".as_bytes());
    assert!(matches!(result, Err(ForecastError::CsvError(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = HistoryLoader::from_csv(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}
