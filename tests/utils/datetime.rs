use chrono::{Duration, NaiveDate, NaiveTime};
use feedlog::utils::datetime::*;

#[test]
fn test_date_formatter() {
    let date = NaiveDate::from_ymd_opt(2023, 6, 10).unwrap();
    assert_eq!(date_formatter(), "%d.%m. %Y");
    assert_eq!(date.format(date_formatter()).to_string(), "10.06. 2023");
}

#[test]
fn test_time_formatter() {
    let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
    assert_eq!(time_formatter(), "%H:%M");
    assert_eq!(format_time(time), "09:05");
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("10.06. 2023").is_err());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::minutes(150)), "2:30");
    assert_eq!(format_duration(Duration::minutes(5)), "0:05");
    assert_eq!(format_duration(Duration::seconds(-60)), "0:00");
}

#[test]
fn test_system_clock_is_close_to_now() {
    let now = chrono::Local::now().naive_local();
    let clock_now = SystemClock.now();
    assert!((clock_now - now).num_seconds().abs() < 5);
}

#[test]
fn test_format_with_custom_pattern() {
    let date = NaiveDate::from_ymd_opt(2023, 6, 10).unwrap();
    assert_eq!(format_date_with(date, ISO_DATE_FORMAT), "2023-06-10");
}
