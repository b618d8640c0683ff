use chrono::{Duration, NaiveDate, NaiveTime};
use feedlog::utils::packed::*;
use feedlog::utils::FixedClock;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_encode_date_boundary() {
    assert_eq!(encode_date(date(2023, 6, 10)), Ok(20230610));
}

#[test]
fn test_decode_date_boundary() {
    assert_eq!(decode_date(20230610), Ok(date(2023, 6, 10)));
}

#[test]
fn test_time_boundary() {
    let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
    assert_eq!(encode_time(time), 905);
    assert_eq!(decode_time(905), Ok(time));
}

#[test]
fn test_decode_date_rejects_month_13() {
    assert_eq!(decode_date(20231332), Err(PackError::InvalidDate(20231332)));
}

#[test]
fn test_decode_date_rejects_day_past_month_end() {
    assert_eq!(decode_date(20230230), Err(PackError::InvalidDate(20230230)));
    assert_eq!(decode_date(20230632), Err(PackError::InvalidDate(20230632)));
    assert_eq!(decode_date(20230431), Err(PackError::InvalidDate(20230431)));
    assert_eq!(decode_date(20230600), Err(PackError::InvalidDate(20230600)));
}

#[test]
fn test_decode_time_rejects_hour_25() {
    assert_eq!(decode_time(2575), Err(PackError::InvalidTime(2575)));
}

#[test]
fn test_decode_time_rejects_minute_60() {
    assert_eq!(decode_time(1260), Err(PackError::InvalidTime(1260)));
    assert_eq!(decode_time(2400), Err(PackError::InvalidTime(2400)));
    assert!(decode_time(2359).is_ok());
    assert!(decode_time(0).is_ok());
}

#[test]
fn test_encode_date_rejects_years_outside_four_digits() {
    assert_eq!(encode_date(date(10000, 1, 1)), Err(PackError::YearOutOfRange(10000)));
    assert_eq!(encode_date(date(-1, 12, 31)), Err(PackError::YearOutOfRange(-1)));
    assert_eq!(encode_date(date(9999, 12, 31)), Ok(99991231));
}

#[test]
fn test_date_round_trip_across_leap_years() {
    let mut day = date(1999, 12, 25);
    let end = date(2001, 3, 5);
    while day <= end {
        let packed = encode_date(day).unwrap();
        assert_eq!(decode_date(packed), Ok(day));
        day += Duration::days(1);
    }
}

#[test]
fn test_time_round_trip_every_minute() {
    for minute_of_day in 0..24 * 60 {
        let time = NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0).unwrap();
        assert_eq!(decode_time(encode_time(time)), Ok(time));
    }
}

#[test]
fn test_encode_date_is_strictly_increasing() {
    let mut previous = encode_date(date(2022, 12, 30)).unwrap();
    let mut day = date(2022, 12, 31);
    while day <= date(2024, 3, 2) {
        let packed = encode_date(day).unwrap();
        assert!(packed > previous, "{} should pack above {}", day, previous);
        previous = packed;
        day += Duration::days(1);
    }
}

#[test]
fn test_encode_time_drops_seconds() {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap();
    assert_eq!(encode_time(time), 2359);
}

#[test]
fn test_clock_encoders_match_explicit_variants() {
    let clock = FixedClock::new(date(2024, 2, 29), NaiveTime::from_hms_opt(6, 7, 8).unwrap());

    assert_eq!(encode_today(&clock), encode_date(date(2024, 2, 29)));
    assert_eq!(encode_today(&clock), Ok(20240229));
    assert_eq!(encode_now(&clock), encode_time(NaiveTime::from_hms_opt(6, 7, 8).unwrap()));
    assert_eq!(encode_now(&clock), 607);
}

#[test]
fn test_packed_wrappers_validate() {
    assert!(PackedDate::try_from(20231332).is_err());
    assert!(PackedTime::try_from(2575).is_err());

    let packed = PackedDate::try_from(20230610).unwrap();
    assert_eq!(packed.date(), date(2023, 6, 10));
    assert_eq!(i32::from(packed), 20230610);

    let time = PackedTime::from(NaiveTime::from_hms_opt(9, 5, 30).unwrap());
    assert_eq!(time.value(), 905);
    assert_eq!(time.to_string(), "09:05");
}

#[test]
fn test_packed_date_value_matches_encode_date() {
    let mut day = date(1999, 12, 25);
    while day < date(2001, 3, 5) {
        let packed = PackedDate::try_from(day).unwrap();
        assert_eq!(packed.value(), encode_date(day).unwrap());
        assert_eq!(i32::from(packed), encode_date(day).unwrap());
        day += Duration::days(1);
    }
    assert_eq!(PackedDate::try_from(date(0, 1, 1)).unwrap().value(), 101);
    assert_eq!(PackedDate::try_from(date(9999, 12, 31)).unwrap().value(), 99_991_231);
}

#[test]
fn test_packed_wrappers_order_chronologically() {
    let earlier = PackedDate::try_from(date(2023, 12, 31)).unwrap();
    let later = PackedDate::try_from(date(2024, 1, 1)).unwrap();
    assert!(earlier < later);
    assert!(earlier.value() < later.value());
}

#[test]
fn test_packed_wrappers_serialize_as_integers() {
    let packed = PackedDate::try_from(20230610).unwrap();
    assert_eq!(serde_json::to_string(&packed).unwrap(), "20230610");

    let parsed: PackedTime = serde_json::from_str("905").unwrap();
    assert_eq!(parsed.value(), 905);

    assert!(serde_json::from_str::<PackedDate>("20231332").is_err());
}
