use chrono::{Duration, NaiveDate, NaiveTime};
use feedlog::feeding::{Additions, Breast, Feeding};
use feedlog::repositories::FeedingRepository;
use feedlog::storage::LocalStorage;

fn feeding(day: u32, hour: u32, minute: u32, breast: Breast) -> Feeding {
    Feeding::new(
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap(),
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        breast,
        Additions::NONE,
    )
}

#[tokio::test]
async fn test_insert_assigns_id_and_round_trips() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    let mut original = feeding(10, 9, 5, Breast::Both);
    original.additions = Additions::VIGANTOL | Additions::ESPUMISAN;

    let stored = FeedingRepository::insert(conn, &original).await.unwrap();
    assert!(stored.id.is_some());
    assert_eq!(stored.date, original.date);
    assert_eq!(stored.time, original.time);
    assert_eq!(stored.breast, Breast::Both);
    assert_eq!(stored.additions, original.additions);

    let fetched = FeedingRepository::get_by_id(conn, stored.id.unwrap()).await.unwrap();
    assert_eq!(fetched, Some(stored));
}

#[tokio::test]
async fn test_get_by_date_is_latest_first() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    for f in [
        feeding(10, 6, 0, Breast::Left),
        feeding(10, 14, 30, Breast::Right),
        feeding(10, 9, 15, Breast::Left),
        feeding(11, 1, 0, Breast::Right),
    ] {
        FeedingRepository::insert(conn, &f).await.unwrap();
    }

    let day = FeedingRepository::get_by_date(conn, NaiveDate::from_ymd_opt(2023, 6, 10).unwrap())
        .await
        .unwrap();
    let times: Vec<String> = day.iter().map(|f| f.time.format("%H:%M").to_string()).collect();
    assert_eq!(times, vec!["14:30", "09:15", "06:00"]);
}

#[tokio::test]
async fn test_get_last_orders_by_date_then_time() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    assert_eq!(FeedingRepository::get_last(conn).await.unwrap(), None);

    FeedingRepository::insert(conn, &feeding(11, 1, 0, Breast::Right)).await.unwrap();
    FeedingRepository::insert(conn, &feeding(10, 23, 0, Breast::Left)).await.unwrap();

    let last = FeedingRepository::get_last(conn).await.unwrap().unwrap();
    assert_eq!(last.date, NaiveDate::from_ymd_opt(2023, 6, 11).unwrap());
    assert_eq!(last.breast, Breast::Right);
}

#[tokio::test]
async fn test_get_before_excludes_the_day_itself() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    for f in [
        feeding(8, 6, 0, Breast::Left),
        feeding(9, 6, 0, Breast::Left),
        feeding(10, 6, 0, Breast::Left),
    ] {
        FeedingRepository::insert(conn, &f).await.unwrap();
    }

    let before = FeedingRepository::get_before(conn, NaiveDate::from_ymd_opt(2023, 6, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(before.len(), 2);
    assert!(before[0].date < before[1].date);
}

#[tokio::test]
async fn test_insert_many_replaces_matching_ids() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    let stored = FeedingRepository::insert(conn, &feeding(10, 6, 0, Breast::Left)).await.unwrap();

    let mut replacement = feeding(10, 7, 45, Breast::Right);
    replacement.id = stored.id;
    let mut explicit = feeding(10, 12, 0, Breast::Both);
    explicit.id = Some(42);
    let fresh = feeding(10, 18, 0, Breast::Left);

    let written = FeedingRepository::insert_many(conn, &[replacement.clone(), explicit, fresh])
        .await
        .unwrap();
    assert_eq!(written, 3);
    assert_eq!(FeedingRepository::count(conn).await.unwrap(), 3);

    let replaced = FeedingRepository::get_by_id(conn, stored.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(replaced, replacement);
    assert!(FeedingRepository::get_by_id(conn, 42).await.unwrap().is_some());
}

#[tokio::test]
async fn test_insert_many_empty_is_noop() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let written = FeedingRepository::insert_many(storage.connection(), &[]).await.unwrap();
    assert_eq!(written, 0);
}

#[tokio::test]
async fn test_insert_many_failure_stores_nothing() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    let existing = FeedingRepository::insert(conn, &feeding(9, 6, 0, Breast::Left)).await.unwrap();

    let mut with_id = feeding(10, 7, 0, Breast::Right);
    with_id.id = Some(5);
    let fresh = feeding(10, 9, 0, Breast::Both);
    // Five digit years cannot be packed
    let unpackable = Feeding::new(
        NaiveDate::from_ymd_opt(10000, 1, 1).unwrap(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        Breast::Left,
        Additions::NONE,
    );

    let result = FeedingRepository::insert_many(conn, &[with_id, fresh, unpackable]).await;
    assert!(result.is_err());

    assert_eq!(FeedingRepository::count(conn).await.unwrap(), 1);
    assert!(FeedingRepository::get_by_id(conn, 5).await.unwrap().is_none());
    assert_eq!(FeedingRepository::get_all(conn).await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn test_insert_many_large_batch_with_ids() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let feedings: Vec<Feeding> = (0..7_500)
        .map(|i: i32| {
            let mut f = Feeding::new(
                start + Duration::days(i64::from(i / 10)),
                NaiveTime::from_hms_opt((i % 10) as u32 * 2, 15, 0).unwrap(),
                Breast::from_flags(i % 4),
                Additions::from_bits_truncate(i % 8),
            );
            f.id = Some(i + 1);
            f
        })
        .collect();

    let written = FeedingRepository::insert_many(conn, &feedings).await.unwrap();
    assert_eq!(written, 7_500);
    assert_eq!(FeedingRepository::count(conn).await.unwrap(), 7_500);
    assert_eq!(FeedingRepository::get_all(conn).await.unwrap(), feedings);
}

#[tokio::test]
async fn test_delete() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    let stored = FeedingRepository::insert(conn, &feeding(10, 6, 0, Breast::Left)).await.unwrap();
    assert!(FeedingRepository::delete(conn, stored.id.unwrap()).await.unwrap());
    assert!(!FeedingRepository::delete(conn, stored.id.unwrap()).await.unwrap());
}

#[tokio::test]
async fn test_corrupt_row_surfaces_decode_error() {
    use feedlog::entities::feeding;
    use sea_orm::{ActiveModelTrait, ActiveValue};

    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.connection();

    feeding::ActiveModel {
        id: ActiveValue::NotSet,
        date: ActiveValue::Set(20231332),
        time: ActiveValue::Set(905),
        breast: ActiveValue::Set(1),
        additions: ActiveValue::Set(0),
    }
    .insert(conn)
    .await
    .unwrap();

    assert!(FeedingRepository::get_all(conn).await.is_err());
}
