use feedlog::config::StorageConfig;
use feedlog::repositories::FeedingRepository;
use feedlog::storage::LocalStorage;

#[tokio::test]
async fn test_local_storage_in_memory() {
    let storage = LocalStorage::in_memory().await;
    assert!(storage.is_ok(), "In-memory storage should be created successfully");
}

#[tokio::test]
async fn test_local_storage_file_survives_reopen() {
    use chrono::{NaiveDate, NaiveTime};
    use feedlog::feeding::{Additions, Breast, Feeding};

    let dir = std::env::temp_dir().join("feedlog_test_storage_reopen");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("feedlog.db");

    let config = StorageConfig {
        database_path: Some(path.clone()),
        in_memory: false,
    };

    {
        let storage = LocalStorage::new(&config).await.unwrap();
        let feeding = Feeding::new(
            NaiveDate::from_ymd_opt(2023, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
            Breast::Left,
            Additions::NONE,
        );
        FeedingRepository::insert(storage.connection(), &feeding).await.unwrap();
    }

    assert!(path.exists());
    let reopened = LocalStorage::new(&config).await.unwrap();
    assert_eq!(FeedingRepository::count(reopened.connection()).await.unwrap(), 1);

    drop(reopened);
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_clear_all_data() {
    use chrono::{NaiveDate, NaiveTime};
    use feedlog::feeding::{Additions, Breast, Feeding};

    let storage = LocalStorage::in_memory().await.unwrap();
    let feeding = Feeding::new(
        NaiveDate::from_ymd_opt(2023, 6, 10).unwrap(),
        NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
        Breast::Right,
        Additions::NONE,
    );
    FeedingRepository::insert(storage.connection(), &feeding).await.unwrap();

    storage.clear_all_data().await.unwrap();
    assert_eq!(FeedingRepository::count(storage.connection()).await.unwrap(), 0);
}
