use chrono::NaiveDate;
use storage::repository::{ProgressDocument, ProgressRepository, Storage};
use storage::sqlite::SqliteRepository;
use train_core::model::ProgressRecord;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[tokio::test]
async fn sqlite_roundtrip_persists_progress_document() {
    let repo = SqliteRepository::open("sqlite:file:memdb_progress_roundtrip?mode=memory&cache=shared")
        .await
        .expect("open");

    assert!(repo.load_progress().await.unwrap().is_none());

    let mut record = ProgressRecord::new(day(3));
    record.add_stars(11);
    record.advance_daily(55);
    record.record_completion("digit-memory", Some("Completed \"Remember the number\"".into()));
    record.record_completion("ballGame", None);

    let doc = ProgressDocument::from_record(&record);
    repo.save_progress(&doc).await.unwrap();

    let fetched = repo.load_progress().await.unwrap().expect("document stored");
    assert_eq!(fetched, doc);
    assert_eq!(fetched.into_record(), record);
}

#[tokio::test]
async fn sqlite_save_overwrites_in_place() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut record = ProgressRecord::new(day(4));
    repo.save_progress(&ProgressDocument::from_record(&record))
        .await
        .unwrap();
    record.add_stars(3);
    repo.save_progress(&ProgressDocument::from_record(&record))
        .await
        .unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(repo.load_progress().await.unwrap().unwrap().stars, 3);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(versions, 1);
}

#[tokio::test]
async fn storage_bootstrap_uses_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress_bootstrap?mode=memory&cache=shared")
        .await
        .expect("storage");
    let doc = ProgressDocument {
        stars: 2,
        ..ProgressDocument::default()
    };
    storage.progress.save_progress(&doc).await.unwrap();
    assert_eq!(storage.progress.load_progress().await.unwrap(), Some(doc));
}
