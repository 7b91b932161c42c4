use chrono::NaiveDate;
use newsdesk::config::NewsdeskConfig;
use newsdesk::error::NewsdeskError;
use newsdesk::model::{Post, PostDraft};
use newsdesk::store::fs_backend::FsBackend;
use newsdesk::store::{DataStore, LocalStore};
use std::fs;
use std::path::Path;

fn store(dir: &Path) -> LocalStore<FsBackend> {
    LocalStore::from_config(FsBackend::new(dir.to_path_buf()), &NewsdeskConfig::default())
}

fn post(id: i64, title: &str) -> Post {
    let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
    Post::from_draft(id, date, PostDraft::new(title).with_summary("s"))
}

#[test]
fn posts_survive_reopening_the_store() {
    let temp = tempfile::tempdir().unwrap();
    let posts = vec![post(1, "One"), post(2, "Two")];

    store(temp.path()).save_posts(&posts).unwrap();

    assert_eq!(store(temp.path()).get_posts(), posts);
    let raw = fs::read_to_string(temp.path().join("clare_journalism_posts.json")).unwrap();
    assert!(raw.contains("\"date\":\"2026-03-05\""));
}

#[test]
fn corrupt_document_reads_as_empty() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("clare_journalism_posts.json"), "{not json").unwrap();
    fs::write(temp.path().join("journalism_uploads.json"), "[]").unwrap();

    let store = store(temp.path());
    assert!(store.get_posts().is_empty());
    assert!(store.get_uploads().is_empty());
}

#[test]
fn quota_rejects_oversized_writes_and_keeps_the_old_document() {
    let temp = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp.path().to_path_buf()).with_quota(400);
    let mut store = LocalStore::from_config(backend, &NewsdeskConfig::default());

    store.save_posts(&[post(1, "Small")]).unwrap();

    let big = post(2, &"x".repeat(1_000));
    let err = store.save_posts(&[post(1, "Small"), big]).unwrap_err();
    assert!(matches!(err, NewsdeskError::QuotaExceeded { quota: 400, .. }));

    let titles: Vec<String> = store.get_posts().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["Small".to_string()]);
}

#[test]
fn writes_leave_no_temp_files_behind() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store(temp.path());
    store.save_posts(&[post(1, "One")]).unwrap();
    store.save_posts(&[post(1, "One"), post(2, "Two")]).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["clare_journalism_posts.json".to_string()]);
}
