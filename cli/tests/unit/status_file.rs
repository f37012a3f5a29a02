//! `StatusFile` persistence against a temporary directory.

#![allow(clippy::expect_used)]

use landscape_client_charm::application::StatusStore;
use landscape_client_charm::domain::UnitStatus;
use landscape_client_charm::infra::state::StatusFile;

#[tokio::test]
async fn missing_file_has_no_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StatusFile::with_path(dir.path().join("status.json"));
    assert_eq!(store.current().await.expect("current"), None);
}

#[tokio::test]
async fn set_then_current_returns_latest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StatusFile::with_path(dir.path().join("nested").join("status.json"));

    store
        .set(&UnitStatus::maintenance("Configuring landscape client.."))
        .await
        .expect("set");
    store
        .set(&UnitStatus::active("Client registered!"))
        .await
        .expect("set");

    assert_eq!(
        store.current().await.expect("current"),
        Some(UnitStatus::active("Client registered!"))
    );
    assert!(!dir.path().join("nested").join("status.json.tmp").exists());
}

#[tokio::test]
async fn file_format_is_tagged_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("status.json");
    let store = StatusFile::with_path(path.clone());
    store
        .set(&UnitStatus::blocked("Certificate does not exist!"))
        .await
        .expect("set");

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(value["status"]["kind"], "blocked");
    assert_eq!(value["status"]["message"], "Certificate does not exist!");
    assert!(value["updated_at"].is_string());
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("status.json");
    std::fs::write(&path, "{not json").expect("write");
    assert!(StatusFile::with_path(path).current().await.is_err());
}
