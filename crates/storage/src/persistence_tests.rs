use super::*;
use crate::strategy::JsonSerializationStrategy;

#[test]
fn file_policy_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("value.json");
    let policy = FilePersistencePolicy;
    let strategy = JsonSerializationStrategy;
    let value = serde_json::json!({"result": 42});

    policy.write_value(&strategy, path.to_str().unwrap(), &value).unwrap();
    let restored = policy.read_value(&strategy, path.to_str().unwrap()).unwrap();

    assert_eq!(restored, value);
}

#[test]
fn file_policy_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deep/value.json");
    let policy = FilePersistencePolicy;
    let strategy = JsonSerializationStrategy;

    policy.write_value(&strategy, path.to_str().unwrap(), &serde_json::json!(1)).unwrap();
    assert!(path.exists());
}

#[test]
fn read_missing_file_is_a_storage_error() {
    let policy = FilePersistencePolicy;
    let strategy = JsonSerializationStrategy;
    let err = policy.read_value(&strategy, "/nonexistent/path/value.json").unwrap_err();
    assert!(matches!(err, StorageError::Read { .. }));
}
