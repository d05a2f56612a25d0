use super::*;

#[test]
fn json_strategy_round_trips_arbitrary_values() {
    let strategy = JsonSerializationStrategy;
    let value = serde_json::json!({"a": 1, "b": [1, 2, 3]});
    let bytes = strategy.serialize(&value).unwrap();
    let restored = strategy.deserialize(&bytes).unwrap();
    assert_eq!(restored, value);
}

#[test]
fn raw_bytes_strategy_round_trips_strings() {
    let strategy = RawBytesSerializationStrategy;
    let value = serde_json::json!("hello world");
    let bytes = strategy.serialize(&value).unwrap();
    assert_eq!(bytes, b"hello world");
    let restored = strategy.deserialize(&bytes).unwrap();
    assert_eq!(restored, value);
}

#[test]
fn raw_bytes_strategy_rejects_non_string_values() {
    let strategy = RawBytesSerializationStrategy;
    let err = strategy.serialize(&serde_json::json!(42)).unwrap_err();
    assert!(err.message.contains("requires a string value"));
}
