//! Serde tests for OrderedSequence.

use chainseq::OrderedSequence;
use rstest::rstest;

#[rstest]
fn test_serialize_as_json_array() {
    let sequence: OrderedSequence<i32> = [3, 1, 2].into();
    let json = serde_json::to_string(&sequence).unwrap();
    assert_eq!(json, "[3,1,2]");
}

#[rstest]
fn test_serialize_follows_link_order() {
    let mut sequence: OrderedSequence<i32> = [3, 1, 2].into();
    sequence.sort();
    sequence.insert(0, 0).unwrap();
    let json = serde_json::to_string(&sequence).unwrap();
    assert_eq!(json, "[0,1,2,3]");
}

#[rstest]
fn test_deserialize_from_json_array() {
    let sequence: OrderedSequence<String> = serde_json::from_str(r#"["ka","ri"]"#).unwrap();
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.back().map(String::as_str), Some("ri"));
    assert!(sequence.check_last());
}

#[rstest]
fn test_deserialize_empty() {
    let sequence: OrderedSequence<i32> = serde_json::from_str("[]").unwrap();
    assert!(sequence.is_empty());
}

#[rstest]
fn test_deserialize_rejects_non_sequence() {
    let result: Result<OrderedSequence<i32>, _> = serde_json::from_str("{}");
    assert!(result.is_err());
}
