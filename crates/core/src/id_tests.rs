use super::*;

crate::define_id! {
    pub struct TestId("tst-");
}

crate::string_id! {
    pub struct TestStringId;
}

#[test]
fn generated_id_has_prefix_and_length() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("tst-"));
    assert_eq!(id.as_str().len(), ID_MAX_LEN);
}

#[test]
fn generated_id_round_trips_through_serde() {
    let id = TestId::new();
    let json = serde_json::to_string(&id).unwrap();
    let back: TestId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}

#[test]
fn string_id_preserves_arbitrary_length() {
    let long = "a".repeat(64);
    let id = TestStringId::from(long.clone());
    assert_eq!(id.as_str(), long.as_str());
}

#[test]
fn short_truncates() {
    assert_eq!(short("hello world", 5), "hello");
    assert_eq!(short("hi", 5), "hi");
}
