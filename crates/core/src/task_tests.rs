use super::*;

#[test]
fn verb_extracts_suffix_after_dot() {
    let t = Task::new("t1", "m1", "h1", "reaper-linux", "linux.discover");
    assert_eq!(t.verb(), "discover");
}

#[test]
fn with_params_replaces_empty_default() {
    let mut params = HashMap::new();
    params.insert("ip_address".to_string(), Value::String("10.0.0.5".to_string()));
    let t = Task::new("t1", "m1", "h1", "reaper-linux", "linux.discover").with_params(params.clone());
    assert_eq!(t.params, params);
}
