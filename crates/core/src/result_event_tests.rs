use super::*;
use chrono::Utc;

#[test]
fn tail_returns_whole_string_when_under_limit() {
    assert_eq!(tail("short"), "short");
}

#[test]
fn tail_truncates_to_last_500_bytes() {
    let s = "a".repeat(1000);
    let t = tail(&s);
    assert_eq!(t.len(), TAIL_LIMIT);
    assert_eq!(t, "a".repeat(TAIL_LIMIT));
}

#[test]
fn unknown_action_and_missing_param_are_non_retriable() {
    let a = ResultEvent::error("t1", "m1", "h1", "reaper-linux", "linux.frobnicate", "UNKNOWN_ACTION", "bad verb", Utc::now());
    assert!(!a.retriable);
    let b = ResultEvent::error("t1", "m1", "h1", "reaper-linux", "linux.discover", "MISSING_PARAM", "missing ip_address", Utc::now());
    assert!(!b.retriable);
}

#[test]
fn transport_and_exception_codes_are_retriable() {
    for code in ["DISCOVERY_FAILED", "INJECTION_FAILED", "VERIFICATION_FAILED", "AGENT_EXCEPTION"] {
        let e = ResultEvent::error("t1", "m1", "h1", "reaper-linux", "linux.discover", code, "failed", Utc::now());
        assert!(e.retriable, "{code} should be retriable");
    }
}

#[test]
fn with_output_truncates_both_streams() {
    let out = "x".repeat(600);
    let e = ResultEvent::new("t1", "m1", "h1", "reaper-linux", "linux.discover", ResultStatus::Success, "ok", Utc::now())
        .with_output(&out, "");
    assert_eq!(e.stdout_tail.len(), TAIL_LIMIT);
}
