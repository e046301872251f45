use super::*;
use chrono::Utc;

#[test]
fn new_request_starts_pending() {
    let r = PendingRequest::new("r1", "deploy_vm", "u1", HashMap::new(), Utc::now());
    assert_eq!(r.status, RequestStatus::Pending);
    assert!(r.denial_reason.is_none());
}

#[test]
fn deny_sets_reason_and_completed_at() {
    let mut r = PendingRequest::new("r1", "destroy_vm", "u1", HashMap::new(), Utc::now());
    let now = Utc::now();
    r.deny("production VM requires force flag", now);
    assert_eq!(r.status, RequestStatus::Denied);
    assert_eq!(r.denial_reason.as_deref(), Some("production VM requires force flag"));
    assert_eq!(r.completed_at, Some(now));
}

#[test]
fn approve_sets_approved_at() {
    let mut r = PendingRequest::new("r1", "start_vm", "u1", HashMap::new(), Utc::now());
    let now = Utc::now();
    r.approve(now);
    assert_eq!(r.status, RequestStatus::Approved);
    assert_eq!(r.approved_at, Some(now));
}
