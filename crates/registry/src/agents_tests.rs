use super::*;
use glassdome_core::FakeClock;
use serde_json::json;

#[test]
fn heartbeat_then_get_status_round_trips() {
    let reg = Registry::with_clock(FakeClock::new());
    reg.agent_heartbeat("proxmox-agent", json!({"polled": 12}));
    let status = reg.get_agent_status("proxmox-agent").expect("alive");
    assert_eq!(status.status, json!({"polled": 12}));
}

#[test]
fn heartbeat_expires_after_ttl() {
    let clock = FakeClock::new();
    let reg = Registry::with_clock(clock.clone());
    reg.agent_heartbeat("proxmox-agent", json!({}));
    clock.advance(std::time::Duration::from_secs(HEARTBEAT_TTL_SECS as u64 + 1));
    assert!(reg.get_agent_status("proxmox-agent").is_none());
}

#[test]
fn list_agents_excludes_expired() {
    let clock = FakeClock::new();
    let reg = Registry::with_clock(clock.clone());
    reg.agent_heartbeat("a1", json!({}));
    clock.advance(std::time::Duration::from_secs(60));
    reg.agent_heartbeat("a2", json!({}));
    clock.advance(std::time::Duration::from_secs(90));
    let names: Vec<String> = reg.list_agents().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["a2".to_string()]);
}
