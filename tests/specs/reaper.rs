//! End-to-end Reaper mission scenarios (spec.md §8 scenarios 5-6).

use glassdome_core::{FakeClock, HostState, MissionState, MissionStatus, ResultEvent, ResultStatus};
use glassdome_reaper::{default_playbook_catalog, EventBus, MissionEngine, MissionStore, TaskQueue, VulnerabilityPlanner};
use std::collections::HashMap;
use std::sync::Arc;

fn one_linux_host(ip: &str) -> HashMap<String, HostState> {
    let mut hosts = HashMap::new();
    hosts.insert("h1".to_string(), HostState::new("h1", "linux", ip));
    hosts
}

/// Scenario 5: Reaper happy path. A discover result reporting an Apache
/// service on port 80 drives discover → baseline → inject_vuln(web), and
/// the mission completes with a non-empty injection list.
#[test]
fn reaper_happy_path_discovers_baselines_and_injects_web_vuln() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MissionStore::new(dir.path()).unwrap());
    let queue = Arc::new(TaskQueue::new());
    let bus = Arc::new(EventBus::new());
    let planner = VulnerabilityPlanner::new(default_playbook_catalog());
    let engine = MissionEngine::new("m-5", store.clone(), queue.clone(), bus, planner, FakeClock::new());

    let state = MissionState::new("m-5", "lab-1", "vuln_injection", one_linux_host("10.0.0.5"), chrono::Utc::now());
    engine.start_mission(state).unwrap();

    let discover_task = queue.try_consume("reaper-linux").expect("discover task scheduled");
    assert_eq!(discover_task.action, "linux.discover");

    let mut discover_result =
        ResultEvent::new(&discover_task.task_id, "m-5", "h1", "reaper-linux", "linux.discover", ResultStatus::Success, "discovered", chrono::Utc::now());
    discover_result.data.insert("services".to_string(), serde_json::json!(["apache"]));
    discover_result.data.insert("open_ports".to_string(), serde_json::json!([80]));
    engine.process_result(discover_result).unwrap();

    let baseline_task = queue.try_consume("reaper-linux").expect("baseline task scheduled");
    assert_eq!(baseline_task.action, "linux.baseline");

    let baseline_result =
        ResultEvent::new(&baseline_task.task_id, "m-5", "h1", "reaper-linux", "linux.baseline", ResultStatus::Success, "baseline applied", chrono::Utc::now());
    engine.process_result(baseline_result).unwrap();

    let inject_task = queue.try_consume("reaper-linux").expect("web inject_vuln task scheduled");
    assert_eq!(inject_task.action, "linux.inject_vuln");
    assert_eq!(inject_task.params.get("category").and_then(|v| v.as_str()), Some("web"));

    let mut inject_result =
        ResultEvent::new(&inject_task.task_id, "m-5", "h1", "reaper-linux", "linux.inject_vuln", ResultStatus::Success, "injected", chrono::Utc::now());
    inject_result.data.insert("vulnerabilities_injected".to_string(), serde_json::json!(["sqli", "xss"]));
    engine.process_result(inject_result).unwrap();

    let mission = store.load("m-5").unwrap().unwrap();
    assert_eq!(mission.status, MissionStatus::Completed);
    assert_eq!(mission.hosts["h1"].vulnerabilities_injected, vec!["sqli", "xss"]);
    assert!(mission.pending_tasks.is_empty());
}

/// Scenario 6: Reaper failure lockout. Three consecutive non-retriable
/// errors on the only host lock it out; with nothing injected and the
/// lockout being the mission's only host, it reaches a terminal state.
#[test]
fn reaper_failure_lockout_locks_host_and_reaches_terminal_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MissionStore::new(dir.path()).unwrap());
    let queue = Arc::new(TaskQueue::new());
    let bus = Arc::new(EventBus::new());
    let engine = MissionEngine::new("m-6", store.clone(), queue, bus, VulnerabilityPlanner::new(default_playbook_catalog()), FakeClock::new());

    let mut state = MissionState::new("m-6", "lab-1", "vuln_injection", one_linux_host("10.0.0.9"), chrono::Utc::now());
    assert_eq!(state.hosts["h1"].max_failures, 3);
    state.pending_tasks = vec!["t-1".to_string(), "t-2".to_string(), "t-3".to_string()];
    store.save(&state).unwrap();

    for task_id in ["t-1", "t-2", "t-3"] {
        let result = ResultEvent::error(task_id, "m-6", "h1", "reaper-linux", "linux.discover", "AGENT_EXCEPTION", "boom", chrono::Utc::now());
        engine.process_result(result).unwrap();
    }

    let mission = store.load("m-6").unwrap().unwrap();
    assert!(mission.hosts["h1"].locked);
    assert!(mission.hosts["h1"].vulnerabilities_injected.is_empty());
    assert!(matches!(mission.status, MissionStatus::Completed | MissionStatus::Failed));
    assert!(mission.pending_tasks.is_empty(), "a locked-out-only-host mission has no further tasks to run");
}
