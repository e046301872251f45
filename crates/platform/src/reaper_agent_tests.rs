use super::*;
use glassdome_core::ResultStatus;
use serde_json::json;
use std::collections::HashMap;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
}

fn task(action: &str, params: HashMap<String, Value>) -> Task {
    Task::new("t1", "m1", "host-1", "reaper-linux", action).with_params(params)
}

#[test]
fn discover_without_ip_is_missing_param() {
    let event = LinuxAgent.handle_task(&task("linux.discover", HashMap::new()), now());
    assert_eq!(event.status, ResultStatus::Error);
    assert_eq!(event.error_code.as_deref(), Some("MISSING_PARAM"));
    assert!(!event.retriable);
}

#[test]
fn discover_returns_os_specific_facts() {
    let params = HashMap::from([("ip_address".to_string(), json!("10.0.0.5"))]);
    let event = LinuxAgent.handle_task(&task("linux.discover", params), now());
    assert_eq!(event.status, ResultStatus::Success);
    assert_eq!(event.data.get("kernel"), Some(&json!("5.15.0-generic")));

    let params = HashMap::from([("ip_address".to_string(), json!("10.0.0.6"))]);
    let event = WindowsAgent.handle_task(&Task::new("t2", "m1", "host-2", "reaper-windows", "windows.discover").with_params(params), now());
    assert_eq!(event.data.get("domain"), Some(&json!("WORKGROUP")));
}

#[test]
fn unknown_action_is_unknown_action_code() {
    let event = LinuxAgent.handle_task(&task("linux.reboot", HashMap::new()), now());
    assert_eq!(event.error_code.as_deref(), Some("UNKNOWN_ACTION"));
    assert!(!event.retriable);
}

#[test]
fn baseline_without_playbooks_is_missing_param() {
    let event = LinuxAgent.handle_task(&task("linux.baseline", HashMap::new()), now());
    assert_eq!(event.error_code.as_deref(), Some("MISSING_PARAM"));
}

#[test]
fn baseline_collects_playbook_names() {
    let params = HashMap::from([("playbooks".to_string(), json!([{"name": "baseline_linux"}, {"name": "cve_2021"}]))]);
    let event = LinuxAgent.handle_task(&task("linux.baseline", params), now());
    assert_eq!(event.status, ResultStatus::Success);
    assert_eq!(event.data.get("vulnerabilities_injected"), Some(&json!(["baseline_linux", "cve_2021"])));
}

#[test]
fn inject_vuln_carries_category() {
    let params = HashMap::from([
        ("playbooks".to_string(), json!([{"name": "web_linux"}])),
        ("category".to_string(), json!("web")),
    ]);
    let event = LinuxAgent.handle_task(&task("linux.inject_vuln", params), now());
    assert_eq!(event.data.get("category"), Some(&json!("web")));
}

#[test]
fn verify_vuln_reports_exploitable() {
    let params = HashMap::from([("vuln_name".to_string(), json!("CVE-2021-1234"))]);
    let event = LinuxAgent.handle_task(&task("linux.verify_vuln", params), now());
    assert_eq!(event.data.get("exploitable"), Some(&json!(true)));
}

#[test]
fn mac_agent_reports_its_own_partition() {
    assert_eq!(MacAgent.agent_type(), "reaper-macos");
}
