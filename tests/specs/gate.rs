//! End-to-end request gate scenarios (spec.md §8 scenarios 1-3).

use glassdome_core::{FakeClock, Host, RequestStatus, Vm};
use glassdome_overseer::{GateResult, GlassdomeConfig, OverseerEntity, SystemState};
use std::sync::Arc;

fn entity() -> (tempfile::TempDir, OverseerEntity<FakeClock>) {
    let dir = tempfile::tempdir().unwrap();
    let config = GlassdomeConfig {
        monitor_interval: std::time::Duration::from_secs(30),
        state_sync_interval: std::time::Duration::from_secs(60),
        health_interval: std::time::Duration::from_secs(300),
        max_failures: 3,
        state_file: dir.path().join("state.json"),
        mission_store_dir: dir.path().join("missions"),
    };
    let state = SystemState::new(&config.state_file);
    let entity = OverseerEntity::new(config, state, Arc::new(glassdome_overseer::NoopKnowledgeBase), FakeClock::new()).unwrap();
    (dir, entity)
}

fn params(pairs: &[(&str, serde_json::Value)]) -> glassdome_overseer::Params {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// Scenario 1: happy-path deploy gate.
#[test]
fn happy_path_deploy_gate() {
    let (_dir, entity) = entity();
    entity.add_host_for_test({
        let mut host = Host::new("proxmox", "10.0.0.5");
        host.resources.insert("cpu_available".to_string(), 4);
        host.resources.insert("memory_available_mib".to_string(), 4096);
        host
    });

    let result = entity
        .receive_request(
            "deploy_vm",
            params(&[("platform", serde_json::json!("proxmox")), ("os", serde_json::json!("ubuntu")), ("specs", serde_json::json!({"cores": 2, "memory_mib": 2048}))]),
            "u1",
        )
        .unwrap();

    let request_id = match result {
        GateResult::Approved { request_id, queue_position } => {
            assert_eq!(queue_position, 1);
            request_id
        }
        other => panic!("expected approval, got {other:?}"),
    };

    let request = entity.request(&request_id).expect("request recorded in system state");
    assert_eq!(request.status, RequestStatus::Approved);
}

/// Scenario 2: production protection, then override.
#[test]
fn production_protection_then_force_override() {
    let (_dir, entity) = entity();
    let mut vm = Vm::new("v114", "prod-web", "proxmox");
    vm.is_production = true;
    entity.add_vm_for_test(vm);

    let denied = entity.receive_request("destroy_vm", params(&[("vm_id", serde_json::json!("v114"))]), "u1").unwrap();
    match denied {
        GateResult::Denied { reason, .. } => assert!(reason.contains("production"), "reason was: {reason}"),
        other => panic!("expected denial, got {other:?}"),
    }

    let approved = entity
        .receive_request("destroy_vm", params(&[("vm_id", serde_json::json!("v114")), ("force_production", serde_json::json!(true))]), "u1")
        .unwrap();
    assert!(matches!(approved, GateResult::Approved { .. }));
}

/// Scenario 3: bulk deny above the deploy count ceiling.
#[test]
fn bulk_deploy_above_ceiling_is_denied() {
    let (_dir, entity) = entity();
    let result = entity
        .receive_request("deploy_vm", params(&[("platform", serde_json::json!("proxmox")), ("os", serde_json::json!("ubuntu")), ("count", serde_json::json!(21))]), "u1")
        .unwrap();

    match result {
        GateResult::Denied { reason, .. } => assert!(reason.contains('2') && reason.contains('0'), "reason should mention 20: {reason}"),
        other => panic!("expected denial, got {other:?}"),
    }
}
