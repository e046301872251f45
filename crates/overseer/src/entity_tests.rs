use super::*;
use glassdome_core::FakeClock;
use serde_json::json;

fn entity() -> (tempfile::TempDir, OverseerEntity<FakeClock>) {
    let dir = tempfile::tempdir().unwrap();
    let config = GlassdomeConfig {
        monitor_interval: std::time::Duration::from_millis(10),
        state_sync_interval: std::time::Duration::from_millis(10),
        health_interval: std::time::Duration::from_millis(10),
        max_failures: 3,
        state_file: dir.path().join("state.json"),
        mission_store_dir: dir.path().join("missions"),
    };
    let state = SystemState::new(&config.state_file);
    let entity = OverseerEntity::new(config, state, Arc::new(NoopKnowledgeBase), FakeClock::new()).unwrap();
    (dir, entity)
}

fn params(pairs: &[(&str, Value)]) -> Params {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn host(entity: &OverseerEntity<FakeClock>, platform: &str, cpu_available: u64) {
    let mut host = glassdome_core::Host::new(platform, "10.0.0.2");
    host.resources.insert("cpu_available".to_string(), cpu_available);
    entity.state.lock().add_host(host, entity.clock.utc_now()).unwrap();
}

#[test]
fn execute_deploy_vm_reads_is_production_from_params() {
    let (_dir, entity) = entity();

    let result = entity.execute_deploy_vm(&params(&[("platform", json!("proxmox")), ("is_production", json!(true))])).unwrap();
    let vm_id = result["vm_id"].as_str().unwrap();

    let state = entity.state.lock();
    assert!(state.get_vm(vm_id).unwrap().is_production);
}

#[test]
fn execute_deploy_vm_defaults_is_production_to_false() {
    let (_dir, entity) = entity();

    let result = entity.execute_deploy_vm(&params(&[("platform", json!("proxmox"))])).unwrap();
    let vm_id = result["vm_id"].as_str().unwrap();

    let state = entity.state.lock();
    assert!(!state.get_vm(vm_id).unwrap().is_production);
}

#[test]
fn receive_request_approves_a_valid_deploy_and_enqueues_it() {
    let (_dir, entity) = entity();
    host(&entity, "proxmox", 16);

    let result = entity
        .receive_request(
            "deploy_vm",
            params(&[("platform", json!("proxmox")), ("os", json!("ubuntu")), ("specs", json!({"cores": 4}))]),
            "alice",
        )
        .unwrap();

    match result {
        GateResult::Approved { queue_position, .. } => assert_eq!(queue_position, 1),
        other => panic!("expected approval, got {other:?}"),
    }
    assert_eq!(entity.status().stats.requests_approved, 1);
    assert_eq!(entity.status().execution_queue_depth, 1);
}

#[test]
fn receive_request_denies_mass_destruction() {
    let (_dir, entity) = entity();
    let result = entity.receive_request("destroy_vm", params(&[("vm_id", json!("v1")), ("all", json!(true))]), "alice").unwrap();
    assert!(matches!(result, GateResult::Denied { .. }));
    assert_eq!(entity.status().stats.requests_denied, 1);
}

#[test]
fn receive_request_denies_destroying_a_production_vm_without_force() {
    let (_dir, entity) = entity();
    {
        let mut vm = Vm::new("v1", "prod-box", "proxmox");
        vm.is_production = true;
        entity.state.lock().add_vm(vm, entity.clock.utc_now()).unwrap();
    }

    let denied = entity.receive_request("destroy_vm", params(&[("vm_id", json!("v1"))]), "alice").unwrap();
    assert!(matches!(denied, GateResult::Denied { .. }));

    let approved = entity
        .receive_request("destroy_vm", params(&[("vm_id", json!("v1")), ("force_production", json!(true))]), "alice")
        .unwrap();
    assert!(matches!(approved, GateResult::Approved { .. }));
}

#[tokio::test]
async fn execution_loop_completes_an_approved_deploy() {
    let (_dir, entity) = entity();
    host(&entity, "proxmox", 16);
    let entity = Arc::new(entity);

    let GateResult::Approved { request_id, .. } = entity
        .receive_request("deploy_vm", params(&[("platform", json!("proxmox")), ("os", json!("ubuntu"))]), "alice")
        .unwrap()
    else {
        panic!("expected approval");
    };

    let (_tx, rx) = watch::channel(false);
    let worker = entity.clone();
    let handle = tokio::spawn(async move { worker.execution_loop(rx).await });

    for _ in 0..200 {
        if entity.state.lock().get_request(&request_id).unwrap().status == glassdome_core::RequestStatus::Completed {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    entity.execution_active.store(false, Ordering::Relaxed);
    entity.execution_queue.push("__unblock__".to_string());
    let _ = tokio::time::timeout(std::time::Duration::from_secs(1), handle).await;

    let state = entity.state.lock();
    let request = state.get_request(&request_id).unwrap();
    assert_eq!(request.status, glassdome_core::RequestStatus::Completed);
    assert_eq!(state.vms.len(), 1);
}

#[tokio::test]
async fn execution_loop_fails_start_vm_on_missing_vm_without_crashing() {
    let (_dir, entity) = entity();
    let entity = Arc::new(entity);

    let GateResult::Approved { request_id, .. } =
        entity.receive_request("start_vm", params(&[("vm_id", json!("ghost"))]), "alice").unwrap()
    else {
        panic!("expected approval: schema/safety/resources/production all pass for start_vm");
    };

    entity.execute_request(&request_id).await;

    let state = entity.state.lock();
    let request = state.get_request(&request_id).unwrap();
    assert_eq!(request.status, glassdome_core::RequestStatus::Failed);
}

#[tokio::test]
async fn create_reaper_mission_is_idempotent() {
    let (_dir, entity) = entity();
    let targets = vec![TargetHost { host_id: "h1".to_string(), os: "linux".to_string(), ip_address: "10.0.0.5".to_string() }];

    let first = entity.create_reaper_mission("m1", "lab1", "baseline_linux", targets.clone()).unwrap();
    assert_eq!(first, CreateMissionOutcome::Created { mission_id: "m1".to_string(), target_hosts: 1 });

    let second = entity.create_reaper_mission("m1", "lab1", "baseline_linux", targets).unwrap();
    assert_eq!(second, CreateMissionOutcome::AlreadyExists);

    let mission = entity.reaper_mission_status("m1").unwrap().unwrap();
    assert_eq!(mission.status, MissionStatus::Running);
    assert_eq!(entity.list_reaper_missions().unwrap(), vec!["m1".to_string()]);
}

#[tokio::test]
async fn cancel_reaper_mission_marks_it_cancelled() {
    let (_dir, entity) = entity();
    let targets = vec![TargetHost { host_id: "h1".to_string(), os: "linux".to_string(), ip_address: "10.0.0.5".to_string() }];
    entity.create_reaper_mission("m1", "lab1", "baseline_linux", targets).unwrap();

    entity.cancel_reaper_mission("m1").unwrap();

    let mission = entity.reaper_mission_status("m1").unwrap().unwrap();
    assert_eq!(mission.status, MissionStatus::Cancelled);
    assert_eq!(entity.status().reaper_missions_running, 0);
}

#[test]
fn cancel_unknown_mission_is_not_found() {
    let (_dir, entity) = entity();
    let err = entity.cancel_reaper_mission("ghost").unwrap_err();
    assert!(matches!(err, OverseerError::MissionNotFound(id) if id == "ghost"));
}

#[test]
fn monitor_tick_logs_anomalies_without_mutating_state() {
    let (_dir, entity) = entity();
    entity.state.lock().add_vm(Vm::new("v1", "mystery", "proxmox"), entity.clock.utc_now()).unwrap();

    entity.monitor_tick();

    assert_eq!(entity.status().stats.issues_detected, 1);
    assert_eq!(entity.state.lock().get_vm("v1").unwrap().status, VmStatus::Unknown);
}

#[test]
fn shutdown_stops_loops_and_persists_state() {
    let (_dir, entity) = entity();
    entity.state.lock().add_vm(Vm::new("v1", "a", "proxmox"), entity.clock.utc_now()).unwrap();

    entity.shutdown();

    assert!(!entity.status().monitoring_active);
    assert!(!entity.status().execution_active);
    let reloaded = SystemState::load(entity.state.lock().path()).unwrap();
    assert!(reloaded.get_vm("v1").is_some());
}
