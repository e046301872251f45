use super::*;
use glassdome_core::{PendingRequest, ResourceSpec, Service, Vm};
use std::collections::HashMap;

fn state() -> (tempfile::TempDir, SystemState) {
    let dir = tempfile::tempdir().unwrap();
    let state = SystemState::new(dir.path().join("state.json"));
    (dir, state)
}

#[test]
fn load_missing_file_starts_empty() {
    let (_dir, state) = state();
    let loaded = SystemState::load(state.path()).unwrap();
    assert!(loaded.vms.is_empty());
}

#[test]
fn add_vm_persists_and_round_trips() {
    let (_dir, mut state) = state();
    let mut vm = Vm::new("v1", "ubuntu-1", "proxmox");
    vm.is_production = true;
    state.add_vm(vm, Utc::now()).unwrap();

    let reloaded = SystemState::load(state.path()).unwrap();
    assert!(reloaded.is_production("v1"));
    assert_eq!(reloaded.vms["v1"].name, "ubuntu-1");
}

#[test]
fn update_vm_applies_closure_and_stamps_last_checked() {
    let (_dir, mut state) = state();
    state.add_vm(Vm::new("v1", "ubuntu-1", "proxmox"), Utc::now()).unwrap();

    let now = Utc::now();
    state.update_vm("v1", now, |vm| vm.status = glassdome_core::VmStatus::Running).unwrap();

    let vm = state.get_vm("v1").unwrap();
    assert_eq!(vm.status, glassdome_core::VmStatus::Running);
    assert_eq!(vm.last_checked, Some(now));
}

#[test]
fn remove_vm_drops_it_from_state() {
    let (_dir, mut state) = state();
    state.add_vm(Vm::new("v1", "ubuntu-1", "proxmox"), Utc::now()).unwrap();
    state.remove_vm("v1", Utc::now()).unwrap();
    assert!(state.get_vm("v1").is_none());
}

#[test]
fn vms_by_platform_and_running_vms_filter_correctly() {
    let (_dir, mut state) = state();
    let mut running = Vm::new("v1", "a", "proxmox");
    running.status = glassdome_core::VmStatus::Running;
    state.add_vm(running, Utc::now()).unwrap();
    state.add_vm(Vm::new("v2", "b", "esxi"), Utc::now()).unwrap();

    assert_eq!(state.vms_by_platform("proxmox").len(), 1);
    assert_eq!(state.running_vms().len(), 1);
}

#[test]
fn has_resources_is_false_for_unknown_host() {
    let (_dir, state) = state();
    let required = ResourceSpec { cpu: Some(2), memory_mib: None, disk_gib: None };
    assert!(!state.has_resources("proxmox", "10.0.0.2", &required));
}

#[test]
fn has_resources_delegates_to_host_predicate() {
    let (_dir, mut state) = state();
    let mut host = Host::new("proxmox", "10.0.0.2");
    host.resources.insert("cpu_available".to_string(), 16);
    state.add_host(host, Utc::now()).unwrap();

    let required = ResourceSpec { cpu: Some(8), memory_mib: None, disk_gib: None };
    assert!(state.has_resources("proxmox", "10.0.0.2", &required));

    let too_much = ResourceSpec { cpu: Some(32), memory_mib: None, disk_gib: None };
    assert!(!state.has_resources("proxmox", "10.0.0.2", &too_much));
}

#[test]
fn services_on_vm_filters_by_vm_id() {
    let (_dir, mut state) = state();
    state.add_service(Service::new("v1", "nginx"), Utc::now()).unwrap();
    state.add_service(Service::new("v2", "sshd"), Utc::now()).unwrap();

    assert_eq!(state.services_on_vm("v1").len(), 1);
}

#[test]
fn request_lifecycle_moves_between_pending_and_approved() {
    let (_dir, mut state) = state();
    let request = PendingRequest::new("req-1", "deploy_vm", "u1", HashMap::new(), Utc::now());
    state.add_request(request, Utc::now()).unwrap();
    assert_eq!(state.pending_requests().len(), 1);

    state.update_request("req-1", Utc::now(), |r| r.approve(Utc::now())).unwrap();
    assert_eq!(state.pending_requests().len(), 0);
    assert_eq!(state.approved_requests().len(), 1);
}

#[test]
fn summary_counts_every_dimension() {
    let (_dir, mut state) = state();
    let mut prod_vm = Vm::new("v1", "a", "proxmox");
    prod_vm.is_production = true;
    prod_vm.status = glassdome_core::VmStatus::Running;
    state.add_vm(prod_vm, Utc::now()).unwrap();

    let mut healthy_host = Host::new("proxmox", "10.0.0.2");
    healthy_host.status = glassdome_core::HostStatus::Healthy;
    state.add_host(healthy_host, Utc::now()).unwrap();

    state.add_request(PendingRequest::new("req-1", "deploy_vm", "u1", HashMap::new(), Utc::now()), Utc::now()).unwrap();

    let summary = state.summary();
    assert_eq!(summary.total_vms, 1);
    assert_eq!(summary.running_vms, 1);
    assert_eq!(summary.production_vms, 1);
    assert_eq!(summary.total_hosts, 1);
    assert_eq!(summary.healthy_hosts, 1);
    assert_eq!(summary.pending_requests, 1);
}
