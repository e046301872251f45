use super::*;
use crate::resource::{ResourceId, ResourceState};
use chrono::Utc;

fn vm(id: &str, state: ResourceState) -> Resource {
    let mut r = Resource::new(ResourceId::parse(&format!("proxmox:lab_vm:{id}")).unwrap(), id, 1, Utc::now());
    r.state = state;
    r
}

#[test]
fn healthy_when_all_running_and_no_drift() {
    let snap = LabSnapshot::build("lab-1", vec![vm("1", ResourceState::Running), vm("2", ResourceState::Running)], false);
    assert!(snap.healthy());
}

#[test]
fn unhealthy_when_a_vm_is_not_running() {
    let snap = LabSnapshot::build("lab-1", vec![vm("1", ResourceState::Running), vm("2", ResourceState::Stopped)], false);
    assert!(!snap.healthy());
}

#[test]
fn unhealthy_when_drift_active_even_if_all_running() {
    let snap = LabSnapshot::build("lab-1", vec![vm("1", ResourceState::Running)], true);
    assert!(!snap.healthy());
}

#[test]
fn gateway_extracted_by_role_config() {
    let mut gw = vm("gw", ResourceState::Running);
    gw.config.insert("role".to_string(), "gateway".to_string());
    let snap = LabSnapshot::build("lab-1", vec![vm("1", ResourceState::Running), gw.clone()], false);
    assert_eq!(snap.gateway.as_ref().unwrap().id, gw.id);
    assert_eq!(snap.total_vms(), 2);
}

#[test]
fn networks_grouped_separately_from_vms() {
    let net = Resource::new(ResourceId::parse("proxmox:lab_network:n1").unwrap(), "n1", 1, Utc::now());
    let snap = LabSnapshot::build("lab-1", vec![vm("1", ResourceState::Running), net], false);
    assert_eq!(snap.total_vms(), 1);
    assert_eq!(snap.networks.len(), 1);
}
