use super::*;
use glassdome_core::{Resource, ResourceId, ResourceState, ResourceType};

fn resource(platform_id: &str, ty: ResourceType, lab_id: Option<&str>) -> Resource {
    let id = ResourceId::new("proxmox", None, ty, platform_id).expect("valid id");
    let mut r = Resource::new(id, platform_id, 1, chrono::Utc::now());
    r.lab_id = lab_id.map(str::to_string);
    r
}

#[test]
fn register_then_get_round_trips() {
    let reg = Registry::new();
    reg.register(resource("114", ResourceType::Vm, None));
    let got = reg.get("proxmox:vm:114").unwrap();
    assert_eq!(got.id.platform_id, "114");
}

#[test]
fn register_preserves_created_at_on_update() {
    let reg = Registry::new();
    reg.register(resource("114", ResourceType::Vm, None));
    let first = reg.get("proxmox:vm:114").unwrap();
    reg.register(resource("114", ResourceType::Vm, None));
    let second = reg.get("proxmox:vm:114").unwrap();
    assert_eq!(first.created_at, second.created_at);
}

#[test]
fn delete_removes_from_type_and_lab_indexes() {
    let reg = Registry::new();
    reg.register(resource("114", ResourceType::Vm, Some("lab-1")));
    assert!(reg.delete("proxmox:vm:114"));
    assert!(reg.get("proxmox:vm:114").is_none());
    assert!(reg.list_by_type(ResourceType::Vm).is_empty());
    assert!(reg.list_by_lab("lab-1").is_empty());
}

#[test]
fn delete_missing_resource_returns_false() {
    let reg = Registry::new();
    assert!(!reg.delete("proxmox:vm:999"));
}

#[test]
fn list_by_lab_scopes_to_the_lab() {
    let reg = Registry::new();
    reg.register(resource("1", ResourceType::LabVm, Some("lab-1")));
    reg.register(resource("2", ResourceType::LabVm, Some("lab-2")));
    assert_eq!(reg.list_by_lab("lab-1").len(), 1);
}

#[test]
fn list_by_platform_filters_by_instance() {
    let reg = Registry::new();
    let mut r1 = resource("1", ResourceType::Vm, None);
    r1.id.instance = Some("east".to_string());
    reg.register(r1);
    reg.register(resource("2", ResourceType::Vm, None));
    assert_eq!(reg.list_by_platform("proxmox", Some("east")).len(), 1);
    assert_eq!(reg.list_by_platform("proxmox", None).len(), 2);
}

#[tokio::test]
async fn register_publishes_state_changed_when_state_differs() {
    let reg = Registry::new();
    let mut sub = reg.subscribe_events(None);
    reg.register(resource("114", ResourceType::Vm, None));
    let mut r = resource("114", ResourceType::Vm, None);
    r.state = ResourceState::Running;
    reg.register(r);

    let created = sub.recv().await.expect("created event");
    assert_eq!(created.kind, StateChangeKind::Created);
    let changed = sub.recv().await.expect("state_changed event");
    assert_eq!(changed.kind, StateChangeKind::StateChanged);
}
