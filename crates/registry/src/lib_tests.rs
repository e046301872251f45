use super::*;
use glassdome_core::{Resource, ResourceId, ResourceType};

pub(crate) fn test_resource(platform_id: &str, ty: ResourceType, lab_id: Option<&str>) -> Resource {
    let id = ResourceId::new("proxmox", None, ty, platform_id).expect("valid id");
    let mut r = Resource::new(id, platform_id, 1, chrono::Utc::now());
    r.lab_id = lab_id.map(str::to_string);
    r
}

#[test]
fn new_registry_has_no_labs_or_resources() {
    let reg = Registry::new();
    assert!(reg.list_labs().is_empty());
    assert_eq!(reg.status().total_resources, 0);
}

#[test]
fn registry_clones_share_state() {
    let reg = Registry::new();
    let clone = reg.clone();
    clone.register(test_resource("114", ResourceType::Vm, None));
    assert!(reg.get("proxmox:vm:114").is_some());
}
