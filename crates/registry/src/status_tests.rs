use super::*;
use glassdome_core::{Resource, ResourceId, ResourceType};
use serde_json::json;

fn resource(platform_id: &str) -> Resource {
    let id = ResourceId::new("proxmox", None, ResourceType::Vm, platform_id).expect("valid id");
    Resource::new(id, platform_id, 1, chrono::Utc::now())
}

#[test]
fn status_counts_resources_by_type() {
    let reg = Registry::new();
    reg.register(resource("1"));
    reg.register(resource("2"));
    let status = reg.status();
    assert_eq!(status.resource_counts.get("vm"), Some(&2));
    assert_eq!(status.total_resources, 2);
}

#[test]
fn status_includes_live_agent_names() {
    let reg = Registry::new();
    reg.agent_heartbeat("proxmox-agent", json!({}));
    let status = reg.status();
    assert_eq!(status.agent_names, vec!["proxmox-agent".to_string()]);
}
