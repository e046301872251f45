use super::*;
use chrono::Utc;

#[test]
fn parses_three_segment_id() {
    let id = ResourceId::parse("proxmox:vm:114").unwrap();
    assert_eq!(id.platform, "proxmox");
    assert_eq!(id.instance, None);
    assert_eq!(id.resource_type, ResourceType::Vm);
    assert_eq!(id.platform_id, "114");
}

#[test]
fn parses_four_segment_id_with_instance() {
    let id = ResourceId::parse("proxmox:01:host:pve-a").unwrap();
    assert_eq!(id.instance.as_deref(), Some("01"));
    assert_eq!(id.resource_type, ResourceType::Host);
}

#[test]
fn rejects_wrong_segment_count() {
    assert!(matches!(ResourceId::parse("proxmox:vm"), Err(ResourceIdError::WrongSegmentCount(_))));
    assert!(matches!(
        ResourceId::parse("a:b:c:d:e"),
        Err(ResourceIdError::WrongSegmentCount(_))
    ));
}

#[test]
fn rejects_unknown_type() {
    assert!(matches!(ResourceId::parse("proxmox:widget:1"), Err(ResourceIdError::UnknownType(_))));
}

#[test]
fn rejects_colon_in_platform_id() {
    let err = ResourceId::new("aws", None, ResourceType::Vm, "i-123:bad").unwrap_err();
    assert!(matches!(err, ResourceIdError::IdContainsColon(_)));
}

#[test]
fn display_round_trips_through_parse() {
    let id = ResourceId::new("aws", Some("us-east-1".to_string()), ResourceType::Vm, "i-0abc").unwrap();
    let s = id.to_string();
    assert_eq!(ResourceId::parse(&s).unwrap(), id);
}

#[test]
fn serde_round_trip() {
    let id = ResourceId::parse("proxmox:vm:114").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"proxmox:vm:114\"");
    let back: ResourceId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn resource_json_round_trip_preserves_all_fields() {
    let mut r = Resource::new(ResourceId::parse("proxmox:vm:114").unwrap(), "web-01", 1, Utc::now());
    r.lab_id = Some("lab-7".to_string());
    r.config.insert("cpu".to_string(), "2".to_string());
    r.desired_state = Some(DesiredState::Running);
    r.desired_config.insert("name".to_string(), "web-02".to_string());

    let json = serde_json::to_string(&r).unwrap();
    let back: Resource = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, r.id);
    assert_eq!(back.name, r.name);
    assert_eq!(back.lab_id, r.lab_id);
    assert_eq!(back.config, r.config);
    assert_eq!(back.desired_state, r.desired_state);
    assert_eq!(back.desired_config, r.desired_config);
    assert_eq!(back.tier, r.tier);
}
