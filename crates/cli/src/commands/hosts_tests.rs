use super::*;
use crate::commands::test_support::entity;
use glassdome_core::Host;

#[test]
fn handle_reports_no_hosts_on_an_empty_state() {
    let (_dir, entity) = entity();
    assert!(handle(&entity, OutputFormat::Text).is_ok());
}

#[test]
fn handle_lists_a_registered_host() {
    let (_dir, entity) = entity();
    entity.add_host_for_test(Host::new("proxmox", "10.0.0.5"));

    let hosts = entity.hosts();
    assert_eq!(hosts.len(), 1);
    assert!(handle(&entity, OutputFormat::Json).is_ok());
}
