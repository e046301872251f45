//! End-to-end drift reconciliation scenario (spec.md §8 scenario 4).

use glassdome_controller::LabController;
use glassdome_core::{Clock, DesiredState, FakeClock, Resource, ResourceId, ResourceState, ResourceType};
use glassdome_platform::{FakeClient, PlatformClient, PlatformVm};
use glassdome_registry::Registry;
use std::sync::Arc;
use std::time::Duration;

/// Scenario 4: drift auto-fix. A stopped VM with a `Running` desired state
/// gets started on the next controller tick, a `ReconcileComplete` event is
/// published, and the drift clears.
#[tokio::test]
async fn drift_auto_fix_starts_the_vm_and_resolves_drift() {
    let clock = FakeClock::new();
    let registry = Registry::with_clock(clock.clone());
    let client = FakeClient::new("proxmox");
    let controller = LabController::new(registry.clone(), clock.clone(), Duration::from_millis(10), true);
    controller.register_client("default", Arc::new(client.clone()) as Arc<dyn PlatformClient>);

    let id = ResourceId::new("proxmox", None, ResourceType::LabVm, "200").unwrap();
    let mut vm = Resource::new(id, "lab-1-web", 1, clock.utc_now());
    vm.lab_id = Some("lab-1".to_string());
    vm.state = ResourceState::Stopped;
    vm.desired_state = Some(DesiredState::Running);
    registry.register(vm);
    client.seed_vm(PlatformVm::new("200", "lab-1-web", ResourceState::Stopped));

    let events_before = registry.get_recent_events(10, Some("lab-1")).len();

    let report = controller.reconcile_lab("lab-1").await.expect("lab exists");

    assert_eq!(report.vms_checked, 1);
    assert_eq!(report.drifts_detected, 1);
    assert_eq!(report.drifts_fixed, 1);
    assert!(report.is_success());

    assert_eq!(client.get_vm("200").await.unwrap().unwrap().state, ResourceState::Running);
    assert!(registry.get_drifts(Some("lab-1")).is_empty());

    let events_after = registry.get_recent_events(10, Some("lab-1"));
    assert!(events_after.len() > events_before);
    assert!(events_after.iter().any(|e| e.kind == glassdome_core::StateChangeKind::ReconcileComplete));
}
