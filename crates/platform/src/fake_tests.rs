use super::*;
use glassdome_core::{Classify, ErrorKind};

#[tokio::test]
async fn create_then_get_round_trips() {
    let client = FakeClient::new("proxmox");
    let vm = client.create_vm(&VmSpec::new("lab-1-web", 2, 2048, 20)).await.expect("create");
    let fetched = client.get_vm(&vm.platform_id).await.expect("get").expect("present");
    assert_eq!(fetched.name, "lab-1-web");
    assert_eq!(fetched.state, ResourceState::Running);
}

#[tokio::test]
async fn stop_then_start_flips_state() {
    let client = FakeClient::new("proxmox");
    let vm = client.create_vm(&VmSpec::new("lab-1-db", 1, 1024, 10)).await.expect("create");
    client.stop_vm(&vm.platform_id).await.expect("stop");
    assert_eq!(client.get_vm(&vm.platform_id).await.unwrap().unwrap().state, ResourceState::Stopped);
    client.start_vm(&vm.platform_id).await.expect("start");
    assert_eq!(client.get_vm(&vm.platform_id).await.unwrap().unwrap().state, ResourceState::Running);
}

#[tokio::test]
async fn delete_missing_vm_is_not_an_error() {
    let client = FakeClient::new("proxmox");
    client.delete_vm("does-not-exist").await.expect("idempotent delete");
}

#[tokio::test]
async fn start_missing_vm_is_not_found() {
    let client = FakeClient::new("proxmox");
    let err = client.start_vm("does-not-exist").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn fail_next_applies_once() {
    let client = FakeClient::new("proxmox");
    client.fail_next(PlatformError::Transient("simulated outage".into()));
    assert!(client.test_connection().await.is_err());
    assert!(client.test_connection().await.is_ok());
}
