use super::*;

#[test]
fn vm_spec_new_has_no_extras() {
    let spec = VmSpec::new("lab-1-web", 2, 2048, 20);
    assert_eq!(spec.name, "lab-1-web");
    assert!(spec.image.is_none());
    assert!(spec.extra.is_empty());
}

#[test]
fn platform_vm_new_defaults_to_not_a_template() {
    let vm = PlatformVm::new("100", "lab-1-web", ResourceState::Running);
    assert!(!vm.is_template);
    assert!(vm.ip.is_none());
}
