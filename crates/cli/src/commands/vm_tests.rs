use super::*;
use crate::commands::test_support::entity;

#[test]
fn handle_reports_an_exit_error_for_an_unknown_vm() {
    let (_dir, entity) = entity();
    let err = handle(&entity, "vm-does-not-exist", OutputFormat::Text).unwrap_err();
    let exit_error = err.downcast::<ExitError>().unwrap();
    assert_eq!(exit_error.code, 1);
}
