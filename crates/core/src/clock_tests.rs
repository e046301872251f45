use super::*;

#[test]
fn fake_clock_advances() {
    let clock = FakeClock::new();
    let before = clock.epoch_ms();
    clock.advance(Duration::from_secs(30));
    assert_eq!(clock.epoch_ms(), before + 30_000);
}

#[test]
fn fake_clock_rfc3339_is_well_formed() {
    let clock = FakeClock::new();
    clock.set_epoch_ms(1_700_000_000_000);
    let ts = clock.rfc3339();
    assert!(ts.starts_with("2023-11-14T"));
    assert!(ts.ends_with('Z'));
}
