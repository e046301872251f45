//! End-to-end scenario tests, built out alongside each component (see SPEC_FULL.md §8).

#[path = "specs/gate.rs"]
mod gate;
#[path = "specs/drift.rs"]
mod drift;
#[path = "specs/reaper.rs"]
mod reaper;
