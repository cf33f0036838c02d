//! Deterministic workload orchestration scheduler.
//!
//! Takes a snapshot of pending work (tasks and follow-up-requiring
//! alerts), available operators, and forecast capacity windows, and
//! produces a time-sliced schedule with detected conflicts and
//! improvement recommendations. Every decision is reproducible from the
//! inputs — no randomness, no history, no I/O.

pub mod conflict;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod recommendation;
pub mod schedule;
pub mod scorer;
pub mod sequencer;
pub mod slot_builder;
pub mod summary;
pub mod types;
pub mod work_item;
