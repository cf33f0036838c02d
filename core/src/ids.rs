//! Deterministic identifier generation.
//!
//! RULE: Nothing in the scheduling pipeline may call a platform clock or
//! RNG to mint identifiers. All ids flow through an injected IdSource, so
//! a run is reproducible whenever the caller wants it to be.

use uuid::Uuid;

/// Source of output entity ids (schedules, slots, conflicts, recommendations).
pub trait IdSource: Send {
    /// Mint the next id with the given kind prefix, e.g. "slot" or "conflict".
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Monotonic counter ids: "slot-000001", "slot-000002", ...
///
/// Used by tests and by any caller that wants byte-identical replays.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { counter: 0 }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{:06}", self.counter)
    }
}

/// Random v4 UUID ids. The production default — ids are explicitly
/// allowed to vary between otherwise-identical runs.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_monotonic_and_prefixed() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id("slot"), "slot-000001");
        assert_eq!(ids.next_id("conflict"), "conflict-000002");
        assert_eq!(ids.next_id("slot"), "slot-000003");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let mut ids = UuidIds;
        let a = ids.next_id("slot");
        let b = ids.next_id("slot");
        assert_ne!(a, b);
        assert!(a.starts_with("slot-"));
    }
}
