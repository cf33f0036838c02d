//! The scheduling engine — the single operation this crate exposes.
//!
//! PIPELINE ORDER (fixed, documented, never reordered):
//!   1. Input validation  (eager; the only hard failure mode)
//!   2. Work-item normalizer
//!   3. Work-item sequencer
//!   4. Slot builder      (scorer inside, per item)
//!   5. Conflict detector
//!   6. Recommendation generator
//!   7. Summarizer
//!
//! RULES:
//!   - The output is entirely determined by (request, id source, now).
//!   - No stage performs I/O or reads hidden state.
//!   - Conflicts and recommendations are part of a successful result;
//!     they never short-circuit scheduling.

use crate::{
    conflict,
    error::{OrchestrationError, OrchestrationResult},
    ids::{IdSource, UuidIds},
    inputs::ScheduleRequest,
    recommendation,
    schedule::{OrchestrationSchedule, ScheduleReferences},
    sequencer, slot_builder, summary, work_item,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Provenance string stamped on every slot and schedule this build emits.
const GENERATOR: &str = concat!("orchestrator-core v", env!("CARGO_PKG_VERSION"));

/// One engine instance per integration point. Holds the id source and
/// the run timestamp — the only two inputs allowed to vary between
/// otherwise-identical runs.
pub struct ScheduleEngine {
    ids: Box<dyn IdSource>,
    now: DateTime<Utc>,
}

impl ScheduleEngine {
    /// Production default: UUID ids, current wall clock.
    pub fn new() -> Self {
        Self::with_parts(Box::new(UuidIds), Utc::now())
    }

    /// Fully injected construction. With a sequential id source and a
    /// fixed timestamp, identical requests produce byte-identical
    /// serialized schedules.
    pub fn with_parts(ids: Box<dyn IdSource>, now: DateTime<Utc>) -> Self {
        Self { ids, now }
    }

    /// Run one complete scheduling pass over the request snapshot.
    ///
    /// Never fails on "no operator available" — unplaceable items land
    /// in `unscheduled`. Fails only on malformed input.
    pub fn generate(
        &mut self,
        request: &ScheduleRequest,
    ) -> OrchestrationResult<OrchestrationSchedule> {
        validate(request)?;

        let items = work_item::normalize(&request.tasks, &request.alerts);
        log::info!(
            "scheduling run: {} work item(s), {} operator(s), {} capacity window(s)",
            items.len(),
            request.operators.len(),
            request.capacity_windows.len()
        );

        let items = sequencer::sequence(items, &request.options);

        let outcome = slot_builder::build_slots(
            &items,
            &request.operators,
            &request.capacity_windows,
            &request.options,
            self.ids.as_mut(),
            self.now,
            GENERATOR,
        );

        let conflicts = conflict::detect_conflicts(
            &outcome.slots,
            &request.operators,
            self.ids.as_mut(),
            self.now,
        );

        let recommendations = recommendation::generate_recommendations(
            &outcome.slots,
            &conflicts,
            &request.operators,
            &request.scope,
            self.ids.as_mut(),
        );

        let summary = summary::summarize(&outcome.slots, &request.operators);

        let task_ids: HashSet<&str> = request.tasks.iter().map(|t| t.task_id.as_str()).collect();
        let alert_ids: HashSet<&str> = request.alerts.iter().map(|a| a.alert_id.as_str()).collect();
        let mut references = ScheduleReferences::default();
        for slot in &outcome.slots {
            if task_ids.contains(slot.work_item_id.as_str()) {
                references.tasks_scheduled.push(slot.work_item_id.clone());
            } else if alert_ids.contains(slot.work_item_id.as_str()) {
                references.alerts_scheduled.push(slot.work_item_id.clone());
            }
        }

        log::info!(
            "run complete: {} slot(s), {} unscheduled, {} conflict(s), {} recommendation(s)",
            outcome.slots.len(),
            outcome.unscheduled.len(),
            conflicts.len(),
            recommendations.len()
        );

        Ok(OrchestrationSchedule {
            schedule_id:     self.ids.next_id("schedule"),
            scope:           request.scope.clone(),
            time_range:      request.time_range,
            slots:           outcome.slots,
            conflicts,
            recommendations,
            summary,
            unscheduled:     outcome.unscheduled,
            references,
            generated_at:    self.now,
            generated_by:    GENERATOR.to_string(),
        })
    }
}

impl Default for ScheduleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Eager validation of the request snapshot. A malformed input fails the
/// whole run rather than producing a partially-nonsensical schedule.
fn validate(request: &ScheduleRequest) -> OrchestrationResult<()> {
    if request.time_range.end <= request.time_range.start {
        return Err(OrchestrationError::TimeRangeInverted);
    }
    for operator in &request.operators {
        if operator.available_until <= operator.available_from {
            return Err(OrchestrationError::OperatorWindowInverted {
                operator_id: operator.operator_id.clone(),
            });
        }
    }
    for window in &request.capacity_windows {
        if window.end <= window.start {
            return Err(OrchestrationError::CapacityWindowInverted {
                window_id: window.window_id.clone(),
            });
        }
    }
    for task in &request.tasks {
        if task.estimated_minutes <= 0 {
            return Err(OrchestrationError::NonPositiveDuration {
                item_id: task.task_id.clone(),
                minutes: task.estimated_minutes,
            });
        }
    }
    for alert in &request.alerts {
        if alert.requires_follow_up && alert.estimated_minutes <= 0 {
            return Err(OrchestrationError::NonPositiveDuration {
                item_id: alert.alert_id.clone(),
                minutes: alert.estimated_minutes,
            });
        }
    }
    Ok(())
}
