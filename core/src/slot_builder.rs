//! Slot building — the greedy packing loop at the center of the scheduler.
//!
//! RULE: Per-operator mutable state lives in a map owned by this call
//! frame and nowhere else. It is built from scratch on every invocation
//! and dropped when the call returns, so concurrent runs can never see
//! each other's cursors.
//!
//! Causal ordering: a slot is emitted from the operator's current state,
//! and only then is the state advanced. That single rule is what makes
//! per-operator start times monotonic.

use crate::{
    ids::IdSource,
    inputs::{CapacityWindowInput, OperatorAvailability, ScheduleOptions},
    schedule::{OrchestrationSlot, UnscheduledItem, UnscheduledReason},
    scorer,
    types::{OperatorId, RiskLevel},
    work_item::WorkItem,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Run-scoped mutable state for one operator. Exactly one instance per
/// operator per run; never pooled or reused across calls.
#[derive(Debug, Clone)]
pub struct OperatorRunState {
    /// Simulated clock: where the next slot for this operator starts.
    pub current_time:    DateTime<Utc>,
    /// Minutes assigned so far this run.
    pub total_minutes:   i64,
    /// Utilization the scorer sees. Starts at the operator's baseline
    /// workload, then tracks the derived value after each assignment.
    pub utilization_pct: f64,
}

impl OperatorRunState {
    pub fn new(operator: &OperatorAvailability) -> Self {
        Self {
            current_time:    operator.available_from,
            total_minutes:   0,
            utilization_pct: operator.baseline_workload_pct,
        }
    }
}

/// What one packing pass produced: the slot list plus every item that
/// found no eligible operator.
#[derive(Debug, Clone, Default)]
pub struct SlotBuildOutcome {
    pub slots:       Vec<OrchestrationSlot>,
    pub unscheduled: Vec<UnscheduledItem>,
}

/// Place sequenced work items one by one, advancing each operator's
/// simulated clock as slots are assigned. Items the scorer rejects are
/// recorded as unscheduled, never silently dropped.
pub fn build_slots(
    items: &[WorkItem],
    operators: &[OperatorAvailability],
    windows: &[CapacityWindowInput],
    options: &ScheduleOptions,
    ids: &mut dyn IdSource,
    scheduled_at: DateTime<Utc>,
    scheduled_by: &str,
) -> SlotBuildOutcome {
    let mut states: HashMap<OperatorId, OperatorRunState> = operators
        .iter()
        .map(|o| (o.operator_id.clone(), OperatorRunState::new(o)))
        .collect();

    let mut outcome = SlotBuildOutcome::default();

    for item in items {
        let Some(operator) = scorer::select_operator(item, operators, &states, windows, options)
        else {
            log::debug!("work item {} has no eligible operator, skipping", item.id);
            outcome.unscheduled.push(UnscheduledItem {
                work_item_id: item.id.clone(),
                reason:       UnscheduledReason::NoEligibleOperator,
            });
            continue;
        };

        // Read the state snapshot, emit the slot, and only then advance.
        let state = states
            .get_mut(&operator.operator_id)
            .expect("run state exists for every operator");

        let start = state.current_time;
        let end = start + Duration::minutes(item.estimated_minutes);

        let within_capacity_window = windows
            .iter()
            .any(|w| w.risk_level != RiskLevel::Critical && w.overlaps(start, end));

        let available = operator.available_minutes();
        let capacity_utilization = if available > 0 {
            (state.total_minutes + item.estimated_minutes) as f64 / available as f64 * 100.0
        } else {
            0.0
        };

        let sla_buffer_minutes = item.sla_deadline.map(|d| (d - end).num_minutes());

        outcome.slots.push(OrchestrationSlot {
            slot_id:                ids.next_id("slot"),
            work_item_id:           item.id.clone(),
            description:            item.description.clone(),
            category:               item.category,
            priority:               item.priority,
            operator_id:            operator.operator_id.clone(),
            operator_name:          operator.display_name.clone(),
            start,
            end,
            duration_minutes:       item.estimated_minutes,
            sla_deadline:           item.sla_deadline,
            sla_buffer_minutes,
            capacity_utilization,
            within_capacity_window,
            scheduled_at,
            scheduled_by:           scheduled_by.to_string(),
        });

        state.current_time = end;
        state.total_minutes += item.estimated_minutes;
        state.utilization_pct = capacity_utilization;

        log::debug!(
            "placed {} on {} at {} ({} min, utilization {:.1}%)",
            item.id,
            operator.operator_id,
            start,
            item.estimated_minutes,
            capacity_utilization
        );
    }

    outcome
}
