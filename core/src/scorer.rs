//! Operator assignment scoring — the decision kernel of the scheduler.
//!
//! RULE: Scoring is a pure function over an immutable snapshot of the
//! per-operator run state. It never advances a clock or mutates a
//! running total; that separation keeps scoring unit-testable on its
//! own and is what makes a run replayable.
//!
//! All penalty values are fixed house rules, not tunable weights.

use crate::{
    inputs::{CapacityWindowInput, OperatorAvailability, ScheduleOptions},
    slot_builder::OperatorRunState,
    types::{OperatorId, RiskLevel},
    work_item::WorkItem,
};
use chrono::Duration;
use std::collections::HashMap;

// ── House rules ──────────────────────────────────────────────────────────────

pub const BASE_SCORE: f64 = 100.0;

/// Discrete utilization tiers. Exactly one of the two penalties applies.
pub const HEAVY_LOAD_THRESHOLD_PCT: f64 = 80.0;
pub const HEAVY_LOAD_PENALTY: f64 = 40.0;
pub const MODERATE_LOAD_THRESHOLD_PCT: f64 = 60.0;
pub const MODERATE_LOAD_PENALTY: f64 = 20.0;

/// Continuous pull toward the fleet-mean utilization (balance_workload).
pub const BALANCE_WEIGHT: f64 = 0.5;

/// Capacity-window risk penalties (respect_capacity_windows).
/// Low-risk and no-overlap carry no penalty.
pub const CRITICAL_WINDOW_PENALTY: f64 = 50.0;
pub const HIGH_WINDOW_PENALTY: f64 = 30.0;
pub const MEDIUM_WINDOW_PENALTY: f64 = 10.0;

/// An SLA miss effectively disqualifies; a tight buffer only discourages.
pub const SLA_MISS_PENALTY: f64 = 100.0;
pub const SLA_TIGHT_PENALTY: f64 = 20.0;
pub const SLA_TIGHT_BUFFER_MINUTES: i64 = 30;

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Score one eligible operator's run state for one work item. Returns
/// the raw score; values <= 0 mean the operator must not be considered.
/// Tenant eligibility is checked by the caller and assumed to hold here.
pub fn score_operator(
    item: &WorkItem,
    state: &OperatorRunState,
    mean_utilization_pct: f64,
    windows: &[CapacityWindowInput],
    options: &ScheduleOptions,
) -> f64 {
    let mut score = BASE_SCORE;

    if state.utilization_pct > HEAVY_LOAD_THRESHOLD_PCT {
        score -= HEAVY_LOAD_PENALTY;
    } else if state.utilization_pct > MODERATE_LOAD_THRESHOLD_PCT {
        score -= MODERATE_LOAD_PENALTY;
    }

    if options.balance_workload {
        score -= BALANCE_WEIGHT * (state.utilization_pct - mean_utilization_pct).abs();
    }

    let prospective_start = state.current_time;
    let prospective_end = prospective_start + Duration::minutes(item.estimated_minutes);

    if options.respect_capacity_windows {
        let overlapping = windows
            .iter()
            .find(|w| w.overlaps(prospective_start, prospective_end));
        if let Some(window) = overlapping {
            score -= match window.risk_level {
                RiskLevel::Critical => CRITICAL_WINDOW_PENALTY,
                RiskLevel::High     => HIGH_WINDOW_PENALTY,
                RiskLevel::Medium   => MEDIUM_WINDOW_PENALTY,
                RiskLevel::Low      => 0.0,
            };
        }
    }

    if let Some(deadline) = item.sla_deadline {
        if prospective_end > deadline {
            score -= SLA_MISS_PENALTY;
        } else {
            let buffer = (deadline - prospective_end).num_minutes();
            if buffer < SLA_TIGHT_BUFFER_MINUTES {
                score -= SLA_TIGHT_PENALTY;
            }
        }
    }

    score
}

/// Pick the best operator for one work item, or None when nobody
/// scores above zero (the item goes unscheduled).
///
/// - A pre-assigned operator that exists bypasses scoring entirely.
/// - Tenant mismatch is a hard exclusion, never a penalty.
/// - Ties break on input order: the first operator to reach the top
///   score wins.
pub fn select_operator<'a>(
    item: &WorkItem,
    operators: &'a [OperatorAvailability],
    states: &HashMap<OperatorId, OperatorRunState>,
    windows: &[CapacityWindowInput],
    options: &ScheduleOptions,
) -> Option<&'a OperatorAvailability> {
    if let Some(wanted) = &item.preassigned_operator {
        if let Some(operator) = operators.iter().find(|o| &o.operator_id == wanted) {
            return Some(operator);
        }
    }

    let mean_utilization_pct = mean_utilization(operators, states);

    let mut best: Option<(&OperatorAvailability, f64)> = None;
    for operator in operators {
        if !operator.scope.same_tenant(&item.scope) {
            continue;
        }
        let Some(state) = states.get(&operator.operator_id) else {
            continue;
        };

        let score = score_operator(item, state, mean_utilization_pct, windows, options);
        if score <= 0.0 {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((operator, score)),
        }
    }

    best.map(|(operator, _)| operator)
}

/// Mean run-state utilization across all operators, eligible or not.
fn mean_utilization(
    operators: &[OperatorAvailability],
    states: &HashMap<OperatorId, OperatorRunState>,
) -> f64 {
    if operators.is_empty() {
        return 0.0;
    }
    let total: f64 = operators
        .iter()
        .filter_map(|o| states.get(&o.operator_id))
        .map(|s| s.utilization_pct)
        .sum();
    total / operators.len() as f64
}
