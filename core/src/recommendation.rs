//! Recommendation generation — derived, non-binding suggestions.
//!
//! At most three recommendations come out of a run, each independently
//! gated. Expected benefits are heuristic labels that describe headroom,
//! never measured outcomes.

use crate::{
    conflict::OrchestrationConflict,
    ids::IdSource,
    inputs::OperatorAvailability,
    schedule::OrchestrationSlot,
    types::{Confidence, Priority, Scope, SlotId},
};
use serde::{Deserialize, Serialize};

// ── Constants ────────────────────────────────────────────────────────────────

/// Rebalance fires when the population variance of operator utilization
/// exceeds this (standard deviation > 20 percentage points).
const REBALANCE_VARIANCE_THRESHOLD: f64 = 400.0;

/// ... and at least one operator sits this far above the mean while
/// another sits the same distance below it.
const REBALANCE_SPREAD_POINTS: f64 = 15.0;

/// At most this many low-priority, deadline-free slots are suggested
/// for deferral.
const DEFER_SLOT_LIMIT: usize = 5;

/// Optimize fires when more than this many slots fall outside an
/// acceptable-risk capacity window.
const OUT_OF_WINDOW_SLOT_THRESHOLD: usize = 5;

/// Heuristic benefit labels for the fixed-gain suggestions.
const DEFER_CAPACITY_GAIN_PCT: f64 = 10.0;
const OPTIMIZE_CAPACITY_GAIN_PCT: f64 = 20.0;

// ── Data structures ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    Rebalance,
    Defer,
    Optimize,
    Escalate,
    Redistribute,
}

/// Qualitative improvement estimate. Any subset of the three axes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedBenefit {
    #[serde(default)]
    pub capacity_pct:         Option<f64>,
    #[serde(default)]
    pub sla_pct:              Option<f64>,
    #[serde(default)]
    pub workload_balance_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationRecommendation {
    pub recommendation_id:   String,
    pub recommendation_type: RecommendationType,
    pub scope:               Scope,
    pub description:         String,
    pub rationale:           String,
    pub expected_benefit:    ExpectedBenefit,
    pub suggested_actions:   Vec<String>,
    pub affected_slots:      Vec<SlotId>,
    pub confidence:          Confidence,
}

// ── Generation ───────────────────────────────────────────────────────────────

/// Derive up to three recommendations from the finished schedule.
pub fn generate_recommendations(
    slots: &[OrchestrationSlot],
    conflicts: &[OrchestrationConflict],
    operators: &[OperatorAvailability],
    scope: &Scope,
    ids: &mut dyn IdSource,
) -> Vec<OrchestrationRecommendation> {
    let mut recommendations = Vec::new();
    recommendations.extend(rebalance(slots, operators, scope, ids));
    recommendations.extend(defer(slots, conflicts, scope, ids));
    recommendations.extend(optimize(slots, scope, ids));
    recommendations
}

/// Rebalance: utilization spread across operators is wide enough that
/// moving work from the most-loaded to the least-loaded operator pays.
fn rebalance(
    slots: &[OrchestrationSlot],
    operators: &[OperatorAvailability],
    scope: &Scope,
    ids: &mut dyn IdSource,
) -> Option<OrchestrationRecommendation> {
    // Derived utilization per operator: assigned minutes over the whole
    // availability span, operators with no span excluded.
    let utilizations: Vec<(&OperatorAvailability, f64)> = operators
        .iter()
        .filter(|o| o.available_minutes() > 0)
        .map(|o| {
            let assigned: i64 = slots
                .iter()
                .filter(|s| s.operator_id == o.operator_id)
                .map(|s| s.duration_minutes)
                .sum();
            (o, assigned as f64 / o.available_minutes() as f64 * 100.0)
        })
        .collect();
    if utilizations.len() < 2 {
        return None;
    }

    let n = utilizations.len() as f64;
    let mean = utilizations.iter().map(|(_, u)| u).sum::<f64>() / n;
    let variance = utilizations
        .iter()
        .map(|(_, u)| (u - mean).powi(2))
        .sum::<f64>()
        / n;
    if variance <= REBALANCE_VARIANCE_THRESHOLD {
        return None;
    }

    let over = utilizations
        .iter()
        .filter(|(_, u)| *u > mean + REBALANCE_SPREAD_POINTS)
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    let under = utilizations
        .iter()
        .filter(|(_, u)| *u < mean - REBALANCE_SPREAD_POINTS)
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let affected_slots: Vec<SlotId> = slots
        .iter()
        .filter(|s| s.operator_id == over.0.operator_id)
        .map(|s| s.slot_id.clone())
        .collect();

    Some(OrchestrationRecommendation {
        recommendation_id:   ids.next_id("rec"),
        recommendation_type: RecommendationType::Rebalance,
        scope:               scope.clone(),
        description:         format!(
            "Rebalance workload from {} ({:.0}%) toward {} ({:.0}%)",
            over.0.display_name, over.1, under.0.display_name, under.1
        ),
        rationale: format!(
            "Operator utilization variance is {variance:.0} (mean {mean:.0}%), well beyond an even spread"
        ),
        expected_benefit: ExpectedBenefit {
            workload_balance_pct: Some(((over.1 - under.1) / 2.0).round()),
            ..Default::default()
        },
        suggested_actions: vec![
            format!(
                "Move the latest slots from {} to {}",
                over.0.display_name, under.0.display_name
            ),
            "Re-run scheduling with workload balancing enabled".into(),
        ],
        affected_slots,
        confidence: Confidence::High,
    })
}

/// Defer: conflicts exist and some low-priority, deadline-free slots
/// could make room.
fn defer(
    slots: &[OrchestrationSlot],
    conflicts: &[OrchestrationConflict],
    scope: &Scope,
    ids: &mut dyn IdSource,
) -> Option<OrchestrationRecommendation> {
    if conflicts.is_empty() {
        return None;
    }
    let deferrable: Vec<&OrchestrationSlot> = slots
        .iter()
        .filter(|s| s.priority == Priority::Low && s.sla_deadline.is_none())
        .take(DEFER_SLOT_LIMIT)
        .collect();
    if deferrable.is_empty() {
        return None;
    }

    Some(OrchestrationRecommendation {
        recommendation_id:   ids.next_id("rec"),
        recommendation_type: RecommendationType::Defer,
        scope:               scope.clone(),
        description:         format!(
            "Defer {} low-priority slot(s) without deadlines to relieve the schedule",
            deferrable.len()
        ),
        rationale: format!(
            "{} conflict(s) detected while deferrable low-priority work occupies operator time",
            conflicts.len()
        ),
        expected_benefit: ExpectedBenefit {
            capacity_pct: Some(DEFER_CAPACITY_GAIN_PCT),
            ..Default::default()
        },
        suggested_actions: vec![
            "Move the listed slots to the next scheduling window".into(),
            "Re-run conflict detection after deferral".into(),
        ],
        affected_slots: deferrable.iter().map(|s| s.slot_id.clone()).collect(),
        confidence: Confidence::Medium,
    })
}

/// Optimize: too much work landed outside acceptable-risk capacity
/// windows.
fn optimize(
    slots: &[OrchestrationSlot],
    scope: &Scope,
    ids: &mut dyn IdSource,
) -> Option<OrchestrationRecommendation> {
    let outside: Vec<&OrchestrationSlot> = slots
        .iter()
        .filter(|s| !s.within_capacity_window)
        .collect();
    if outside.len() <= OUT_OF_WINDOW_SLOT_THRESHOLD {
        return None;
    }

    Some(OrchestrationRecommendation {
        recommendation_id:   ids.next_id("rec"),
        recommendation_type: RecommendationType::Optimize,
        scope:               scope.clone(),
        description:         format!(
            "{} slot(s) fall outside acceptable-risk capacity windows",
            outside.len()
        ),
        rationale: "Aligning slots with forecast capacity windows reduces operational risk".into(),
        expected_benefit: ExpectedBenefit {
            capacity_pct: Some(OPTIMIZE_CAPACITY_GAIN_PCT),
            ..Default::default()
        },
        suggested_actions: vec![
            "Re-run scheduling with capacity windows respected".into(),
            "Request updated capacity forecasts for the uncovered spans".into(),
        ],
        affected_slots: outside.iter().map(|s| s.slot_id.clone()).collect(),
        confidence: Confidence::High,
    })
}
