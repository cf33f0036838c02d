//! Conflict detection over a finished slot list.
//!
//! Four independent, non-exclusive checks run unconditionally and their
//! outputs are concatenated — a slot may appear in several conflicts and
//! nothing deduplicates across conflict types:
//! - Operator overload (assigned minutes exceed the availability window)
//! - SLA collision    (slots scheduled past their deadline)
//! - Over-capacity    (individual slot utilization above 90%)
//! - Schedule overlap (same-operator slots with intersecting intervals)

use crate::{
    ids::IdSource,
    inputs::OperatorAvailability,
    schedule::OrchestrationSlot,
    types::{OperatorId, Severity, SlotId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Constants ────────────────────────────────────────────────────────────────

/// Individual slot utilization above this is flagged over-capacity.
const OVER_CAPACITY_THRESHOLD_PCT: f64 = 90.0;

/// One delayed task estimated per 30 minutes of overload excess.
const DELAY_BLOCK_MINUTES: i64 = 30;

/// Fixed SLA-risk scores per conflict type (house rules).
const OVERLOAD_SLA_RISK: u8 = 80;
const SLA_COLLISION_SLA_RISK: u8 = 100;
const OVER_CAPACITY_SLA_RISK: u8 = 60;
const OVERLAP_SLA_RISK: u8 = 50;

// ── Data structures ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictType {
    OverCapacity,
    SlaCollision,
    OperatorOverload,
    ResourceUnavailable,
    ScheduleOverlap,
}

/// Structured blast-radius estimate attached to every conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictImpact {
    pub operators_affected:      Vec<OperatorId>,
    pub estimated_tasks_delayed: u32,
    /// 0–100.
    pub sla_risk_score:          u8,
    pub capacity_overage_pct:    f64,
}

/// One way out of a conflict. Exactly one option per conflict is
/// marked recommended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionOption {
    pub description: String,
    pub recommended: bool,
}

/// A detected structural problem in a finished schedule. Conflicts are
/// part of a successful result — they never fail the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConflict {
    pub conflict_id:    String,
    pub conflict_type:  ConflictType,
    pub severity:       Severity,
    pub affected_slots: Vec<SlotId>,
    pub description:    String,
    pub impact:         ConflictImpact,
    pub resolutions:    Vec<ResolutionOption>,
    pub detected_at:    DateTime<Utc>,
}

// ── Detection ────────────────────────────────────────────────────────────────

/// Run all four checks and concatenate their findings.
pub fn detect_conflicts(
    slots: &[OrchestrationSlot],
    operators: &[OperatorAvailability],
    ids: &mut dyn IdSource,
    detected_at: DateTime<Utc>,
) -> Vec<OrchestrationConflict> {
    let mut conflicts = Vec::new();
    conflicts.extend(detect_operator_overload(slots, operators, ids, detected_at));
    conflicts.extend(detect_sla_collisions(slots, ids, detected_at));
    conflicts.extend(detect_over_capacity(slots, ids, detected_at));
    conflicts.extend(detect_schedule_overlaps(slots, operators, ids, detected_at));

    for conflict in &conflicts {
        log::warn!(
            "conflict {:?} ({:?}): {}",
            conflict.conflict_type,
            conflict.severity,
            conflict.description
        );
    }
    conflicts
}

/// One critical conflict per operator whose summed slot minutes exceed
/// their availability window.
fn detect_operator_overload(
    slots: &[OrchestrationSlot],
    operators: &[OperatorAvailability],
    ids: &mut dyn IdSource,
    detected_at: DateTime<Utc>,
) -> Vec<OrchestrationConflict> {
    let mut conflicts = Vec::new();

    for operator in operators {
        let own: Vec<&OrchestrationSlot> = slots
            .iter()
            .filter(|s| s.operator_id == operator.operator_id)
            .collect();
        if own.is_empty() {
            continue;
        }

        let assigned: i64 = own.iter().map(|s| s.duration_minutes).sum();
        let available = operator.available_minutes();
        if available <= 0 || assigned <= available {
            continue;
        }

        let excess = assigned - available;
        let utilization = assigned as f64 / available as f64 * 100.0;
        conflicts.push(OrchestrationConflict {
            conflict_id:    ids.next_id("conflict"),
            conflict_type:  ConflictType::OperatorOverload,
            severity:       Severity::Critical,
            affected_slots: own.iter().map(|s| s.slot_id.clone()).collect(),
            description:    format!(
                "Operator {} is assigned {assigned} min against a {available} min window ({utilization:.0}% utilization)",
                operator.display_name
            ),
            impact: ConflictImpact {
                operators_affected:      vec![operator.operator_id.clone()],
                estimated_tasks_delayed: (excess as u64).div_ceil(DELAY_BLOCK_MINUTES as u64) as u32,
                sla_risk_score:          OVERLOAD_SLA_RISK,
                capacity_overage_pct:    utilization - 100.0,
            },
            resolutions: vec![
                ResolutionOption {
                    description: format!(
                        "Redistribute {excess} min of work from {} to other operators",
                        operator.display_name
                    ),
                    recommended: true,
                },
                ResolutionOption {
                    description: format!("Extend {}'s availability window", operator.display_name),
                    recommended: false,
                },
                ResolutionOption {
                    description: "Defer low-priority work to the next scheduling window".into(),
                    recommended: false,
                },
            ],
            detected_at,
        });
    }
    conflicts
}

/// Exactly one critical conflict covering every slot scheduled past its
/// deadline, when any exist.
fn detect_sla_collisions(
    slots: &[OrchestrationSlot],
    ids: &mut dyn IdSource,
    detected_at: DateTime<Utc>,
) -> Vec<OrchestrationConflict> {
    let breached: Vec<&OrchestrationSlot> = slots
        .iter()
        .filter(|s| matches!(s.sla_buffer_minutes, Some(b) if b < 0))
        .collect();
    if breached.is_empty() {
        return Vec::new();
    }

    vec![OrchestrationConflict {
        conflict_id:    ids.next_id("conflict"),
        conflict_type:  ConflictType::SlaCollision,
        severity:       Severity::Critical,
        affected_slots: breached.iter().map(|s| s.slot_id.clone()).collect(),
        description:    format!("{} slot(s) scheduled past their SLA deadline", breached.len()),
        impact: ConflictImpact {
            operators_affected:      distinct_operators(&breached),
            estimated_tasks_delayed: breached.len() as u32,
            sla_risk_score:          SLA_COLLISION_SLA_RISK,
            capacity_overage_pct:    0.0,
        },
        resolutions: vec![
            ResolutionOption {
                description: "Reschedule breached slots ahead of non-deadline work".into(),
                recommended: true,
            },
            ResolutionOption {
                description: "Escalate the affected deadlines with the requesting tenants".into(),
                recommended: false,
            },
        ],
        detected_at,
    }]
}

/// Exactly one high conflict covering every slot whose own utilization
/// exceeds 90%, when any exist.
fn detect_over_capacity(
    slots: &[OrchestrationSlot],
    ids: &mut dyn IdSource,
    detected_at: DateTime<Utc>,
) -> Vec<OrchestrationConflict> {
    let hot: Vec<&OrchestrationSlot> = slots
        .iter()
        .filter(|s| s.capacity_utilization > OVER_CAPACITY_THRESHOLD_PCT)
        .collect();
    if hot.is_empty() {
        return Vec::new();
    }

    let max_overage = hot
        .iter()
        .map(|s| s.capacity_utilization - OVER_CAPACITY_THRESHOLD_PCT)
        .fold(0.0_f64, f64::max);

    vec![OrchestrationConflict {
        conflict_id:    ids.next_id("conflict"),
        conflict_type:  ConflictType::OverCapacity,
        severity:       Severity::High,
        affected_slots: hot.iter().map(|s| s.slot_id.clone()).collect(),
        description:    format!(
            "{} slot(s) assigned above {OVER_CAPACITY_THRESHOLD_PCT:.0}% operator capacity",
            hot.len()
        ),
        impact: ConflictImpact {
            operators_affected:      distinct_operators(&hot),
            estimated_tasks_delayed: 0,
            sla_risk_score:          OVER_CAPACITY_SLA_RISK,
            capacity_overage_pct:    max_overage,
        },
        resolutions: vec![
            ResolutionOption {
                description: "Shift the hottest slots to under-utilized operators".into(),
                recommended: true,
            },
            ResolutionOption {
                description: "Shorten estimated durations where estimates are padded".into(),
                recommended: false,
            },
        ],
        detected_at,
    }]
}

/// One high conflict per same-operator pair of slots with intersecting
/// [start, end) intervals.
fn detect_schedule_overlaps(
    slots: &[OrchestrationSlot],
    operators: &[OperatorAvailability],
    ids: &mut dyn IdSource,
    detected_at: DateTime<Utc>,
) -> Vec<OrchestrationConflict> {
    let mut conflicts = Vec::new();

    for operator in operators {
        let own: Vec<&OrchestrationSlot> = slots
            .iter()
            .filter(|s| s.operator_id == operator.operator_id)
            .collect();

        for i in 0..own.len() {
            for j in (i + 1)..own.len() {
                let (a, b) = (own[i], own[j]);
                if a.start < b.end && b.start < a.end {
                    conflicts.push(OrchestrationConflict {
                        conflict_id:    ids.next_id("conflict"),
                        conflict_type:  ConflictType::ScheduleOverlap,
                        severity:       Severity::High,
                        affected_slots: vec![a.slot_id.clone(), b.slot_id.clone()],
                        description:    format!(
                            "Slots {} and {} overlap on operator {}",
                            a.slot_id, b.slot_id, operator.display_name
                        ),
                        impact: ConflictImpact {
                            operators_affected:      vec![operator.operator_id.clone()],
                            estimated_tasks_delayed: 1,
                            sla_risk_score:          OVERLAP_SLA_RISK,
                            capacity_overage_pct:    0.0,
                        },
                        resolutions: vec![
                            ResolutionOption {
                                description: format!(
                                    "Move slot {} to start after {}",
                                    b.slot_id, a.slot_id
                                ),
                                recommended: true,
                            },
                            ResolutionOption {
                                description: "Reassign one of the pair to another operator".into(),
                                recommended: false,
                            },
                        ],
                        detected_at,
                    });
                }
            }
        }
    }
    conflicts
}

/// Operator ids of the given slots, first-seen order, no duplicates.
fn distinct_operators(slots: &[&OrchestrationSlot]) -> Vec<OperatorId> {
    let mut out: Vec<OperatorId> = Vec::new();
    for slot in slots {
        if !out.contains(&slot.operator_id) {
            out.push(slot.operator_id.clone());
        }
    }
    out
}
