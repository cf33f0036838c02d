//! Output types of a scheduling run.
//!
//! RULE: Everything here is append-only. A slot, once emitted by the
//! builder, is never edited — conflict detection and recommendations
//! read the finished slot list and only ever add their own records.

use crate::{
    conflict::OrchestrationConflict,
    recommendation::OrchestrationRecommendation,
    summary::ScheduleSummary,
    types::{OperatorId, Priority, Scope, SlotId, TimeRange, WorkCategory, WorkItemId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One concrete assignment of a work item to an operator and time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationSlot {
    pub slot_id:          SlotId,
    pub work_item_id:     WorkItemId,
    pub description:      String,
    pub category:         WorkCategory,
    pub priority:         Priority,
    pub operator_id:      OperatorId,
    pub operator_name:    String,
    pub start:            DateTime<Utc>,
    pub end:              DateTime<Utc>,
    pub duration_minutes: i64,
    #[serde(default)]
    pub sla_deadline:     Option<DateTime<Utc>>,
    /// Minutes between slot end and the deadline; negative means breached.
    #[serde(default)]
    pub sla_buffer_minutes: Option<i64>,
    /// The operator's capacity utilization at the moment this slot was
    /// assigned, against their whole availability span.
    pub capacity_utilization: f64,
    /// Whether [start, end) overlaps a capacity window of acceptable
    /// (non-critical) risk.
    pub within_capacity_window: bool,
    pub scheduled_at: DateTime<Utc>,
    pub scheduled_by: String,
}

/// Why a work item produced no slot. Never an error — a normal outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UnscheduledReason {
    NoEligibleOperator,
}

/// A work item the run could not place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduledItem {
    pub work_item_id: WorkItemId,
    pub reason:       UnscheduledReason,
}

/// Back-references into the input snapshot: which tasks and alerts
/// actually received a slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleReferences {
    pub tasks_scheduled:  Vec<String>,
    pub alerts_scheduled: Vec<String>,
}

/// The complete result of one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationSchedule {
    pub schedule_id:     String,
    pub scope:           Scope,
    pub time_range:      TimeRange,
    pub slots:           Vec<OrchestrationSlot>,
    pub conflicts:       Vec<OrchestrationConflict>,
    pub recommendations: Vec<OrchestrationRecommendation>,
    pub summary:         ScheduleSummary,
    pub unscheduled:     Vec<UnscheduledItem>,
    pub references:      ScheduleReferences,
    pub generated_at:    DateTime<Utc>,
    pub generated_by:    String,
}
