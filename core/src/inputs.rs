//! Input snapshots consumed by a scheduling run.
//!
//! RULE: Every type here is read-only to the scheduler. Run-scoped
//! mutable state lives in the slot builder, never on an input. Scope
//! filtering (tenant/facility/federation) happens in the policy layer
//! before these snapshots reach the core.

use crate::types::{OperatorId, Priority, RiskLevel, Scope, TimeRange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending task as materialized by the upstream task tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInput {
    pub task_id:           String,
    pub description:       String,
    pub priority:          Priority,
    pub estimated_minutes: i64,
    #[serde(default)]
    pub sla_deadline:      Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_operator: Option<OperatorId>,
    pub scope:             Scope,
}

/// An alert as materialized by the upstream alerting system.
/// Only alerts with `requires_follow_up` become schedulable work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertInput {
    pub alert_id:           String,
    pub description:        String,
    pub severity:           Priority,
    pub requires_follow_up: bool,
    pub estimated_minutes:  i64,
    #[serde(default)]
    pub sla_deadline:       Option<DateTime<Utc>>,
    pub scope:              Scope,
}

/// One operator's availability as supplied by the operator directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorAvailability {
    pub operator_id:            OperatorId,
    pub display_name:           String,
    /// Availability window [available_from, available_until).
    pub available_from:         DateTime<Utc>,
    pub available_until:        DateTime<Utc>,
    /// Workload carried before this run assigns anything. Seeds the
    /// first scoring round; derived utilization takes over afterwards.
    pub baseline_workload_pct:  f64,
    pub max_tasks_per_hour:     u32,
    pub scope:                  Scope,
}

impl OperatorAvailability {
    /// Total minutes in this operator's availability span.
    /// Utilization percentages are computed against this, never a constant.
    pub fn available_minutes(&self) -> i64 {
        (self.available_until - self.available_from).num_minutes()
    }
}

/// A forecast capacity window supplied by the capacity planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityWindowInput {
    pub window_id:              String,
    pub start:                  DateTime<Utc>,
    pub end:                    DateTime<Utc>,
    pub projected_capacity_pct: f64,
    pub recommended_workload:   u32,
    pub risk_level:             RiskLevel,
    pub scope:                  Scope,
}

impl CapacityWindowInput {
    /// Half-open interval intersection against [start, end).
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

/// Caller-selected behavior switches for one run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScheduleOptions {
    #[serde(default)]
    pub optimize_for_sla:         bool,
    #[serde(default)]
    pub optimize_for_capacity:    bool,
    #[serde(default)]
    pub balance_workload:         bool,
    #[serde(default)]
    pub respect_capacity_windows: bool,
}

/// Everything one scheduling run consumes. The output is a pure
/// function of this snapshot plus the engine's id source and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub tasks:            Vec<TaskInput>,
    pub alerts:           Vec<AlertInput>,
    pub operators:        Vec<OperatorAvailability>,
    pub capacity_windows: Vec<CapacityWindowInput>,
    pub time_range:       TimeRange,
    pub scope:            Scope,
    #[serde(default)]
    pub options:          ScheduleOptions,
}
