//! Shared primitive types used across the entire scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stable, unique identifier for an operator.
pub type OperatorId = String;

/// A stable, unique identifier for a work item (task or alert follow-up).
pub type WorkItemId = String;

/// A stable, unique identifier for an emitted slot.
pub type SlotId = String;

/// The fixed work-item category enumeration.
/// Variants are added per integration — never removed or reordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum WorkCategory {
    TaskScheduling,
    AlertFollowUp,
    AuditRemediation,
    DriftRemediation,
    GovernanceIssue,
    DocumentationCompleteness,
    SimulationMismatch,
    CapacityAlignedWorkload,
}

impl WorkCategory {
    /// The stable wire spelling, also used as the rollup key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskScheduling            => "task-scheduling",
            Self::AlertFollowUp             => "alert-follow-up",
            Self::AuditRemediation          => "audit-remediation",
            Self::DriftRemediation          => "drift-remediation",
            Self::GovernanceIssue           => "governance-issue",
            Self::DocumentationCompleteness => "documentation-completeness",
            Self::SimulationMismatch        => "simulation-mismatch",
            Self::CapacityAlignedWorkload   => "capacity-aligned-workload",
        }
    }
}

/// Work-item priority tier. critical outranks high outranks medium outranks low.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Fixed sort rank: critical(0) < high(1) < medium(2) < low(3).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High     => 1,
            Self::Medium   => 2,
            Self::Low      => 3,
        }
    }
}

/// Risk level of a capacity window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Severity of a detected conflict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Confidence label attached to a recommendation. Reflects how much
/// headroom drove the suggestion, not a statistical measure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// The tenant/facility/federation triple used for isolation.
///
/// The core only ever compares `tenant_id` — facility and federation
/// filtering belong to the policy layer, which runs before us.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scope {
    pub tenant_id:     String,
    pub facility_id:   Option<String>,
    pub federation_id: Option<String>,
}

impl Scope {
    pub fn tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id:     tenant_id.into(),
            facility_id:   None,
            federation_id: None,
        }
    }

    /// Hard isolation check: same tenant or not.
    pub fn same_tenant(&self, other: &Scope) -> bool {
        self.tenant_id == other.tenant_id
    }
}

/// The half-open time range [start, end) one scheduling run covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end:   DateTime<Utc>,
}
