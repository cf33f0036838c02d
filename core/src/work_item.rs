//! Work-item normalization — the first pipeline stage.
//!
//! Merges heterogeneous inputs (tasks, follow-up-requiring alerts) into
//! one uniform internal representation. No scope filtering happens here;
//! that is the policy layer's job. No side effects.

use crate::{
    inputs::{AlertInput, TaskInput},
    types::{OperatorId, Priority, Scope, WorkCategory, WorkItemId},
};
use chrono::{DateTime, Utc};

/// A unit of schedulable work. Built fresh each run, never mutated
/// after creation, discarded when the run completes.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub id:                   WorkItemId,
    pub category:             WorkCategory,
    pub priority:             Priority,
    pub description:          String,
    pub estimated_minutes:    i64,
    pub sla_deadline:         Option<DateTime<Utc>>,
    pub preassigned_operator: Option<OperatorId>,
    pub scope:                Scope,
}

/// Normalize tasks and alerts into a single work-item list.
///
/// - Every task becomes exactly one `task-scheduling` item.
/// - An alert is included only when `requires_follow_up` is set,
///   becoming an `alert-follow-up` item with severity reinterpreted
///   as priority.
pub fn normalize(tasks: &[TaskInput], alerts: &[AlertInput]) -> Vec<WorkItem> {
    let mut items = Vec::with_capacity(tasks.len() + alerts.len());

    for task in tasks {
        items.push(WorkItem {
            id:                   task.task_id.clone(),
            category:             WorkCategory::TaskScheduling,
            priority:             task.priority,
            description:          task.description.clone(),
            estimated_minutes:    task.estimated_minutes,
            sla_deadline:         task.sla_deadline,
            preassigned_operator: task.assigned_operator.clone(),
            scope:                task.scope.clone(),
        });
    }

    for alert in alerts {
        if !alert.requires_follow_up {
            continue;
        }
        items.push(WorkItem {
            id:                   alert.alert_id.clone(),
            category:             WorkCategory::AlertFollowUp,
            priority:             alert.severity,
            description:          alert.description.clone(),
            estimated_minutes:    alert.estimated_minutes,
            sla_deadline:         alert.sla_deadline,
            preassigned_operator: None,
            scope:                alert.scope.clone(),
        });
    }

    items
}
