//! Eager input validation: malformed input fails the whole run with a
//! descriptive error instead of producing a half-nonsensical schedule.

use chrono::{DateTime, TimeZone, Utc};
use orchestrator_core::{
    engine::ScheduleEngine,
    error::OrchestrationError,
    ids::SequentialIds,
    inputs::{
        AlertInput, CapacityWindowInput, OperatorAvailability, ScheduleOptions, ScheduleRequest,
        TaskInput,
    },
    types::{Priority, RiskLevel, Scope, TimeRange},
};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
}

fn engine() -> ScheduleEngine {
    ScheduleEngine::with_parts(Box::new(SequentialIds::new()), at(7, 0))
}

fn base_request() -> ScheduleRequest {
    ScheduleRequest {
        tasks: vec![TaskInput {
            task_id:           "t-1".into(),
            description:       "task".into(),
            priority:          Priority::Medium,
            estimated_minutes: 30,
            sla_deadline:      None,
            assigned_operator: None,
            scope:             Scope::tenant("t1"),
        }],
        alerts:           Vec::new(),
        operators:        vec![OperatorAvailability {
            operator_id:           "op-a".into(),
            display_name:          "OP-A".into(),
            available_from:        at(9, 0),
            available_until:       at(17, 0),
            baseline_workload_pct: 0.0,
            max_tasks_per_hour:    4,
            scope:                 Scope::tenant("t1"),
        }],
        capacity_windows: Vec::new(),
        time_range:       TimeRange { start: at(8, 0), end: at(18, 0) },
        scope:            Scope::tenant("t1"),
        options:          ScheduleOptions::default(),
    }
}

#[test]
fn inverted_operator_window_fails() {
    let mut req = base_request();
    req.operators[0].available_from = at(17, 0);
    req.operators[0].available_until = at(9, 0);

    let err = engine().generate(&req).unwrap_err();
    assert!(matches!(
        err,
        OrchestrationError::OperatorWindowInverted { ref operator_id } if operator_id == "op-a"
    ));
}

#[test]
fn non_positive_task_duration_fails() {
    let mut req = base_request();
    req.tasks[0].estimated_minutes = 0;

    let err = engine().generate(&req).unwrap_err();
    assert!(matches!(
        err,
        OrchestrationError::NonPositiveDuration { ref item_id, minutes: 0 } if item_id == "t-1"
    ));
}

#[test]
fn inverted_time_range_fails() {
    let mut req = base_request();
    req.time_range = TimeRange { start: at(18, 0), end: at(8, 0) };

    let err = engine().generate(&req).unwrap_err();
    assert!(matches!(err, OrchestrationError::TimeRangeInverted));
}

#[test]
fn inverted_capacity_window_fails() {
    let mut req = base_request();
    req.capacity_windows.push(CapacityWindowInput {
        window_id:              "w-1".into(),
        start:                  at(12, 0),
        end:                    at(10, 0),
        projected_capacity_pct: 80.0,
        recommended_workload:   5,
        risk_level:             RiskLevel::Medium,
        scope:                  Scope::tenant("t1"),
    });

    let err = engine().generate(&req).unwrap_err();
    assert!(matches!(
        err,
        OrchestrationError::CapacityWindowInverted { ref window_id } if window_id == "w-1"
    ));
}

/// A zero-duration alert that needs no follow-up never enters the run,
/// so it must not fail validation either.
#[test]
fn ignored_alert_duration_is_not_validated() {
    let mut req = base_request();
    req.alerts.push(AlertInput {
        alert_id:           "al-1".into(),
        description:        "informational".into(),
        severity:           Priority::Low,
        requires_follow_up: false,
        estimated_minutes:  0,
        sla_deadline:       None,
        scope:              Scope::tenant("t1"),
    });

    let schedule = engine().generate(&req).expect("run");
    assert_eq!(schedule.slots.len(), 1);
}

#[test]
fn follow_up_alert_with_bad_duration_fails() {
    let mut req = base_request();
    req.alerts.push(AlertInput {
        alert_id:           "al-1".into(),
        description:        "needs work".into(),
        severity:           Priority::High,
        requires_follow_up: true,
        estimated_minutes:  -10,
        sla_deadline:       None,
        scope:              Scope::tenant("t1"),
    });

    let err = engine().generate(&req).unwrap_err();
    assert!(matches!(
        err,
        OrchestrationError::NonPositiveDuration { ref item_id, minutes: -10 } if item_id == "al-1"
    ));
}
