//! Placement-order scenarios: priority tiers, SLA-first sequencing, and
//! bin-packing tiebreaks, verified end to end through the engine.

use chrono::{DateTime, TimeZone, Utc};
use orchestrator_core::{
    engine::ScheduleEngine,
    ids::SequentialIds,
    inputs::{OperatorAvailability, ScheduleOptions, ScheduleRequest, TaskInput},
    types::{Priority, Scope, TimeRange},
};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
}

fn engine() -> ScheduleEngine {
    ScheduleEngine::with_parts(Box::new(SequentialIds::new()), at(7, 0))
}

fn operator(id: &str, from: DateTime<Utc>, until: DateTime<Utc>) -> OperatorAvailability {
    OperatorAvailability {
        operator_id:           id.into(),
        display_name:          id.to_uppercase(),
        available_from:        from,
        available_until:       until,
        baseline_workload_pct: 0.0,
        max_tasks_per_hour:    4,
        scope:                 Scope::tenant("t1"),
    }
}

fn task(id: &str, priority: Priority, minutes: i64, sla: Option<DateTime<Utc>>) -> TaskInput {
    TaskInput {
        task_id:           id.into(),
        description:       format!("task {id}"),
        priority,
        estimated_minutes: minutes,
        sla_deadline:      sla,
        assigned_operator: None,
        scope:             Scope::tenant("t1"),
    }
}

fn request(
    tasks: Vec<TaskInput>,
    operators: Vec<OperatorAvailability>,
    options: ScheduleOptions,
) -> ScheduleRequest {
    ScheduleRequest {
        tasks,
        alerts: Vec::new(),
        operators,
        capacity_windows: Vec::new(),
        time_range: TimeRange { start: at(8, 0), end: at(20, 0) },
        scope: Scope::tenant("t1"),
        options,
    }
}

/// Two equal-duration items, one critical and one low, a single operator
/// with a two-hour window: critical starts at window open, low 30
/// minutes later.
#[test]
fn critical_item_is_placed_before_low() {
    let req = request(
        vec![
            task("low", Priority::Low, 30, None),
            task("crit", Priority::Critical, 30, None),
        ],
        vec![operator("op-a", at(9, 0), at(11, 0))],
        ScheduleOptions::default(),
    );
    let schedule = engine().generate(&req).expect("run");

    assert_eq!(schedule.slots.len(), 2);
    let crit = schedule.slots.iter().find(|s| s.work_item_id == "crit").unwrap();
    let low = schedule.slots.iter().find(|s| s.work_item_id == "low").unwrap();
    assert_eq!(crit.start, at(9, 0));
    assert_eq!(crit.end, at(9, 30));
    assert_eq!(low.start, at(9, 30));
    assert_eq!(low.end, at(10, 0));
}

/// With SLA optimization on, a deadline-bearing low-priority item jumps
/// ahead of a deadline-free critical one.
#[test]
fn sla_optimization_places_deadline_work_first() {
    let opts = ScheduleOptions { optimize_for_sla: true, ..Default::default() };
    let req = request(
        vec![
            task("crit", Priority::Critical, 30, None),
            task("low-sla", Priority::Low, 30, Some(at(16, 0))),
        ],
        vec![operator("op-a", at(9, 0), at(17, 0))],
        opts,
    );
    let schedule = engine().generate(&req).expect("run");

    let first = &schedule.slots[0];
    assert_eq!(first.work_item_id, "low-sla");
    assert_eq!(first.start, at(9, 0));
}

/// With capacity optimization on, equal-priority items pack shortest
/// first.
#[test]
fn capacity_optimization_packs_short_items_first() {
    let opts = ScheduleOptions { optimize_for_capacity: true, ..Default::default() };
    let req = request(
        vec![
            task("long", Priority::Medium, 90, None),
            task("short", Priority::Medium, 15, None),
        ],
        vec![operator("op-a", at(9, 0), at(17, 0))],
        opts,
    );
    let schedule = engine().generate(&req).expect("run");

    assert_eq!(schedule.slots[0].work_item_id, "short");
    assert_eq!(schedule.slots[1].work_item_id, "long");
}

/// Per-operator start times never decrease, and consecutive slots on one
/// operator never overlap.
#[test]
fn operator_clocks_are_monotonic() {
    let req = request(
        vec![
            task("a", Priority::High, 45, None),
            task("b", Priority::High, 30, None),
            task("c", Priority::Medium, 60, None),
            task("d", Priority::Low, 15, None),
        ],
        vec![
            operator("op-a", at(9, 0), at(17, 0)),
            operator("op-b", at(9, 0), at(17, 0)),
        ],
        ScheduleOptions::default(),
    );
    let schedule = engine().generate(&req).expect("run");

    for op in ["op-a", "op-b"] {
        let own: Vec<_> = schedule.slots.iter().filter(|s| s.operator_id == op).collect();
        for pair in own.windows(2) {
            assert!(
                pair[0].start <= pair[1].start,
                "start times went backwards on {op}"
            );
            assert!(
                pair[0].end <= pair[1].start,
                "slots overlap on {op} without a conflict flag"
            );
        }
    }
    assert!(schedule.conflicts.iter().all(|c| {
        c.conflict_type != orchestrator_core::conflict::ConflictType::ScheduleOverlap
    }));
}

/// A pre-assigned operator wins even when scoring would prefer another.
#[test]
fn preassignment_bypasses_scoring() {
    let mut pinned = task("pinned", Priority::Medium, 30, None);
    pinned.assigned_operator = Some("op-b".into());
    let req = request(
        vec![pinned],
        vec![
            operator("op-a", at(9, 0), at(17, 0)),
            operator("op-b", at(9, 0), at(17, 0)),
        ],
        ScheduleOptions::default(),
    );
    let schedule = engine().generate(&req).expect("run");

    assert_eq!(schedule.slots.len(), 1);
    assert_eq!(schedule.slots[0].operator_id, "op-b");
}
