//! Two engines, identical inputs, injected ids and timestamp.
//! They must produce byte-identical serialized schedules.
//! Any divergence means hidden state leaked into the pipeline.

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

fn operator(id: &str) -> OperatorAvailability {
    OperatorAvailability {
        operator_id:           id.into(),
        display_name:          id.to_uppercase(),
        available_from:        at(9, 0),
        available_until:       at(17, 0),
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

fn request(options: ScheduleOptions) -> ScheduleRequest {
    ScheduleRequest {
        tasks: vec![
            task("t-1", Priority::Medium, 45, None),
            task("t-2", Priority::Critical, 30, None),
            task("t-3", Priority::Low, 60, Some(at(16, 0))),
            task("t-4", Priority::High, 15, Some(at(10, 0))),
        ],
        alerts:           Vec::new(),
        operators:        vec![operator("op-a"), operator("op-b")],
        capacity_windows: Vec::new(),
        time_range:       TimeRange { start: at(8, 0), end: at(18, 0) },
        scope:            Scope::tenant("t1"),
        options,
    }
}

#[test]
fn identical_inputs_produce_identical_schedules() {
    let req = request(ScheduleOptions::default());

    let a = engine().generate(&req).expect("run a");
    let b = engine().generate(&req).expect("run b");

    let json_a = serde_json::to_string(&a).expect("serialize a");
    let json_b = serde_json::to_string(&b).expect("serialize b");
    assert_eq!(json_a, json_b, "schedules diverged with identical inputs");
}

#[test]
fn repeated_runs_on_one_engine_only_differ_in_ids() {
    let req = request(ScheduleOptions::default());
    let mut engine = engine();

    let a = engine.generate(&req).expect("run a");
    let b = engine.generate(&req).expect("run b");

    // Same shape and same placements; the id counter keeps climbing.
    assert_ne!(a.schedule_id, b.schedule_id);
    assert_eq!(a.slots.len(), b.slots.len());
    for (sa, sb) in a.slots.iter().zip(b.slots.iter()) {
        assert_eq!(sa.work_item_id, sb.work_item_id);
        assert_eq!(sa.operator_id, sb.operator_id);
        assert_eq!(sa.start, sb.start);
        assert_eq!(sa.end, sb.end);
    }
}

#[test]
fn option_flags_are_observable_in_the_output() {
    let plain = engine()
        .generate(&request(ScheduleOptions::default()))
        .expect("plain run");
    let sla = engine()
        .generate(&request(ScheduleOptions { optimize_for_sla: true, ..Default::default() }))
        .expect("sla run");

    let order = |s: &orchestrator_core::schedule::OrchestrationSchedule| -> Vec<String> {
        s.slots.iter().map(|x| x.work_item_id.clone()).collect()
    };
    assert_ne!(
        order(&plain),
        order(&sla),
        "optimize_for_sla changed nothing — the option is not being used"
    );
}
