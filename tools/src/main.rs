//! schedule-runner: headless scheduling runner.
//!
//! Usage:
//!   schedule-runner --scenario scenario.json
//!   schedule-runner --scenario scenario.json --out schedule.json --seq-ids
//!
//! Without --scenario a small built-in demo scenario is used.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use orchestrator_core::{
    engine::ScheduleEngine,
    ids::{IdSource, SequentialIds, UuidIds},
    inputs::{
        AlertInput, CapacityWindowInput, OperatorAvailability, ScheduleOptions, ScheduleRequest,
        TaskInput,
    },
    schedule::OrchestrationSchedule,
    types::{Priority, RiskLevel, Scope, TimeRange},
};
use std::env;
use std::fs;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let scenario_path = flag_value(&args, "--scenario");
    let out_path = flag_value(&args, "--out");
    let seq_ids = args.iter().any(|a| a == "--seq-ids");

    let request: ScheduleRequest = match scenario_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading scenario file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing scenario file {path}"))?
        }
        None => {
            println!("(no --scenario given, using the built-in demo scenario)");
            demo_scenario()
        }
    };

    let ids: Box<dyn IdSource> = if seq_ids {
        Box::new(SequentialIds::new())
    } else {
        Box::new(UuidIds)
    };
    let mut engine = ScheduleEngine::with_parts(ids, Utc::now());
    let schedule = engine.generate(&request)?;

    print_summary(&schedule);

    if let Some(path) = out_path {
        let json = serde_json::to_string_pretty(&schedule)?;
        fs::write(path, json).with_context(|| format!("writing schedule to {path}"))?;
        println!();
        println!("schedule written to {path}");
    }

    Ok(())
}

fn print_summary(schedule: &OrchestrationSchedule) {
    println!("=== SCHEDULE SUMMARY ===");
    println!("  schedule_id:     {}", schedule.schedule_id);
    println!("  tenant:          {}", schedule.scope.tenant_id);
    println!("  slots:           {}", schedule.slots.len());
    println!("  unscheduled:     {}", schedule.unscheduled.len());
    println!("  conflicts:       {}", schedule.conflicts.len());
    println!("  recommendations: {}", schedule.recommendations.len());

    println!();
    println!("=== OPERATORS ===");
    if schedule.summary.operators.is_empty() {
        println!("  (no slots assigned)");
    }
    for (operator_id, s) in &schedule.summary.operators {
        println!(
            "  {operator_id} | {} slot(s) | {} min | {:.1}% utilized | SLA risk {:.0}%",
            s.total_slots,
            s.total_minutes,
            s.utilization_pct,
            s.sla_risk_ratio * 100.0
        );
    }

    if !schedule.conflicts.is_empty() {
        println!();
        println!("=== CONFLICTS ===");
        for c in &schedule.conflicts {
            println!("  [{:?}/{:?}] {}", c.conflict_type, c.severity, c.description);
        }
    }

    if !schedule.recommendations.is_empty() {
        println!();
        println!("=== RECOMMENDATIONS ===");
        for r in &schedule.recommendations {
            println!("  [{:?}/{:?}] {}", r.recommendation_type, r.confidence, r.description);
        }
    }

    if !schedule.unscheduled.is_empty() {
        println!();
        println!("=== UNSCHEDULED ===");
        for u in &schedule.unscheduled {
            println!("  {} ({:?})", u.work_item_id, u.reason);
        }
    }
}

/// A small self-contained scenario: two operators, a mixed bag of work,
/// one risky capacity window. Anchored at the next top of the hour so
/// the output reads naturally.
fn demo_scenario() -> ScheduleRequest {
    let t0 = Utc::now()
        .date_naive()
        .and_hms_opt(9, 0, 0)
        .expect("valid time")
        .and_utc();
    let scope = Scope::tenant("demo-tenant");

    let operator = |id: &str, name: &str, hours: i64| OperatorAvailability {
        operator_id:           id.into(),
        display_name:          name.into(),
        available_from:        t0,
        available_until:       t0 + Duration::hours(hours),
        baseline_workload_pct: 0.0,
        max_tasks_per_hour:    4,
        scope:                 scope.clone(),
    };
    let task = |id: &str, desc: &str, priority: Priority, minutes: i64| TaskInput {
        task_id:           id.into(),
        description:       desc.into(),
        priority,
        estimated_minutes: minutes,
        sla_deadline:      None,
        assigned_operator: None,
        scope:             scope.clone(),
    };

    let mut tasks = vec![
        task("task-reconcile", "Reconcile drift report", Priority::Critical, 45),
        task("task-audit", "Close audit remediation items", Priority::High, 60),
        task("task-docs", "Backfill runbook documentation", Priority::Low, 90),
        task("task-review", "Review governance issues", Priority::Medium, 30),
    ];
    tasks[0].sla_deadline = Some(t0 + Duration::hours(2));

    let alerts = vec![AlertInput {
        alert_id:           "alert-cap".into(),
        description:        "Capacity forecast exceeded in zone B".into(),
        severity:           Priority::High,
        requires_follow_up: true,
        estimated_minutes:  30,
        sla_deadline:       Some(t0 + Duration::hours(3)),
        scope:              scope.clone(),
    }];

    let operators = vec![operator("op-ada", "Ada", 8), operator("op-lin", "Lin", 6)];
    let capacity_windows = vec![CapacityWindowInput {
        window_id:              "window-peak".into(),
        start:                  t0 + Duration::hours(2),
        end:                    t0 + Duration::hours(4),
        projected_capacity_pct: 92.0,
        recommended_workload:   2,
        risk_level:             RiskLevel::High,
        scope:                  scope.clone(),
    }];

    ScheduleRequest {
        tasks,
        alerts,
        operators,
        capacity_windows,
        time_range: TimeRange { start: t0, end: t0 + Duration::hours(10) },
        scope,
        options: ScheduleOptions {
            optimize_for_sla:         true,
            respect_capacity_windows: true,
            ..Default::default()
        },
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
