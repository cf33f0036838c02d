//! Schedule summarization — pure aggregation over the finished slot list.

use crate::{
    inputs::OperatorAvailability,
    schedule::OrchestrationSlot,
    types::{OperatorId, Priority},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A slot ending with less than this much SLA buffer counts toward the
/// operator's SLA-risk ratio.
const SLA_RISK_BUFFER_MINUTES: i64 = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorSummary {
    pub total_slots:     usize,
    pub total_minutes:   i64,
    pub utilization_pct: f64,
    /// Fraction of this operator's slots with under an hour of SLA buffer.
    pub sla_risk_ratio:  f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total_slots:         usize,
    pub total_minutes:       i64,
    pub critical_slots:      usize,
    pub high_priority_slots: usize,
}

/// Per-operator and per-category rollups attached to the schedule.
/// BTreeMaps keep serialized output ordering stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub operators:  BTreeMap<OperatorId, OperatorSummary>,
    pub categories: BTreeMap<String, CategorySummary>,
}

/// Group slots by operator and by category. No decision logic.
pub fn summarize(
    slots: &[OrchestrationSlot],
    operators: &[OperatorAvailability],
) -> ScheduleSummary {
    let mut summary = ScheduleSummary::default();

    for slot in slots {
        let entry = summary.operators.entry(slot.operator_id.clone()).or_default();
        entry.total_slots += 1;
        entry.total_minutes += slot.duration_minutes;
        if matches!(slot.sla_buffer_minutes, Some(b) if b < SLA_RISK_BUFFER_MINUTES) {
            entry.sla_risk_ratio += 1.0; // numerator for now, divided below
        }

        let cat = summary
            .categories
            .entry(slot.category.as_str().to_string())
            .or_default();
        cat.total_slots += 1;
        cat.total_minutes += slot.duration_minutes;
        match slot.priority {
            Priority::Critical => cat.critical_slots += 1,
            Priority::High     => cat.high_priority_slots += 1,
            _ => {}
        }
    }

    for (operator_id, entry) in summary.operators.iter_mut() {
        entry.sla_risk_ratio /= entry.total_slots as f64;
        let available = operators
            .iter()
            .find(|o| &o.operator_id == operator_id)
            .map(|o| o.available_minutes())
            .unwrap_or(0);
        if available > 0 {
            entry.utilization_pct = entry.total_minutes as f64 / available as f64 * 100.0;
        }
    }

    summary
}
