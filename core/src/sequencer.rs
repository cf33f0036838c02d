//! Work-item sequencing — the second pipeline stage.
//!
//! Produces the exact order in which the slot builder attempts
//! placement. There is no backtracking or re-ordering once placement
//! starts, so this sort IS the scheduling policy's first half.

use crate::{inputs::ScheduleOptions, work_item::WorkItem};
use std::cmp::Ordering;

/// Order work items for placement. Stable sort; ties keep input order.
///
/// 1. With `optimize_for_sla`: deadline-bearing items before
///    deadline-free ones; among deadline-bearing, earlier deadline first.
/// 2. Then priority tier: critical(0) < high(1) < medium(2) < low(3).
/// 3. With `optimize_for_capacity`, remaining ties: shorter estimated
///    duration first (improves bin-packing density).
pub fn sequence(mut items: Vec<WorkItem>, options: &ScheduleOptions) -> Vec<WorkItem> {
    items.sort_by(|a, b| {
        let mut ord = Ordering::Equal;

        if options.optimize_for_sla {
            ord = match (a.sla_deadline, b.sla_deadline) {
                (Some(da), Some(db)) => da.cmp(&db),
                (Some(_), None)      => Ordering::Less,
                (None, Some(_))      => Ordering::Greater,
                (None, None)         => Ordering::Equal,
            };
        }

        ord = ord.then_with(|| a.priority.rank().cmp(&b.priority.rank()));

        if options.optimize_for_capacity {
            ord = ord.then_with(|| a.estimated_minutes.cmp(&b.estimated_minutes));
        }

        ord
    });
    items
}
