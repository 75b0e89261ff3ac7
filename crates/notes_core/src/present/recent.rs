//! Completion-recency view used by compact task tables.

use crate::model::task::{Task, TaskStatus};
use chrono::Duration;

pub const DEFAULT_COMPLETED_WINDOW_DAYS: i64 = 7;

/// Drops completed tasks finished before `now - window` (or with no
/// completion time), then lists non-completed tasks before completed ones.
/// Relative order within each group follows the input.
pub fn recent_view(tasks: Vec<Task>, now: i64, window: Duration) -> Vec<Task> {
    let cutoff = now.saturating_sub(window.num_milliseconds());

    let (completed, open): (Vec<Task>, Vec<Task>) = tasks
        .into_iter()
        .filter(|task| {
            task.status != TaskStatus::Completed
                || task.completed_at.is_some_and(|done| done >= cutoff)
        })
        .partition(|task| task.status == TaskStatus::Completed);

    open.into_iter().chain(completed).collect()
}
