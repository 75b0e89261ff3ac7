//! Task ranking for the quick-glance listing.
//!
//! # Invariants
//! - Sort is stable on (status rank, priority rank, due ascending with
//!   missing due dates last); ties keep input order.
//! - Ranking an already ranked sequence returns the same order.
//! - Without `show_all`, only pending and in-progress tasks appear.

use crate::dates::local_date;
use crate::model::task::{Priority, Task, TaskStatus};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Rows shown by `ls` before the "... and N more" footer.
pub const QUICK_VIEW_LIMIT: usize = 10;

/// Relative due-date label, computed on local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    /// Days past due (always positive).
    Overdue(i64),
    Today,
    Tomorrow,
    /// Due in 2..=7 days.
    InDays(i64),
}

impl Display for DueLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overdue(days) => write!(f, "overdue by {days} days"),
            Self::Today => f.write_str("due today"),
            Self::Tomorrow => f.write_str("due tomorrow"),
            Self::InDays(days) => write!(f, "due in {days} days"),
        }
    }
}

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTask {
    pub task: Task,
    pub due_label: Option<DueLabel>,
}

/// Filters and orders `tasks`, attaching due labels relative to `today`.
pub fn rank(tasks: Vec<Task>, show_all: bool, today: NaiveDate) -> Vec<RankedTask> {
    let mut kept: Vec<Task> = tasks
        .into_iter()
        .filter(|task| show_all || task.status.is_active())
        .collect();
    kept.sort_by_key(sort_key);

    kept.into_iter()
        .map(|task| {
            let due_label = due_label(task.due_at, today);
            RankedTask { task, due_label }
        })
        .collect()
}

/// Label for a due timestamp; `None` when absent or more than a week out.
pub fn due_label(due_at: Option<i64>, today: NaiveDate) -> Option<DueLabel> {
    let due_day = local_date(due_at?)?;
    label_for_day_difference((due_day - today).num_days())
}

fn label_for_day_difference(days: i64) -> Option<DueLabel> {
    match days {
        d if d < 0 => Some(DueLabel::Overdue(-d)),
        0 => Some(DueLabel::Today),
        1 => Some(DueLabel::Tomorrow),
        2..=7 => Some(DueLabel::InDays(days)),
        _ => None,
    }
}

fn sort_key(task: &Task) -> (u8, u8, i64) {
    (
        status_rank(task.status),
        priority_rank(task.priority),
        task.due_at.unwrap_or(i64::MAX),
    )
}

fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Pending => 0,
        TaskStatus::InProgress => 1,
        TaskStatus::Completed => 2,
        TaskStatus::Cancelled => 3,
    }
}

fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Urgent => 0,
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}
