//! Fixed-width short codes used in compact listings.

use crate::model::package::PackageStatus;
use crate::model::task::{Priority, TaskStatus};

pub fn task_status_code(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "TODO",
        TaskStatus::InProgress => "PROG",
        TaskStatus::Completed => "DONE",
        TaskStatus::Cancelled => "CANC",
    }
}

pub fn priority_code(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "U",
        Priority::High => "H",
        Priority::Medium => "M",
        Priority::Low => "L",
    }
}

pub fn package_status_code(status: PackageStatus) -> &'static str {
    match status {
        PackageStatus::Active => "ACT",
        PackageStatus::Completed => "DONE",
        PackageStatus::Archived => "ARC",
    }
}
