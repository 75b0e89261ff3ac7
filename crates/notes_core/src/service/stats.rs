//! Record counts for the status screen and `/api/stats`.

use super::ServiceResult;
use crate::model::package::PackageStatus;
use crate::model::task::TaskStatus;
use crate::repo::note_repo::{NoteFilter, NoteRepository};
use crate::repo::package_repo::{PackageFilter, PackageRepository};
use crate::repo::task_repo::{TaskFilter, TaskRepository};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub tasks_total: usize,
    /// Keyed by status wire name; every status is present.
    pub tasks_by_status: BTreeMap<&'static str, usize>,
    pub notes_total: usize,
    pub packages_total: usize,
    pub packages_by_status: BTreeMap<&'static str, usize>,
}

impl Stats {
    pub fn active_tasks(&self) -> usize {
        TaskStatus::ALL
            .iter()
            .filter(|status| status.is_active())
            .map(|status| self.tasks_by_status.get(status.as_str()).copied().unwrap_or(0))
            .sum()
    }
}

pub fn collect_stats<T, N, P>(tasks: &T, notes: &N, packages: &P) -> ServiceResult<Stats>
where
    T: TaskRepository,
    N: NoteRepository,
    P: PackageRepository,
{
    let mut stats = Stats::default();
    for status in TaskStatus::ALL {
        stats.tasks_by_status.insert(status.as_str(), 0);
    }
    for status in PackageStatus::ALL {
        stats.packages_by_status.insert(status.as_str(), 0);
    }

    for task in tasks.list_tasks(&TaskFilter::default())? {
        stats.tasks_total += 1;
        *stats.tasks_by_status.entry(task.status.as_str()).or_default() += 1;
    }
    stats.notes_total = notes.list_notes(&NoteFilter::default())?.len();
    for package in packages.list_packages(&PackageFilter::default())? {
        stats.packages_total += 1;
        *stats
            .packages_by_status
            .entry(package.status.as_str())
            .or_default() += 1;
    }

    Ok(stats)
}
