//! Fixed-order multi-kind resolution.
//!
//! Commands that accept "a task, note or package" try each kind in order
//! and stop at the first kind whose resolution is not `NotFound`.

use super::resolver::{resolve, Resolution, Resolvable};
use crate::model::note::Note;
use crate::model::package::Package;
use crate::model::task::Task;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Record kinds addressable by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Task,
    Note,
    Package,
}

/// Dispatch order for commands accepting any kind (`rm`).
pub const ANY_KIND: &[EntityKind] = &[EntityKind::Task, EntityKind::Note, EntityKind::Package];

/// Dispatch order for `archive`.
pub const ARCHIVABLE_KINDS: &[EntityKind] = &[EntityKind::Task, EntityKind::Package];

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Note => "note",
            Self::Package => "package",
        }
    }

    /// Capitalized form used in user messages ("Task 'x' not found.").
    pub fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Note => "Note",
            Self::Package => "Package",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved record of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum EntityRef {
    Task(Task),
    Note(Note),
    Package(Package),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Task(_) => EntityKind::Task,
            Self::Note(_) => EntityKind::Note,
            Self::Package(_) => EntityKind::Package,
        }
    }
}

impl Resolvable for EntityRef {
    fn id(&self) -> &str {
        match self {
            Self::Task(task) => task.id(),
            Self::Note(note) => note.id(),
            Self::Package(package) => package.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            Self::Task(task) => task.title(),
            Self::Note(note) => note.title(),
            Self::Package(package) => package.title(),
        }
    }
}

/// Resolves across `kinds` in order.
///
/// `fetch` supplies the candidate pool for one kind; it is only called for
/// kinds actually tried. A fetch error aborts dispatch.
pub fn resolve_any<E>(
    identifier: &str,
    kinds: &[EntityKind],
    mut fetch: impl FnMut(EntityKind) -> Result<Vec<EntityRef>, E>,
) -> Result<Resolution<EntityRef>, E> {
    for kind in kinds {
        let resolution = resolve(identifier, fetch(*kind)?);
        if !resolution.is_not_found() {
            return Ok(resolution);
        }
    }
    Ok(Resolution::NotFound)
}

#[cfg(test)]
mod tests {
    use super::{resolve_any, EntityKind, EntityRef, ANY_KIND, ARCHIVABLE_KINDS};
    use crate::model::note::Note;
    use crate::model::package::Package;
    use crate::model::task::Task;
    use crate::resolve::Resolution;
    use std::convert::Infallible;

    fn pool(kind: EntityKind) -> Vec<EntityRef> {
        match kind {
            EntityKind::Task => vec![EntityRef::Task(Task::new("Plan launch"))],
            EntityKind::Note => vec![
                EntityRef::Note(Note::new("Launch notes", "")),
                EntityRef::Note(Note::new("Retro", "")),
            ],
            EntityKind::Package => vec![
                EntityRef::Package(Package::new("Retro board")),
                EntityRef::Package(Package::new("Garden")),
            ],
        }
    }

    #[test]
    fn first_kind_with_any_match_wins() {
        let result = resolve_any("launch", ANY_KIND, |kind| Ok::<_, Infallible>(pool(kind)))
            .unwrap();
        let Resolution::Unique(found) = result else {
            panic!("expected unique task");
        };
        assert_eq!(found.kind(), EntityKind::Task);
    }

    #[test]
    fn match_stops_dispatch_before_later_kinds() {
        let mut tried = Vec::new();
        let result = resolve_any("retro", ANY_KIND, |kind| {
            tried.push(kind);
            Ok::<_, Infallible>(pool(kind))
        })
        .unwrap();
        assert_eq!(tried, vec![EntityKind::Task, EntityKind::Note]);
        assert!(matches!(result, Resolution::Unique(EntityRef::Note(_))));
    }

    #[test]
    fn restricted_kind_list_skips_notes() {
        let result = resolve_any("retro", ARCHIVABLE_KINDS, |kind| {
            Ok::<_, Infallible>(pool(kind))
        })
        .unwrap();
        assert!(matches!(result, Resolution::Unique(EntityRef::Package(_))));

        let missing = resolve_any("nothing-here", ANY_KIND, |kind| {
            Ok::<_, Infallible>(pool(kind))
        })
        .unwrap();
        assert_eq!(missing, Resolution::NotFound);
    }

    #[test]
    fn fetch_errors_propagate() {
        let result: Result<_, &str> = resolve_any("x", ANY_KIND, |_| Err("db down"));
        assert_eq!(result.unwrap_err(), "db down");
    }
}
