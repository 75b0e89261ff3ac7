//! Single-kind resolution over an in-memory candidate pool.

use crate::model::note::Note;
use crate::model::package::Package;
use crate::model::task::Task;

/// Anything the resolver can match: an id and a human title.
pub trait Resolvable {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
}

impl Resolvable for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Resolvable for Note {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Resolvable for Package {
    fn id(&self) -> &str {
        &self.id
    }

    /// Packages are matched by name.
    fn title(&self) -> &str {
        &self.name
    }
}

/// Tri-state resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Unique(T),
    /// Two or more matches, id matches first.
    Ambiguous(Vec<T>),
    NotFound,
}

impl<T> Resolution<T> {
    fn from_matches(mut matches: Vec<T>) -> Self {
        match matches.len() {
            0 => Self::NotFound,
            1 => matches
                .pop()
                .map_or(Self::NotFound, |only| Self::Unique(only)),
            _ => Self::Ambiguous(matches),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Resolution<U> {
        match self {
            Self::Unique(value) => Resolution::Unique(f(value)),
            Self::Ambiguous(values) => Resolution::Ambiguous(values.into_iter().map(f).collect()),
            Self::NotFound => Resolution::NotFound,
        }
    }

    /// Returns the unique match, if any.
    pub fn unique(self) -> Option<T> {
        match self {
            Self::Unique(value) => Some(value),
            _ => None,
        }
    }
}

/// Resolves `identifier` against `candidates`.
///
/// An empty identifier is a prefix of every id and a substring of every
/// title, so callers that do not want "match everything" must guard first.
pub fn resolve<T: Resolvable>(identifier: &str, candidates: Vec<T>) -> Resolution<T> {
    let needle = identifier.to_lowercase();

    let mut id_matches: Vec<T> = Vec::new();
    let mut title_matches: Vec<T> = Vec::new();
    for candidate in candidates {
        if candidate.id().starts_with(identifier) {
            id_matches.push(candidate);
        } else if candidate.title().to_lowercase().contains(&needle) {
            title_matches.push(candidate);
        }
    }

    // A candidate lands in at most one bucket, so title matches already
    // exclude id matches; dedup here covers pools that repeat an id.
    let mut merged: Vec<T> = Vec::with_capacity(id_matches.len() + title_matches.len());
    for candidate in id_matches.into_iter().chain(title_matches) {
        if merged.iter().any(|kept| kept.id() == candidate.id()) {
            continue;
        }
        merged.push(candidate);
    }

    Resolution::from_matches(merged)
}

#[cfg(test)]
mod tests {
    use super::{resolve, Resolution, Resolvable};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(&'static str, &'static str);

    impl Resolvable for Item {
        fn id(&self) -> &str {
            self.0
        }

        fn title(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn id_matches_precede_title_matches() {
        let pool = vec![
            Item("zz-1", "deploy abc"),
            Item("abc-2", "unrelated"),
            Item("yy-3", "ABC review"),
        ];
        let Resolution::Ambiguous(found) = resolve("abc", pool) else {
            panic!("expected ambiguity");
        };
        let ids: Vec<_> = found.iter().map(|item| item.0).collect();
        assert_eq!(ids, vec!["abc-2", "zz-1", "yy-3"]);
    }

    #[test]
    fn empty_identifier_matches_everything() {
        let pool = vec![Item("a", "one"), Item("b", "two")];
        assert!(matches!(resolve("", pool), Resolution::Ambiguous(all) if all.len() == 2));
        assert_eq!(resolve::<Item>("", Vec::new()), Resolution::NotFound);
    }

    #[test]
    fn repeated_ids_in_pool_collapse() {
        let pool = vec![Item("a1", "same"), Item("a1", "same")];
        assert_eq!(resolve("a1", pool), Resolution::Unique(Item("a1", "same")));
    }

    #[test]
    fn title_match_is_case_insensitive() {
        let pool = vec![Item("1", "Write Report"), Item("2", "lunch")];
        assert_eq!(
            resolve("REPORT", pool),
            Resolution::Unique(Item("1", "Write Report"))
        );
    }
}
