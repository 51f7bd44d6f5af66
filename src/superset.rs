//! Superset grouping
//!
//! Splits a day's ordered exercise list into display blocks in a single
//! left-to-right pass:
//!
//! 1. An explicitly tagged exercise opens a superset that absorbs every
//!    immediately following exercise carrying the same tag.
//! 2. Two untagged neighbours with the same category and the same rest time
//!    are paired as a superset.
//! 3. Anything else stands alone.
//!
//! Rule 2 is a heuristic and can pair two unrelated exercises that happen to
//! share a category and rest time.

use serde::Serialize;

use crate::models::{Category, GeneratedExercise};

/// What the grouper needs to know about an exercise
pub trait Groupable {
    /// Explicit superset label; members of one superset share it
    fn superset_tag(&self) -> Option<&str>;
    fn category(&self) -> Category;
    fn rest_seconds(&self) -> u32;
}

impl Groupable for GeneratedExercise {
    fn superset_tag(&self) -> Option<&str> {
        self.superset_group.as_deref()
    }

    fn category(&self) -> Category {
        self.category
    }

    fn rest_seconds(&self) -> u32 {
        self.rest_seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKind {
    Solo,
    Superset,
}

/// A display block: one solo exercise or a run of superset members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseGroup<'a, T> {
    pub kind: GroupKind,
    pub items: Vec<&'a T>,
}

impl<'a, T> ExerciseGroup<'a, T> {
    fn solo(item: &'a T) -> Self {
        Self {
            kind: GroupKind::Solo,
            items: vec![item],
        }
    }

    fn superset(items: Vec<&'a T>) -> Self {
        Self {
            kind: GroupKind::Superset,
            items,
        }
    }

    pub fn is_superset(&self) -> bool {
        self.kind == GroupKind::Superset
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn pairs_by_adjacency<T: Groupable>(current: &T, next: &T) -> bool {
    next.superset_tag().is_none()
        && current.category() == next.category()
        && current.rest_seconds() == next.rest_seconds()
}

/// Group an ordered exercise list. Every input item appears in exactly one block.
pub fn group<T: Groupable>(exercises: &[T]) -> Vec<ExerciseGroup<'_, T>> {
    let mut groups = Vec::new();
    let mut index = 0;

    while index < exercises.len() {
        let current = &exercises[index];

        if let Some(tag) = current.superset_tag() {
            let mut run = vec![current];
            index += 1;
            while let Some(next) = exercises.get(index) {
                if next.superset_tag() != Some(tag) {
                    break;
                }
                run.push(next);
                index += 1;
            }
            groups.push(ExerciseGroup::superset(run));
            continue;
        }

        match exercises.get(index + 1) {
            Some(next) if pairs_by_adjacency(current, next) => {
                groups.push(ExerciseGroup::superset(vec![current, next]));
                index += 2;
            }
            _ => {
                groups.push(ExerciseGroup::solo(current));
                index += 1;
            }
        }
    }

    tracing::trace!(
        exercises = exercises.len(),
        groups = groups.len(),
        "Grouped exercises"
    );

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        tag: Option<&'static str>,
        category: Category,
        rest: u32,
    }

    fn tagged(name: &'static str, tag: &'static str) -> Item {
        Item {
            name,
            tag: Some(tag),
            category: Category::Compound,
            rest: 90,
        }
    }

    fn plain(name: &'static str, category: Category, rest: u32) -> Item {
        Item {
            name,
            tag: None,
            category,
            rest,
        }
    }

    impl Groupable for Item {
        fn superset_tag(&self) -> Option<&str> {
            self.tag
        }

        fn category(&self) -> Category {
            self.category
        }

        fn rest_seconds(&self) -> u32 {
            self.rest
        }
    }

    fn names<'a>(groups: &[ExerciseGroup<'a, Item>]) -> Vec<(GroupKind, Vec<&'static str>)> {
        groups
            .iter()
            .map(|g| (g.kind, g.items.iter().map(|i| i.name).collect()))
            .collect()
    }

    #[test]
    fn test_tagged_run_then_solo() {
        let items = vec![
            tagged("A", "ss1"),
            tagged("B", "ss1"),
            plain("C", Category::Compound, 120),
        ];
        let groups = group(&items);
        assert_eq!(
            names(&groups),
            vec![
                (GroupKind::Superset, vec!["A", "B"]),
                (GroupKind::Solo, vec!["C"]),
            ]
        );
    }

    #[test]
    fn test_adjacent_pair_by_category_and_rest() {
        let items = vec![
            plain("X", Category::Isolation, 60),
            plain("Y", Category::Isolation, 60),
        ];
        let groups = group(&items);
        assert_eq!(names(&groups), vec![(GroupKind::Superset, vec!["X", "Y"])]);
    }

    #[test]
    fn test_single_exercise_is_solo() {
        let items = vec![plain("Only", Category::Compound, 90)];
        let groups = group(&items);
        assert_eq!(names(&groups), vec![(GroupKind::Solo, vec!["Only"])]);
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<Item> = Vec::new();
        assert!(group(&items).is_empty());
    }

    #[test]
    fn test_trailing_tagged_run_closes_at_end() {
        let items = vec![
            plain("A", Category::Compound, 120),
            tagged("B", "ss1"),
            tagged("C", "ss1"),
            tagged("D", "ss1"),
        ];
        let groups = group(&items);
        assert_eq!(
            names(&groups),
            vec![
                (GroupKind::Solo, vec!["A"]),
                (GroupKind::Superset, vec!["B", "C", "D"]),
            ]
        );
    }

    #[test]
    fn test_tags_take_precedence_over_adjacency() {
        // A and B would pair by adjacency, but B belongs to a tagged run
        let items = vec![
            plain("A", Category::Compound, 90),
            tagged("B", "ss1"),
            tagged("C", "ss1"),
        ];
        let groups = group(&items);
        assert_eq!(
            names(&groups),
            vec![
                (GroupKind::Solo, vec!["A"]),
                (GroupKind::Superset, vec!["B", "C"]),
            ]
        );
    }

    #[test]
    fn test_different_tags_split_runs() {
        let items = vec![
            tagged("A", "ss1"),
            tagged("B", "ss1"),
            tagged("C", "ss2"),
            tagged("D", "ss2"),
        ];
        let groups = group(&items);
        assert_eq!(
            names(&groups),
            vec![
                (GroupKind::Superset, vec!["A", "B"]),
                (GroupKind::Superset, vec!["C", "D"]),
            ]
        );
    }

    #[test]
    fn test_no_double_consumption() {
        let items = vec![
            plain("A", Category::Isolation, 60),
            plain("B", Category::Isolation, 60),
            plain("C", Category::Isolation, 60),
        ];
        let groups = group(&items);
        assert_eq!(
            names(&groups),
            vec![
                (GroupKind::Superset, vec!["A", "B"]),
                (GroupKind::Solo, vec!["C"]),
            ]
        );

        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, items.len());
    }

    #[test]
    fn test_mismatched_rest_stays_solo() {
        let items = vec![
            plain("A", Category::Isolation, 60),
            plain("B", Category::Isolation, 75),
        ];
        let groups = group(&items);
        assert!(groups.iter().all(|g| !g.is_superset()));
    }
}
