//! In-memory view of the category tree.
//!
//! Categories are kept in an arena keyed by id; edges are the nullable
//! `parent_id` fields. Every walk carries a visited set so a corrupted parent
//! chain is reported instead of looping forever.

use crate::entities::categories;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("Category {0} not found")]
    UnknownCategory(i32),

    #[error("Category {category_id} points at missing parent {parent_id}")]
    MissingParent { category_id: i32, parent_id: i32 },

    #[error("Cycle detected in category hierarchy at category {0}")]
    Cycle(i32),
}

#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: HashMap<i32, categories::Model>,
    children: HashMap<i32, Vec<i32>>,
}

impl CategoryTree {
    pub fn new(models: impl IntoIterator<Item = categories::Model>) -> Self {
        let mut tree = Self::default();
        for model in models {
            if let Some(parent_id) = model.parent_id {
                tree.children.entry(parent_id).or_default().push(model.id);
            }
            tree.nodes.insert(model.id, model);
        }
        for ids in tree.children.values_mut() {
            ids.sort_unstable();
        }
        tree
    }

    pub fn get(&self, id: i32) -> Option<&categories::Model> {
        self.nodes.get(&id)
    }

    /// Ancestors of `id`, ordered root first, excluding the category itself.
    pub fn ancestors(&self, id: i32) -> Result<Vec<&categories::Model>, HierarchyError> {
        let start = self.get(id).ok_or(HierarchyError::UnknownCategory(id))?;

        let mut chain = VecDeque::new();
        let mut visited = HashSet::from([start.id]);
        let mut current = start;

        while let Some(parent_id) = current.parent_id {
            if !visited.insert(parent_id) {
                return Err(HierarchyError::Cycle(parent_id));
            }
            let parent = self.get(parent_id).ok_or(HierarchyError::MissingParent {
                category_id: current.id,
                parent_id,
            })?;
            chain.push_front(parent);
            current = parent;
        }

        Ok(chain.into())
    }

    /// Every category below `id`, breadth first. Deepest categories come last.
    pub fn descendants(&self, id: i32) -> Result<Vec<i32>, HierarchyError> {
        if !self.nodes.contains_key(&id) {
            return Err(HierarchyError::UnknownCategory(id));
        }

        let mut found = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for &child in self.children.get(&current).into_iter().flatten() {
                if !visited.insert(child) {
                    return Err(HierarchyError::Cycle(child));
                }
                found.push(child);
                queue.push_back(child);
            }
        }

        Ok(found)
    }

    /// Whether re-parenting `id` under `new_parent` would close a loop.
    pub fn would_create_cycle(&self, id: i32, new_parent: i32) -> Result<bool, HierarchyError> {
        if id == new_parent {
            return Ok(true);
        }
        let ancestors = self.ancestors(new_parent)?;
        Ok(ancestors.iter().any(|c| c.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i32, name: &str, parent_id: Option<i32>) -> categories::Model {
        categories::Model {
            id,
            name: name.to_string(),
            parent_id,
            name_search: crate::utils::search::fold_case(name),
        }
    }

    fn chain() -> CategoryTree {
        CategoryTree::new(vec![
            category(1, "Root", None),
            category(2, "Mid", Some(1)),
            category(3, "Leaf", Some(2)),
            category(4, "Sibling", Some(1)),
        ])
    }

    fn names(models: &[&categories::Model]) -> Vec<String> {
        models.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_ancestors_root_first() {
        let tree = chain();
        assert_eq!(names(&tree.ancestors(3).unwrap()), vec!["Root", "Mid"]);
        assert!(tree.ancestors(1).unwrap().is_empty());
    }

    #[test]
    fn test_ancestors_unknown_category() {
        assert_eq!(
            chain().ancestors(99).unwrap_err(),
            HierarchyError::UnknownCategory(99)
        );
    }

    #[test]
    fn test_ancestors_detects_cycle() {
        let tree = CategoryTree::new(vec![
            category(1, "A", Some(3)),
            category(2, "B", Some(1)),
            category(3, "C", Some(2)),
        ]);
        assert!(matches!(
            tree.ancestors(1),
            Err(HierarchyError::Cycle(_))
        ));
    }

    #[test]
    fn test_ancestors_self_parent() {
        let tree = CategoryTree::new(vec![category(1, "Loop", Some(1))]);
        assert_eq!(tree.ancestors(1).unwrap_err(), HierarchyError::Cycle(1));
    }

    #[test]
    fn test_ancestors_missing_parent() {
        let tree = CategoryTree::new(vec![category(5, "Orphan", Some(42))]);
        assert_eq!(
            tree.ancestors(5).unwrap_err(),
            HierarchyError::MissingParent {
                category_id: 5,
                parent_id: 42
            }
        );
    }

    #[test]
    fn test_descendants_breadth_first() {
        let tree = chain();
        assert_eq!(tree.descendants(1).unwrap(), vec![2, 4, 3]);
        assert!(tree.descendants(3).unwrap().is_empty());
    }

    #[test]
    fn test_would_create_cycle() {
        let tree = chain();
        assert!(tree.would_create_cycle(1, 3).unwrap());
        assert!(tree.would_create_cycle(2, 2).unwrap());
        assert!(!tree.would_create_cycle(3, 4).unwrap());
    }
}
