//! Containment built from `hasChild` relations
//!
//! [`ContainmentTree`] holds the relations as found in the graph: several
//! roots, shared children and cycles are all possible. [`Placement`] is what
//! the renderer draws: every child under at most one parent, and no parent
//! nested inside its own descendants.

use std::collections::{BTreeMap, BTreeSet};

/// Parent id → child ids, keyed by sanitized diagram ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainmentTree {
    children: BTreeMap<String, BTreeSet<String>>,
}

impl ContainmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `child` under `parent`, returning false if already known
    pub fn add_child(&mut self, parent: impl Into<String>, child: impl Into<String>) -> bool {
        self.children
            .entry(parent.into())
            .or_default()
            .insert(child.into())
    }

    /// Parents in id order
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Children of `parent` in id order
    pub fn children(&self, parent: &str) -> impl Iterator<Item = &str> {
        self.children
            .get(parent)
            .into_iter()
            .flat_map(|children| children.iter().map(String::as_str))
    }
}

/// Acyclic child → parent assignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement<'a> {
    parent_of: BTreeMap<&'a str, &'a str>,
    children: BTreeMap<&'a str, Vec<&'a str>>,
}

impl<'a> Placement<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `child` under `parent`
    ///
    /// Refused when `child` is already placed, or when it is `parent` itself
    /// or one of its ancestors.
    pub fn place(&mut self, parent: &'a str, child: &'a str) -> bool {
        if self.parent_of.contains_key(child) || self.is_ancestor(child, parent) {
            return false;
        }
        self.parent_of.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        true
    }

    /// True when `candidate` is `id` or encloses it
    pub fn is_ancestor(&self, candidate: &str, id: &str) -> bool {
        let mut current = id;
        loop {
            if current == candidate {
                return true;
            }
            match self.parent_of.get(current) {
                Some(parent) => current = *parent,
                None => return false,
            }
        }
    }

    pub fn is_placed(&self, id: &str) -> bool {
        self.parent_of.contains_key(id)
    }

    /// True when `id` received at least one child
    pub fn has_children(&self, id: &str) -> bool {
        self.children.contains_key(id)
    }

    /// Children placed under `parent`, in placement order
    pub fn children(&self, parent: &str) -> &[&'a str] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Parents that are not placed themselves, in id order
    pub fn roots(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.children
            .keys()
            .copied()
            .filter(|parent| !self.is_placed(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_roots() {
        let mut tree = ContainmentTree::new();
        assert!(tree.add_child("ns", "svc"));
        assert!(tree.add_child("pod", "container"));
        assert!(!tree.add_child("ns", "svc"));

        assert_eq!(tree.parents().collect::<Vec<_>>(), vec!["ns", "pod"]);
        assert_eq!(tree.children("ns").collect::<Vec<_>>(), vec!["svc"]);
        assert_eq!(tree.children("svc").count(), 0);
    }

    #[test]
    fn test_shared_child_goes_to_first_parent() {
        let mut placement = Placement::new();
        assert!(placement.place("a", "shared"));
        assert!(!placement.place("b", "shared"));
        assert_eq!(placement.children("a"), ["shared"]);
        assert!(!placement.has_children("b"));
    }

    #[test]
    fn test_cycle_is_refused() {
        let mut placement = Placement::new();
        assert!(placement.place("a", "b"));
        assert!(placement.place("b", "c"));
        assert!(!placement.place("c", "a"));
        assert!(!placement.place("b", "a"));
        assert!(!placement.place("a", "a"));

        assert!(placement.is_ancestor("a", "c"));
        assert!(!placement.is_ancestor("c", "a"));
        assert_eq!(placement.roots().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_unknown_parent_has_no_children() {
        let placement = Placement::new();
        assert!(placement.children("missing").is_empty());
        assert_eq!(placement.roots().count(), 0);
    }
}
