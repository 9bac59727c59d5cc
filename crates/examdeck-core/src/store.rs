use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::seed::Seed;

// ── Nodes ────────────────────────────────────────────────────────────

/// A named resource inside a top-level folder, pointing at an external location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    pub name: String,
    /// External reference. May be a placeholder such as `#`; never validated.
    pub url: String,
}

impl LeafNode {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A top-level folder owning an ordered list of leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopNode {
    pub name: String,
    pub leaves: Vec<LeafNode>,
}

impl TopNode {
    pub fn leaf(&self, name: &str) -> Option<&LeafNode> {
        self.leaves.iter().find(|l| l.name == name)
    }
}

// ── HierarchyStore ───────────────────────────────────────────────────

/// In-memory two-level folder tree.
///
/// The store only mutates structure. Name uniqueness is the caller's job:
/// `insert_top`/`insert_leaf` append blindly.
#[derive(Debug, Clone, Default)]
pub struct HierarchyStore {
    tops: Vec<TopNode>,
}

impl HierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial tree from seed data, keeping seed order.
    pub fn from_seed(seed: Seed) -> Self {
        let tops = seed
            .folders
            .into_iter()
            .map(|f| TopNode {
                name: f.name,
                leaves: f.subfolders,
            })
            .collect();
        Self { tops }
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    /// Top-level names in insertion order.
    pub fn list_top(&self) -> Vec<&str> {
        self.tops.iter().map(|t| t.name.as_str()).collect()
    }

    #[cfg(test)]
    pub fn tops(&self) -> &[TopNode] {
        &self.tops
    }

    pub fn get_top(&self, name: &str) -> Option<&TopNode> {
        self.tops.iter().find(|t| t.name == name)
    }

    fn get_top_mut(&mut self, name: &str) -> Option<&mut TopNode> {
        self.tops.iter_mut().find(|t| t.name == name)
    }

    pub fn contains_top(&self, name: &str) -> bool {
        self.get_top(name).is_some()
    }

    pub fn contains_leaf(&self, top: &str, leaf: &str) -> bool {
        self.get_top(top).is_some_and(|t| t.leaf(leaf).is_some())
    }

    pub fn list_children(&self, top: &str) -> Result<&[LeafNode], StoreError> {
        self.get_top(top)
            .map(|t| t.leaves.as_slice())
            .ok_or_else(|| StoreError::TopNotFound(top.to_string()))
    }

    pub fn get_leaf(&self, top: &str, leaf: &str) -> Result<&LeafNode, StoreError> {
        let node = self
            .get_top(top)
            .ok_or_else(|| StoreError::TopNotFound(top.to_string()))?;
        node.leaf(leaf).ok_or_else(|| StoreError::LeafNotFound {
            top: top.to_string(),
            leaf: leaf.to_string(),
        })
    }

    /// Names of the siblings a new entry would have: top-level names when
    /// `parent` is `None`, otherwise the leaves of `parent`.
    pub fn sibling_names(&self, parent: Option<&str>) -> Result<Vec<&str>, StoreError> {
        match parent {
            None => Ok(self.list_top()),
            Some(top) => Ok(self
                .list_children(top)?
                .iter()
                .map(|l| l.name.as_str())
                .collect()),
        }
    }

    /// Remove a top-level folder and everything in it.
    pub fn delete_top(&mut self, name: &str) -> Result<TopNode, StoreError> {
        let pos = self
            .tops
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| StoreError::TopNotFound(name.to_string()))?;
        Ok(self.tops.remove(pos))
    }

    pub fn delete_leaf(&mut self, top: &str, leaf: &str) -> Result<LeafNode, StoreError> {
        let node = self
            .get_top_mut(top)
            .ok_or_else(|| StoreError::TopNotFound(top.to_string()))?;
        let pos = node
            .leaves
            .iter()
            .position(|l| l.name == leaf)
            .ok_or_else(|| StoreError::LeafNotFound {
                top: top.to_string(),
                leaf: leaf.to_string(),
            })?;
        Ok(node.leaves.remove(pos))
    }

    /// Append a top-level folder at the end of the root order.
    pub fn insert_top(&mut self, name: impl Into<String>, leaves: Vec<LeafNode>) {
        self.tops.push(TopNode {
            name: name.into(),
            leaves,
        });
    }

    /// Append a leaf to the end of `top`'s sequence.
    pub fn insert_leaf(&mut self, top: &str, leaf: LeafNode) -> Result<(), StoreError> {
        let node = self
            .get_top_mut(top)
            .ok_or_else(|| StoreError::TopNotFound(top.to_string()))?;
        node.leaves.push(leaf);
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
