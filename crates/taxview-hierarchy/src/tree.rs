//! Materialized hierarchy trees.
//!
//! A [`Hierarchy`] is an ordered forest of [`TreeNode`]s. Each node owns its
//! children outright; nothing is shared between trees, so the caller can
//! hold or drop any part of the output independently of the model it came
//! from.

use serde::Serialize;
use taxview_core::model::{ArcAttributes, ObjectId};

/// One node of a materialized tree.
///
/// `arc` holds the attributes of the relationship that led to this node;
/// roots and synthetic nodes carry [`ArcAttributes::NotApplicable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    /// Backing model object. `None` for synthetic role-level roots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectId>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "is_not_applicable")]
    pub arc: ArcAttributes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

const fn is_not_applicable(arc: &ArcAttributes) -> bool {
    matches!(arc, ArcAttributes::NotApplicable)
}

impl TreeNode {
    /// A childless node for a model object.
    #[must_use]
    pub fn leaf(id: impl Into<String>, object: ObjectId, is_abstract: bool) -> Self {
        Self {
            id: id.into(),
            object: Some(object),
            is_abstract,
            arc: ArcAttributes::NotApplicable,
            children: Vec::new(),
        }
    }

    /// A node with no backing object, wrapping `children`.
    #[must_use]
    pub fn synthetic(id: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            id: id.into(),
            object: None,
            is_abstract: true,
            arc: ArcAttributes::NotApplicable,
            children,
        }
    }

    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.object.is_none()
    }

    /// First direct child with the given identifier.
    #[must_use]
    pub fn child(&self, id: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.id == id)
    }

    /// Nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Edges on the longest root-to-leaf path; 0 for a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        self.iter_with_depth()
            .map(|(_, depth)| depth)
            .max()
            .unwrap_or_default()
    }

    /// Pre-order traversal.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        self.iter_with_depth().map(|(node, _)| node)
    }

    /// Pre-order traversal paired with each node's depth below `self`.
    pub fn iter_with_depth(&self) -> impl Iterator<Item = (&Self, usize)> {
        let mut stack = vec![(self, 0)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
            Some((node, depth))
        })
    }
}

/// An ordered forest keyed by root identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hierarchy {
    roots: Vec<TreeNode>,
}

impl Hierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Root with the given identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.roots.iter().find(|root| root.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Insert `root`, replacing an existing root with the same identifier in
    /// place. A replaced root keeps its original position.
    pub fn upsert(&mut self, root: TreeNode) {
        match self.roots.iter_mut().find(|existing| existing.id == root.id) {
            Some(existing) => *existing = root,
            None => self.roots.push(root),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreeNode> {
        self.roots.iter()
    }

    /// Total nodes across all trees.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::node_count).sum()
    }
}

impl From<Vec<TreeNode>> for Hierarchy {
    fn from(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }
}

impl<'a> IntoIterator for &'a Hierarchy {
    type Item = &'a TreeNode;
    type IntoIter = std::slice::Iter<'a, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

impl IntoIterator for Hierarchy {
    type Item = TreeNode;
    type IntoIter = std::vec::IntoIter<TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<TreeNode>) -> TreeNode {
        let mut node = TreeNode::leaf(id, ObjectId::new(0), false);
        node.children = children;
        node
    }

    #[test]
    fn preorder_visits_parent_before_children_in_order() {
        let tree = node(
            "A",
            vec![node("B", vec![node("C", vec![])]), node("D", vec![])],
        );
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn leaf_has_zero_height() {
        assert_eq!(node("A", vec![]).height(), 0);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut hierarchy = Hierarchy::from(vec![node("A", vec![]), node("B", vec![])]);
        hierarchy.upsert(node("A", vec![node("X", vec![])]));
        hierarchy.upsert(node("C", vec![]));

        let ids: Vec<&str> = hierarchy.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(hierarchy.get("A").and_then(|a| a.child("X")).is_some());
        assert_eq!(hierarchy.node_count(), 4);
    }

    #[test]
    fn synthetic_node_serializes_without_object_or_arc() {
        let root = TreeNode::synthetic("[R] R", vec![node("X", vec![])]);
        assert!(root.is_synthetic());
        let json = serde_json::to_value(&root).expect("serialize");
        assert_eq!(json["id"], "[R] R");
        assert!(json.get("object").is_none());
        assert!(json.get("arc").is_none());
        assert_eq!(json["children"][0]["id"], "X");
        assert!(json["children"][0].get("children").is_none());
    }
}
