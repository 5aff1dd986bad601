//! A comparator-driven BST built on the [`Nodes`] arena.
//!
//! The tree always has a root node. An empty tree is a root without a value, and removing the
//! last value just empties the root again, so the root's [`NodeId`] never changes.
//!
//! # Examples
//!
//! ```
//! use parent_bst::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert!(tree.contains(&1));
//! assert_eq!(tree.to_string(), "1,2,3");
//!
//! // Removing hands back the value...
//! assert_eq!(tree.remove(&2), Ok(2));
//! assert_eq!(tree.to_string(), "1,3");
//!
//! // ...and removing something that isn't there is an error.
//! assert_eq!(tree.remove(&2), Err(TreeError::NotFound));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::comparator::Comparator;
use crate::error::{Result, TreeError};
use crate::node::{NodeId, Nodes};

/// A Binary Search Tree with parent links. Values are ordered by a [`Comparator`]; values the
/// comparator considers equal are stored once.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    nodes: Nodes<T>,
    root: NodeId,
    comparator: Comparator<T>,
}

impl<T> Default for Tree<T>
where
    T: PartialOrd + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T>
where
    T: PartialOrd + 'static,
{
    /// Generates a new, empty `Tree` using the natural order of `T`.
    pub fn new() -> Self {
        Self::with_comparator(Comparator::default())
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` ordering values with `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{Comparator, Tree};
    ///
    /// let mut comparator = Comparator::<i32>::default();
    /// comparator.reverse();
    ///
    /// let mut tree = Tree::with_comparator(comparator);
    /// for x in [1, 3, 2] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.traverse_in_order(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self::with_comparators(comparator, Comparator::default())
    }

    /// Like [`with_comparator`][Self::with_comparator] but also replaces the comparator used to
    /// tell nodes apart.
    pub fn with_comparators(
        comparator: Comparator<T>,
        node_comparator: Comparator<NodeId>,
    ) -> Self {
        let mut nodes = Nodes::with_node_comparator(node_comparator);
        let root = nodes.insert_node(None);
        Self {
            nodes,
            root,
            comparator,
        }
    }

    /// The root node. It exists even when the tree is empty.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Read access to the underlying nodes, for structural queries such as
    /// [`Nodes::height`] or [`Nodes::uncle`].
    pub fn nodes(&self) -> &Nodes<T> {
        &self.nodes
    }

    /// The comparator ordering the values.
    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.nodes.value(self.root).is_none()
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.nodes.len()
        }
    }

    /// Height of the tree; a tree with only a root has height 0.
    pub fn height(&self) -> usize {
        self.nodes.height(self.root)
    }

    /// The value held by `id`.
    ///
    /// # Panics
    ///
    /// If `id` belonged to a node that has since been removed.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.nodes.value(id)
    }

    /// Inserts `value` and returns the node holding it. If an equal value is already present,
    /// nothing changes and that node is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let first = tree.insert(1);
    ///
    /// assert_eq!(tree.insert(1), first);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> NodeId {
        self.insert_at(self.root, value)
    }

    fn insert_at(&mut self, at: NodeId, value: T) -> NodeId {
        let mut current = at;
        loop {
            let Some(existing) = self.nodes.value(current) else {
                self.nodes.set_value(current, Some(value));
                return current;
            };

            match self.comparator.compare(&value, existing) {
                Ordering::Less => match self.nodes.left(current) {
                    Some(left) => current = left,
                    None => {
                        let node = self.nodes.insert_node(Some(value));
                        self.nodes.set_left(current, Some(node));
                        return node;
                    }
                },
                Ordering::Equal => return current,
                Ordering::Greater => match self.nodes.right(current) {
                    Some(right) => current = right,
                    None => {
                        let node = self.nodes.insert_node(Some(value));
                        self.nodes.set_right(current, Some(node));
                        return node;
                    }
                },
            }
        }
    }

    /// Finds the node holding a value equal to `value`.
    pub fn find(&self, value: &T) -> Option<NodeId> {
        self.find_from(self.root, value)
    }

    /// Like [`find`][Self::find] but only searches the subtree rooted at `at`.
    pub fn find_from(&self, at: NodeId, value: &T) -> Option<NodeId> {
        let mut current = at;
        loop {
            let existing = self.nodes.value(current)?;
            current = match self.comparator.compare(value, existing) {
                Ordering::Less => self.nodes.left(current)?,
                Ordering::Equal => return Some(current),
                Ordering::Greater => self.nodes.right(current)?,
            };
        }
    }

    /// Whether the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The node with the smallest value in the subtree rooted at `at`.
    pub fn find_min(&self, at: NodeId) -> NodeId {
        let mut current = at;
        while let Some(left) = self.nodes.left(current) {
            current = left;
        }
        current
    }

    /// Removes the value equal to `value` and returns it. Fails with [`TreeError::NotFound`],
    /// leaving the tree untouched, if there is no such value.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.remove(&1), Ok(1));
    /// assert_eq!(tree.remove(&1), Err(TreeError::NotFound));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let node = self.find(value).ok_or(TreeError::NotFound)?;
        Ok(self.remove_node(node))
    }

    /// Unlinks the value of `node` from the tree. Whichever node ends up unused is released, so
    /// its parent link goes with it. A node that keeps its place (the root, or a node with two
    /// children that takes over its successor's value) keeps its parent.
    fn remove_node(&mut self, node: NodeId) -> T {
        let parent = self.nodes.parent(node);
        let removed = match (self.nodes.left(node), self.nodes.right(node)) {
            (None, None) => match parent {
                Some(parent) => {
                    tracing::debug!(node = ?node, parent = ?parent, "removing leaf");
                    let detached = self.nodes.remove_child(parent, node);
                    debug_assert!(detached, "parent must hold the node it links to");
                    self.nodes.release(node)
                }
                None => {
                    tracing::debug!(node = ?node, "emptying root");
                    self.nodes.set_value(node, None)
                }
            },
            (Some(_), Some(right)) => {
                let successor = self.find_min(right);
                if !self.nodes.node_comparator().equal(&successor, &right) {
                    tracing::debug!(node = ?node, successor = ?successor, "promoting successor");
                    let promoted = self.remove_node(successor);
                    self.nodes.set_value(node, Some(promoted))
                } else {
                    // The right child has no left subtree, so splice it out directly.
                    tracing::debug!(node = ?node, successor = ?right, "splicing right child");
                    let promoted = self.nodes.set_value(right, None);
                    let right_subtree = self.nodes.set_right(right, None);
                    self.nodes.set_right(node, right_subtree);
                    self.nodes.release(right);
                    self.nodes.set_value(node, promoted)
                }
            }
            (Some(child), None) | (None, Some(child)) => match parent {
                Some(parent) => {
                    tracing::debug!(node = ?node, child = ?child, "lifting only child");
                    let replaced = self.nodes.replace_child(parent, Some(node), Some(child));
                    debug_assert!(replaced, "parent must hold the node it links to");
                    self.nodes.set_parent(child, Some(parent));
                    self.nodes.release(node)
                }
                None => {
                    tracing::debug!(node = ?node, child = ?child, "copying only child into root");
                    let removed = self.nodes.set_value(node, None);
                    self.nodes.copy_node(child, node);
                    self.nodes.release(child);
                    removed
                }
            },
        };

        removed.expect("only nodes holding a value are removed")
    }

    /// All values in comparator order.
    pub fn traverse_in_order(&self) -> Vec<&T> {
        self.nodes.traverse_in_order(self.root)
    }

    /// The values in order, formatted with `format` and joined with `,`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.to_string_with(|x| format!("<{x}>")), "<1>,<2>");
    /// ```
    pub fn to_string_with<F>(&self, format: F) -> String
    where
        F: Fn(&T) -> String,
    {
        self.traverse_in_order()
            .into_iter()
            .map(format)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.traverse_in_order().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
