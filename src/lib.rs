//! A Binary Search Tree whose nodes know their parents, with the ordering supplied by a
//! [`Comparator`].
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored values. It is made of nodes, each holding a value and up to two children, with these
//! invariants:
//!
//! 1. For every node, all the nodes in its left subtree have a value less than its own value.
//! 2. For every node, all the nodes in its right subtree have a value greater than its own value.
//!
//! Searching takes `O(height)` and visiting the left subtree, then the node, then the right
//! subtree lists the values in order. Nothing here rebalances the tree, so the height depends on
//! the insertion order.
//!
//! ## Layout
//!
//! - [`comparator`]: the three-way ordering wrapper used for values and for node identity.
//! - [`node`]: plain binary tree nodes with parent links, stored in an arena and addressed by
//!   [`NodeId`]. Also has the height, balance factor and uncle queries.
//! - [`tree`]: the BST itself. Insert, find, and the three-case removal.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for x in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(x);
//! }
//!
//! // 50 has two children, so its successor (60) moves up into the root.
//! tree.remove(&50).unwrap();
//! assert_eq!(tree.value(tree.root()), Some(&60));
//! assert_eq!(tree.to_string(), "20,30,40,60,70,80");
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod comparator;
mod error;
pub mod node;
pub mod tree;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}

pub use comparator::Comparator;
pub use error::{Result, TreeError};
pub use node::{Node, NodeId, Nodes};
pub use tree::Tree;
