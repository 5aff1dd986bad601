//! Plain binary tree nodes with parent links.
//!
//! Nodes live in a [`Nodes`] arena and refer to each other with [`NodeId`] handles. A node owns
//! the children in its `left`/`right` slots while its `parent` is only a back-reference, so
//! there are no reference cycles to worry about. Child slots are only changed through
//! [`Nodes::set_left`]/[`Nodes::set_right`] (which keep the parent links in sync) and the two
//! lower level primitives [`Nodes::remove_child`]/[`Nodes::replace_child`] (which don't).
//!
//! # Examples
//!
//! ```
//! use parent_bst::Nodes;
//!
//! let mut nodes = Nodes::new();
//! let root = nodes.insert_node(Some(2));
//! let left = nodes.insert_node(Some(1));
//! let right = nodes.insert_node(Some(3));
//!
//! nodes.set_left(root, Some(left));
//! nodes.set_right(root, Some(right));
//!
//! assert_eq!(nodes.parent(left), Some(root));
//! assert_eq!(nodes.height(root), 1);
//! assert_eq!(nodes.traverse_in_order(root), vec![&1, &2, &3]);
//! ```

use crate::comparator::Comparator;

/// A handle to a node in a [`Nodes`] arena.
///
/// Released slots are reused, but each reuse bumps the slot's generation, so a handle to a
/// released node never matches the node that takes its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// The arena slot this handle points at.
    pub fn index(self) -> usize {
        self.index
    }
}

/// A single node. The value is optional so a node can exist before it holds anything (e.g. the
/// root of an empty tree).
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: Option<T>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(value: Option<T>) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// The stored value, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The left child.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right child.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The node holding this one in one of its child slots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Arena of binary tree nodes.
///
/// Besides the nodes themselves this holds the comparator used to decide whether two handles
/// name the same node. By default that is plain handle equality.
#[derive(Clone, Debug)]
pub struct Nodes<T> {
    slots: Vec<Slot<T>>,
    /// Indices of released slots, reused by `insert_node`.
    free: Vec<usize>,
    node_comparator: Comparator<NodeId>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Nodes<T> {
    /// An empty arena comparing nodes by identity.
    pub fn new() -> Self {
        Self::with_node_comparator(Comparator::default())
    }

    /// An empty arena using `node_comparator` to match nodes in
    /// [`remove_child`][Self::remove_child], [`replace_child`][Self::replace_child] and
    /// [`uncle`][Self::uncle].
    pub fn with_node_comparator(node_comparator: Comparator<NodeId>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            node_comparator,
        }
    }

    /// The comparator used to match nodes.
    pub fn node_comparator(&self) -> &Comparator<NodeId> {
        &self.node_comparator
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether there are no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocates a new detached node.
    pub fn insert_node(&mut self, value: Option<T>) -> NodeId {
        let node = Node::new(value);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        tracing::trace!(node = ?id, "allocated node");
        id
    }

    /// Frees a single node and returns its value. The node should already be detached from its
    /// parent. Children still pointing back at it lose their parent link but are not freed.
    ///
    /// # Panics
    ///
    /// If `id` has already been released.
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        let node = self.take_node(id).expect("released node must be live");

        for child in [node.left, node.right].into_iter().flatten() {
            if let Some(child) = self.get_mut(child) {
                if child.parent == Some(id) {
                    child.parent = None;
                }
            }
        }
        tracing::trace!(node = ?id, "released node");

        node.value
    }

    /// Frees the subtree rooted at `id`, unhooking it from its parent first if it has one.
    ///
    /// # Panics
    ///
    /// If `id` has already been released.
    pub fn discard(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = self.take_node(next).expect("subtree nodes must be live");
            stack.extend(node.left);
            stack.extend(node.right);
        }
    }

    /// Empties the slot behind `id` and queues it for reuse under the next generation.
    fn take_node(&mut self, id: NodeId) -> Option<Node<T>> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    /// The node behind `id`, or `None` if it was released.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.get(id).expect("NodeId must refer to a live node")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.get_mut(id).expect("NodeId must refer to a live node")
    }

    /// The value stored at `id`.
    ///
    /// # Panics
    ///
    /// If `id` was released. The same goes for every other method taking a `NodeId`.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).value()
    }

    /// The left child of `id`.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    /// The right child of `id`.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    /// The parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Replaces the value at `id`, returning the old one. The tree shape is untouched.
    pub fn set_value(&mut self, id: NodeId, value: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.node_mut(id).value, value)
    }

    /// Installs `child` as the left child of `id`. The previous left child (if any) is detached
    /// and returned with its parent link cleared; `child` gets `id` as its parent.
    ///
    /// `child` should be detached beforehand: its old parent's slot is not cleared here.
    pub fn set_left(&mut self, id: NodeId, child: Option<NodeId>) -> Option<NodeId> {
        let previous = self.node_mut(id).left.take();
        if let Some(previous) = previous {
            self.node_mut(previous).parent = None;
        }

        self.node_mut(id).left = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(id);
            tracing::trace!(parent = ?id, child = ?child, "attached left child");
        }

        previous
    }

    /// Installs `child` as the right child of `id`. See [`set_left`][Self::set_left].
    pub fn set_right(&mut self, id: NodeId, child: Option<NodeId>) -> Option<NodeId> {
        let previous = self.node_mut(id).right.take();
        if let Some(previous) = previous {
            self.node_mut(previous).parent = None;
        }

        self.node_mut(id).right = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(id);
            tracing::trace!(parent = ?id, child = ?child, "attached right child");
        }

        previous
    }

    /// Empties whichever child slot of `id` holds `target`. Returns `false` if neither does.
    ///
    /// `target` keeps its parent link; clearing it is up to the caller.
    pub fn remove_child(&mut self, id: NodeId, target: NodeId) -> bool {
        let (left, right) = (self.node(id).left, self.node(id).right);
        if left.is_some_and(|left| self.node_comparator.equal(&left, &target)) {
            self.node_mut(id).left = None;
            return true;
        }
        if right.is_some_and(|right| self.node_comparator.equal(&right, &target)) {
            self.node_mut(id).right = None;
            return true;
        }

        false
    }

    /// Puts `replacement` into whichever child slot of `id` holds `old`. Returns `false` if
    /// either argument is missing or `old` isn't a child of `id`.
    ///
    /// Neither parent link is touched: `replacement` still points at its previous parent until
    /// the caller fixes it.
    pub fn replace_child(
        &mut self,
        id: NodeId,
        old: Option<NodeId>,
        replacement: Option<NodeId>,
    ) -> bool {
        let (Some(old), Some(replacement)) = (old, replacement) else {
            return false;
        };

        let (left, right) = (self.node(id).left, self.node(id).right);
        if left.is_some_and(|left| self.node_comparator.equal(&left, &old)) {
            self.node_mut(id).left = Some(replacement);
            return true;
        }
        if right.is_some_and(|right| self.node_comparator.equal(&right, &old)) {
            self.node_mut(id).right = Some(replacement);
            return true;
        }

        false
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.node_mut(id).parent = parent;
    }

    /// Moves the value and both children of `source` onto `target`, going through
    /// [`set_value`][Self::set_value], [`set_left`][Self::set_left] and
    /// [`set_right`][Self::set_right]. Whatever `target` held before is replaced (its old children
    /// are detached, not freed). `source` is left with no value and no children.
    pub fn copy_node(&mut self, source: NodeId, target: NodeId) {
        let source_node = self.node_mut(source);
        let value = source_node.value.take();
        let left = source_node.left.take();
        let right = source_node.right.take();

        self.set_value(target, value);
        self.set_left(target, left);
        self.set_right(target, right);
    }

    /// Longest path (in edges) from `id` down to a leaf. A leaf has height 0.
    pub fn height(&self, id: NodeId) -> usize {
        // Walked with an explicit stack; an unbalanced tree can be as deep as it is long.
        let mut height = 0;
        let mut stack = vec![(id, 0)];
        while let Some((next, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(next);
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Height contributed by the left child: 0 without one, else one more than its height.
    pub fn left_height(&self, id: NodeId) -> usize {
        self.node(id).left.map_or(0, |left| self.height(left) + 1)
    }

    /// Height contributed by the right child.
    pub fn right_height(&self, id: NodeId) -> usize {
        self.node(id).right.map_or(0, |right| self.height(right) + 1)
    }

    /// Left height minus right height.
    pub fn balance_factor(&self, id: NodeId) -> isize {
        self.left_height(id) as isize - self.right_height(id) as isize
    }

    /// The sibling of this node's parent. Only defined when the grandparent has both children.
    pub fn uncle(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let grandparent = self.node(self.node(parent).parent?);

        let (Some(left), Some(right)) = (grandparent.left, grandparent.right) else {
            return None;
        };
        if self.node_comparator.equal(&parent, &left) {
            Some(right)
        } else {
            Some(left)
        }
    }

    /// The values of the subtree at `id`: left subtree, then `id`, then right subtree. Nodes
    /// without a value are skipped.
    pub fn traverse_in_order(&self, id: NodeId) -> Vec<&T> {
        let mut values = Vec::new();
        let mut stack = Vec::new();
        let mut current = Some(id);
        loop {
            // Push the whole left spine, then visit the lowest pending node and go right.
            while let Some(next) = current {
                stack.push(next);
                current = self.node(next).left;
            }
            let Some(next) = stack.pop() else {
                break;
            };
            let node = self.node(next);
            values.extend(node.value.as_ref());
            current = node.right;
        }
        values
    }
}
