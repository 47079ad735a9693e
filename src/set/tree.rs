//! Mutable ordered set based on an AVL tree.
//!
//! This module provides [`BalancedTreeSet`], a binary search tree that keeps
//! itself height-balanced with AVL rotations after every insertion.
//!
//! # Overview
//!
//! - O(log N) add
//! - O(log N) contains
//! - O(1) size and height
//! - O(N) preorder / inorder / postorder traversal
//!
//! Balancing is a construction-time switch. With it turned off the tree is a
//! plain binary search tree, which degrades to a linked chain (and O(N)
//! operations) under sorted insertion order.
//!
//! # Examples
//!
//! ```rust
//! use setkit::set::BalancedTreeSet;
//!
//! let mut balanced = BalancedTreeSet::new();
//! let mut plain = BalancedTreeSet::with_balancing(false);
//! for element in 1..=3 {
//!     balanced.add(element);
//!     plain.add(element);
//! }
//!
//! assert_eq!(balanced.height(), 1);
//! assert_eq!(plain.height(), 2);
//! ```
//!
//! # Internal Structure
//!
//! Nodes live in an arena owned by the set. Every node stores its children,
//! a back-reference to its parent (used only to walk up after an insertion
//! and to re-attach rotated subtrees) and the cached height of its subtree.
//!
//! When balancing is enabled the tree maintains, for every node:
//! 1. all of the left subtree < element < all of the right subtree
//! 2. |height(left) - height(right)| <= 1, where height(empty) = -1

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use super::arena::{Arena, NodeId};
use super::{Set, SetError};

// =============================================================================
// Rotation Cases
// =============================================================================

/// The four AVL imbalance shapes, named after the path from the unbalanced
/// node towards the inserted leaf.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Rotation {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

impl Rotation {
    const fn label(self) -> &'static str {
        match self {
            Self::LeftLeft => "LL",
            Self::LeftRight => "LR",
            Self::RightRight => "RR",
            Self::RightLeft => "RL",
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone)]
struct Node<T> {
    element: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Back-reference only; never used to release anything.
    parent: Option<NodeId>,
    /// Edge count of the longest path down to a leaf.
    height: isize,
}

impl<T> Node<T> {
    const fn leaf(element: T, parent: Option<NodeId>) -> Self {
        Self {
            element,
            left: None,
            right: None,
            parent,
            height: 0,
        }
    }
}

/// Where a new element would hang: `None` for the root of an empty tree,
/// otherwise the parent and the side (`Less` = left, `Greater` = right).
type Slot = Option<(NodeId, Ordering)>;

enum Probe {
    Found,
    Vacant(Slot),
}

// =============================================================================
// BalancedTreeSet Definition
// =============================================================================

/// A mutable ordered set based on an AVL tree.
///
/// Elements must implement `Ord`. Inserting keeps the binary-search-tree
/// order and, when balancing is enabled, the AVL height invariant.
///
/// # Time Complexity
///
/// | Operation   | Balanced   | Unbalanced (worst case) |
/// |-------------|------------|-------------------------|
/// | `add`       | O(log N)   | O(N)                    |
/// | `contains`  | O(log N)   | O(N)                    |
/// | `len`       | O(1)       | O(1)                    |
/// | `height`    | O(1)       | O(1)                    |
/// | `clone`     | O(N)       | O(N)                    |
///
/// # Examples
///
/// ```rust
/// use setkit::set::BalancedTreeSet;
///
/// let mut set = BalancedTreeSet::new();
/// set.add("pear".to_string());
/// set.add("apple".to_string());
/// set.add("pear".to_string());
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("apple"));
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec!["apple", "pear"]);
/// ```
pub struct BalancedTreeSet<T> {
    nodes: Arena<Node<T>>,
    root: Option<NodeId>,
    balancing: bool,
}

impl<T> BalancedTreeSet<T> {
    /// Creates a new empty set that rebalances after every insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let set: BalancedTreeSet<i32> = BalancedTreeSet::new();
    /// assert!(set.is_empty());
    /// assert!(set.is_balancing());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_balancing(true)
    }

    /// Creates a new empty set, choosing whether it rebalances.
    ///
    /// With `balancing` set to `false` the set behaves as a plain binary
    /// search tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let mut set = BalancedTreeSet::with_balancing(false);
    /// for element in 0..10 {
    ///     set.add(element);
    /// }
    /// assert_eq!(set.height(), 9);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_balancing(balancing: bool) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            balancing,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Returns `true` if this set rebalances after insertions.
    #[inline]
    #[must_use]
    pub const fn is_balancing(&self) -> bool {
        self.balancing
    }

    /// Returns the height of the tree: the number of edges on the longest
    /// path from the root to a leaf, or `-1` for an empty tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let mut set = BalancedTreeSet::new();
    /// assert_eq!(set.height(), -1);
    /// set.add(7);
    /// assert_eq!(set.height(), 0);
    /// ```
    #[must_use]
    pub fn height(&self) -> isize {
        self.height_of(self.root)
    }

    /// Calls `visit` on every element in preorder (node, left, right).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let set: BalancedTreeSet<i32> = [1, 2, 3].into_iter().collect();
    /// let mut visited = Vec::new();
    /// set.preorder(|element| visited.push(*element));
    /// assert_eq!(visited, vec![2, 1, 3]);
    /// ```
    pub fn preorder<F: FnMut(&T)>(&self, mut visit: F) {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            visit(&node.element);
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Calls `visit` on every element in inorder (left, node, right), which
    /// is ascending order.
    pub fn inorder<F: FnMut(&T)>(&self, visit: F) {
        self.iter().for_each(visit);
    }

    /// Calls `visit` on every element in postorder (left, right, node).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let set: BalancedTreeSet<i32> = [1, 2, 3].into_iter().collect();
    /// let mut visited = Vec::new();
    /// set.postorder(|element| visited.push(*element));
    /// assert_eq!(visited, vec![1, 3, 2]);
    /// ```
    pub fn postorder<F: FnMut(&T)>(&self, mut visit: F) {
        // The flag marks nodes whose children are already on the stack.
        let mut stack: Vec<(NodeId, bool)> = self.root.map(|id| (id, false)).into_iter().collect();
        while let Some((id, expanded)) = stack.pop() {
            let node = &self.nodes[id];
            if expanded {
                visit(&node.element);
            } else {
                stack.push((id, true));
                stack.extend(node.right.map(|right| (right, false)));
                stack.extend(node.left.map(|left| (left, false)));
            }
        }
    }

    /// Returns an iterator over the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let set: BalancedTreeSet<i32> = [3, 1, 2].into_iter().collect();
    /// let collected: Vec<&i32> = set.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> BalancedTreeSetIterator<'_, T> {
        let mut iterator = BalancedTreeSetIterator {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iterator.push_left_spine(self.root);
        iterator
    }

    fn height_of(&self, node: Option<NodeId>) -> isize {
        node.map_or(-1, |id| self.nodes[id].height)
    }

    fn balance_factor(&self, id: NodeId) -> isize {
        let node = &self.nodes[id];
        self.height_of(node.left) - self.height_of(node.right)
    }

    fn refresh_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[id].height = height;
    }

    /// Points whatever referenced `old` (its parent, or the root slot) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let node = &mut self.nodes[parent];
                if node.left == Some(old) {
                    node.left = Some(new);
                } else {
                    node.right = Some(new);
                }
            }
        }
    }

    /// Lifts the left child of `pivot` into its place and returns it.
    fn rotate_right(&mut self, pivot: NodeId) -> NodeId {
        let Some(lifted) = self.nodes[pivot].left else {
            return pivot;
        };
        let inner = self.nodes[lifted].right;
        let parent = self.nodes[pivot].parent;

        self.nodes[pivot].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }
        self.nodes[lifted].right = Some(pivot);
        self.nodes[pivot].parent = Some(lifted);
        self.nodes[lifted].parent = parent;
        self.replace_child(parent, pivot, lifted);

        self.refresh_height(pivot);
        self.refresh_height(lifted);
        lifted
    }

    /// Lifts the right child of `pivot` into its place and returns it.
    fn rotate_left(&mut self, pivot: NodeId) -> NodeId {
        let Some(lifted) = self.nodes[pivot].right else {
            return pivot;
        };
        let inner = self.nodes[lifted].left;
        let parent = self.nodes[pivot].parent;

        self.nodes[pivot].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }
        self.nodes[lifted].left = Some(pivot);
        self.nodes[pivot].parent = Some(lifted);
        self.nodes[lifted].parent = parent;
        self.replace_child(parent, pivot, lifted);

        self.refresh_height(pivot);
        self.refresh_height(lifted);
        lifted
    }

    /// Applies `case` at `unbalanced` and returns the new root of that subtree.
    fn rotate(&mut self, unbalanced: NodeId, case: Rotation) -> NodeId {
        tracing::trace!(case = case.label(), "rebalancing subtree");
        match case {
            Rotation::LeftLeft => self.rotate_right(unbalanced),
            Rotation::RightRight => self.rotate_left(unbalanced),
            Rotation::LeftRight => {
                if let Some(left) = self.nodes[unbalanced].left {
                    self.rotate_left(left);
                }
                self.rotate_right(unbalanced)
            }
            Rotation::RightLeft => {
                if let Some(right) = self.nodes[unbalanced].right {
                    self.rotate_right(right);
                }
                self.rotate_left(unbalanced)
            }
        }
    }
}

impl<T: Ord> BalancedTreeSet<T> {
    /// Returns `true` if the set contains the specified element.
    ///
    /// The element may be any borrowed form of the set's element type, but
    /// the ordering on the borrowed form must match the ordering on the
    /// element type.
    ///
    /// # Complexity
    ///
    /// O(log N) when balanced, O(N) worst case otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let mut set = BalancedTreeSet::new();
    /// set.add("hello".to_string());
    ///
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("world"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match element.cmp(node.element.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Adds an element to the set.
    ///
    /// Returns `true` if the element was newly inserted and `false` if an
    /// equal element was already present (in which case nothing changes).
    ///
    /// # Complexity
    ///
    /// O(log N) when balanced, O(N) worst case otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::BalancedTreeSet;
    ///
    /// let mut set = BalancedTreeSet::new();
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        match self.locate(&element) {
            Probe::Found => false,
            Probe::Vacant(slot) => {
                self.attach(element, slot);
                true
            }
        }
    }

    /// Adds an element, reporting allocation failure instead of aborting.
    ///
    /// On `Err` the set is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if room for the new node could not
    /// be reserved.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        match self.locate(&element) {
            Probe::Found => Ok(false),
            Probe::Vacant(slot) => {
                self.nodes.try_reserve(1)?;
                self.attach(element, slot);
                Ok(true)
            }
        }
    }

    fn locate(&self, element: &T) -> Probe {
        let mut slot = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            let side = element.cmp(&node.element);
            current = match side {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Probe::Found,
            };
            slot = Some((id, side));
        }
        Probe::Vacant(slot)
    }

    fn attach(&mut self, element: T, slot: Slot) {
        let parent = slot.map(|(parent, _)| parent);
        let leaf = self.nodes.alloc(Node::leaf(element, parent));
        match slot {
            None => self.root = Some(leaf),
            Some((parent, Ordering::Less)) => self.nodes[parent].left = Some(leaf),
            Some((parent, _)) => self.nodes[parent].right = Some(leaf),
        }
        if let Some(parent) = parent {
            self.retrace(parent, leaf);
        }
    }

    /// Walks from `start` up to the root, refreshing cached heights and
    /// rotating wherever the balance factor leaves `-1..=1`.
    fn retrace(&mut self, start: NodeId, leaf: NodeId) {
        let mut current = Some(start);
        while let Some(id) = current {
            let previous_height = self.nodes[id].height;
            self.refresh_height(id);

            if !self.balancing {
                if self.nodes[id].height == previous_height {
                    break;
                }
                current = self.nodes[id].parent;
                continue;
            }

            let subtree_root = self
                .rotation_case(id, leaf)
                .map_or(id, |case| self.rotate(id, case));
            current = self.nodes[subtree_root].parent;
        }
    }

    /// Classifies the imbalance at `ancestor` by comparing the inserted
    /// element with the ancestor and with the ancestor's heavy child.
    fn rotation_case(&self, ancestor: NodeId, leaf: NodeId) -> Option<Rotation> {
        let factor = self.balance_factor(ancestor);
        let node = &self.nodes[ancestor];
        let element = &self.nodes[leaf].element;

        match (element.cmp(&node.element), factor) {
            (Ordering::Less, 2..) => {
                let heavy = &self.nodes[node.left?].element;
                Some(if element < heavy {
                    Rotation::LeftLeft
                } else {
                    Rotation::LeftRight
                })
            }
            (Ordering::Greater, ..=-2) => {
                let heavy = &self.nodes[node.right?].element;
                Some(if element > heavy {
                    Rotation::RightRight
                } else {
                    Rotation::RightLeft
                })
            }
            _ => None,
        }
    }
}

impl<T: Clone> BalancedTreeSet<T> {
    /// Deep-copies the set, reporting allocation failure instead of aborting.
    ///
    /// The copy has the same shape as the source: same root, same height,
    /// same traversal orders.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if the node storage could not be
    /// allocated. Nothing is leaked in that case.
    pub fn try_clone(&self) -> Result<Self, SetError> {
        Ok(Self {
            nodes: self.nodes.try_clone()?,
            root: self.root,
            balancing: self.balancing,
        })
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// An iterator over the elements of a [`BalancedTreeSet`] in ascending order.
pub struct BalancedTreeSetIterator<'a, T> {
    nodes: &'a Arena<Node<T>>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<T> BalancedTreeSetIterator<'_, T> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.nodes[id].left;
        }
    }
}

impl<'a, T> Iterator for BalancedTreeSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let nodes = self.nodes;
        self.push_left_spine(nodes[id].right);
        self.remaining -= 1;
        Some(&nodes[id].element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for BalancedTreeSetIterator<'_, T> {}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Ord> Set<T> for BalancedTreeSet<T> {
    fn add(&mut self, element: T) {
        Self::add(self, element);
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Clone> Clone for BalancedTreeSet<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            balancing: self.balancing,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
        self.root = source.root;
        self.balancing = source.balancing;
    }
}

impl<T> Default for BalancedTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for BalancedTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for BalancedTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a BalancedTreeSet<T> {
    type Item = &'a T;
    type IntoIter = BalancedTreeSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for BalancedTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BalancedTreeSet<T> {}

impl<T: fmt::Debug> fmt::Debug for BalancedTreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

static_assertions::assert_impl_all!(BalancedTreeSet<i32>: Send, Sync, Clone, Default);

// =============================================================================
// Tests
// =============================================================================
