//! An ordered set stored in an unbalanced BST. Each node owns its children through a `Box`, so
//! every node has exactly one owner (its parent, or the `Tree` for the root) and cycles cannot be
//! built.
//!
//! # Examples
//!
//! ```
//! use bst_set::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Inserting the same value again is rejected.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a value reports whether it was there.
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// An owning child position. `None` is an empty subtree.
type Link<T> = Option<Box<Node<T>>>;

/// A set of distinct values kept in a Binary Search Tree ordered by `T`'s [`Ord`]
/// implementation. The tree never rebalances, so its height depends on insertion order.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    /// Two trees are equal when they hold the same values, regardless of shape.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value from the set.
    ///
    /// Nodes are torn down with an explicit stack rather than by recursive `Drop`, so even a
    /// tree that degenerated into a long chain is released without exhausting the call stack.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Returns the smallest value in the set.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the set has no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.first(), Err(Error::Empty));
    ///
    /// tree.extend([3, 1, 2]);
    /// assert_eq!(tree.first(), Ok(&1));
    /// ```
    pub fn first(&self) -> Result<&T> {
        let mut node = self.root.as_deref().ok_or(Error::Empty)?;
        while let Some(left) = node.left() {
            node = left;
        }
        Ok(&node.value)
    }

    /// Returns the largest value in the set.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the set has no values.
    pub fn last(&self) -> Result<&T> {
        let mut node = self.root.as_deref().ok_or(Error::Empty)?;
        while let Some(right) = node.right() {
            node = right;
        }
        Ok(&node.value)
    }

    /// Iterates over the values in ascending order. Every call starts a fresh traversal of the
    /// tree as it currently is.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// let values: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(values, [1, 3, 4, 5, 7, 8, 9]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a single value a
    /// height of 1. Inserting values in sorted order gives a height equal to [`len`][Self::len].
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// A view of the values in `[from, to)`. Range views are not provided by this set.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn sub_set(&self, _from: &T, _to: &T) -> Result<Iter<'_, T>> {
        Err(unsupported("sub_set"))
    }

    /// A view of the values below `to`. Range views are not provided by this set.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn head_set(&self, _to: &T) -> Result<Iter<'_, T>> {
        Err(unsupported("head_set"))
    }

    /// A view of the values at or above `from`. Range views are not provided by this set.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn tail_set(&self, _from: &T) -> Result<Iter<'_, T>> {
        Err(unsupported("tail_set"))
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Adds `value` to the set. Returns `false`, dropping `value` and leaving the stored one in
    /// place, if an equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let slot = locate_mut(&mut self.root, &value);
        if slot.is_some() {
            trace!("value already present, insert rejected");
            return false;
        }

        *slot = Some(Node::new_boxed(value));
        self.len += 1;
        true
    }

    /// Whether an equal value is in the set.
    pub fn contains(&self, value: &T) -> bool {
        self.locate(value)
            .is_some_and(|node| value.cmp(&node.value) == Ordering::Equal)
    }

    /// Removes the value equal to `value`, returning whether one was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes the value equal to `value` and hands it back. If the set holds no such value,
    /// nothing happens and `None` is returned.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let slot = locate_mut(&mut self.root, value);
        let (removed, replacement) = slot.take()?.unlink();
        *slot = replacement;
        self.len -= 1;
        Some(removed)
    }

    /// Returns the node holding a value equal to `value` or, if there is none, the node a new
    /// leaf for `value` would hang from. `None` only for an empty tree.
    fn locate(&self, value: &T) -> Option<&Node<T>> {
        let mut node = self.root.as_deref()?;
        loop {
            let next = match value.cmp(&node.value) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
            match next {
                Some(child) => node = child,
                None => return Some(node),
            }
        }
    }

    /// Checks the BST order over every node (each value lies strictly between the bounds set by
    /// its ancestors) and that `len` counts exactly the reachable nodes.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> bool {
        let mut reachable = 0;
        let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> = self
            .root
            .as_deref()
            .map(|root| (root, None, None))
            .into_iter()
            .collect();

        while let Some((node, lower, upper)) = stack.pop() {
            reachable += 1;
            if lower.is_some_and(|lower| *lower >= node.value)
                || upper.is_some_and(|upper| *upper <= node.value)
            {
                return false;
            }
            if let Some(left) = node.left() {
                stack.push((left, lower, Some(&node.value)));
            }
            if let Some(right) = node.right() {
                stack.push((right, Some(&node.value), upper));
            }
        }

        reachable == self.len
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the set, yielding its values in ascending order.
    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::take(&mut self.len);
        IntoIter::new(self.root.take(), len)
    }
}

fn unsupported(operation: &'static str) -> Error {
    debug!(operation, "range view requested");
    Error::Unsupported { operation }
}

/// Descends from `link` towards `value` and returns the slot the descent ends in: the slot owning
/// the node equal to `value`, or, when there is none, the vacant child slot of the attachment
/// point. For an empty tree that is `link` itself.
fn locate_mut<'a, T>(mut link: &'a mut Link<T>, value: &T) -> &'a mut Link<T>
where
    T: Ord,
{
    loop {
        link = match (link.as_ref().map(|node| value.cmp(&node.value)), link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, link) => return link,
        };
    }
}

/// Detaches the minimum node of the subtree in `link`. The minimum has no left child, so its right
/// child (if any) takes over the slot it occupied.
fn detach_min<T>(mut link: &mut Link<T>) -> Link<T> {
    loop {
        link = match (link.as_ref().is_some_and(|n| n.left.is_some()), link) {
            (true, Some(node)) => &mut node.left,
            (_, link) => {
                let mut min = link.take()?;
                *link = min.right.take();
                return Some(min);
            }
        };
    }
}

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Takes this node out of the tree. Returns its value and the subtree that must fill the slot
    /// the node was in.
    fn unlink(self: Box<Self>) -> (T, Link<T>) {
        let Node { value, left, right } = *self;
        let replacement = match (left, right) {
            (None, None) => {
                trace!("removing leaf");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("replacing node with its only child");
                Some(child)
            }
            (Some(left), Some(right)) => {
                trace!("promoting in-order successor");
                Some(Self::promote_successor(left, right))
            }
        };
        (value, replacement)
    }

    /// Builds the replacement for a node with two children. The in-order successor (the minimum
    /// of `right`) is detached and adopts `left` and the rest of `right`.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       target                  succ
    ///      /      \                /    \
    ///    left    right    ->    left   right
    ///            /                      /
    ///          ...                    ...
    ///          /                      /
    ///        succ                   succ_right
    ///          \
    ///          succ_right
    /// ```
    ///
    /// When `right` has no left child it is the successor itself and keeps its own right subtree.
    fn promote_successor(left: Box<Self>, right: Box<Self>) -> Box<Self> {
        let mut rest = Some(right);
        let Some(mut successor) = detach_min(&mut rest) else {
            unreachable!("a non-empty subtree always has a minimum");
        };
        successor.left = Some(left);
        successor.right = rest;
        successor
    }
}

/// An ascending iterator over the values of a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose left subtree has been yielded but which themselves (and their right subtree)
    /// have not.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_edge(root);
        iter
    }

    fn push_left_edge(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.remaining -= 1;
        self.push_left_edge(node.right());
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning ascending iterator over the values of a [`Tree`].
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_edge(root);
        iter
    }

    /// Pushes the left edge of `link`, cutting each node loose from its left child so that popped
    /// nodes only ever still own a right subtree.
    fn push_left_edge(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.remaining -= 1;
        self.push_left_edge(node.right.take());
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
