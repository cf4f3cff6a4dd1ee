//! An ordered set backed by an unbalanced Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one value
//! and may have up to two child `Node`s. The most important invariants
//! of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Because both comparisons are strict, a value can be stored at most once, so
//! the tree behaves as a set. Searching takes `O(height)`. This tree does not
//! rebalance itself, so inserting values in sorted order produces a tree whose
//! height equals its size. BSTs also naturally support sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree.
//!
//! # Examples
//!
//! ```
//! use bst_set::{Error, Tree};
//!
//! let mut tree: Tree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.first(), Ok(&1));
//! assert_eq!(tree.last(), Ok(&9));
//!
//! // Values are unique.
//! assert!(!tree.insert(5));
//!
//! assert!(tree.remove(&5));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
//!
//! tree.clear();
//! assert_eq!(tree.first(), Err(Error::Empty));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::Tree;
