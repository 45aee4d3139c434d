//! This crate exposes a self-balancing Binary Search Tree (BST), specifically an AVL tree, mostly
//! for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Inserting sorted values into a plain BST makes
//! its height grow linearly, though.
//!
//! ## AVL trees
//!
//! An AVL tree adds a third invariant: for every `Node`, the heights of its two subtrees differ
//! by at most one. Each `Node` caches its own height so that, after an insertion or deletion,
//! the `Node`s along the modified path can notice that they lean too far one way and fix it with
//! one or two rotations. This keeps the height `O(lg N)` no matter what order values arrive in.
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree: Tree<_> = [50, 25, 75, 12, 37, 15].into_iter().collect();
//!
//! assert_eq!(tree.inorder(), [&12, &15, &25, &37, &50, &75]);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.predecessor(&37), Ok(Some(&25)));
//! assert_eq!(tree.k_smallest(3), Ok(vec![&12, &15, &25]));
//!
//! assert_eq!(tree.remove(&25), Ok(25));
//! assert_eq!(tree.inorder(), [&12, &15, &37, &50, &75]);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Tree`] as an ordered sequence of elements.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod traversal;
pub mod tree;

#[cfg(feature = "serde")]
mod serde_impl;


pub use error::{Error, Result};
pub use traversal::Iter;
pub use tree::Tree;
