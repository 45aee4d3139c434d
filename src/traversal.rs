//! Walks over a [`Tree`]: a lazy in-order iterator, the classic depth-first and breadth-first
//! listings, and the path between two stored elements.
//!
//! The listings hand out references to the stored elements. For a tree built from
//! `[50, 25, 75, 12, 37, 15]`:
//!
//! ```text
//!        25
//!      /    \
//!    12      50
//!      \    /  \
//!      15  37   75
//! ```
//!
//! ```
//! use avl::Tree;
//!
//! let tree = Tree::from([50, 25, 75, 12, 37, 15]);
//!
//! assert_eq!(tree.preorder(), [&25, &12, &15, &50, &37, &75]);
//! assert_eq!(tree.inorder(), [&12, &15, &25, &37, &50, &75]);
//! assert_eq!(tree.postorder(), [&15, &12, &37, &75, &50, &25]);
//! assert_eq!(tree.levelorder(), [&25, &12, &50, &15, &37, &75]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::tree::{Node, Tree};

/// An in-order iterator over the elements of a [`Tree`], created by [`Tree::iter`]. It holds the
/// path to the next element, so it needs memory proportional to the tree's height.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Tree<T> {
    /// Iterates over the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree = Tree::from([3, 1, 2]);
    /// assert!(tree.iter().eq([1, 2, 3].iter()));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Lists each node before its left subtree, then its right subtree.
    pub fn preorder(&self) -> Vec<&T> {
        fn walk<'a, T>(node: Option<&'a Node<T>>, out: &mut Vec<&'a T>) {
            if let Some(node) = node {
                out.push(&node.value);
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
            }
        }

        let mut out = Vec::with_capacity(self.len());
        walk(self.root.as_deref(), &mut out);
        out
    }

    /// Lists the elements in ascending order. See [`Tree::iter`] for a lazy version.
    pub fn inorder(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Lists each node after both of its subtrees.
    pub fn postorder(&self) -> Vec<&T> {
        fn walk<'a, T>(node: Option<&'a Node<T>>, out: &mut Vec<&'a T>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
                out.push(&node.value);
            }
        }

        let mut out = Vec::with_capacity(self.len());
        walk(self.root.as_deref(), &mut out);
        out
    }

    /// Lists the elements level by level from the root down, left to right within a level.
    pub fn levelorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        let mut queue: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = queue.pop_front() {
            out.push(&node.value);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        out
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Returns the stored elements on the unique path from `from` to `to`, both included. The path
    /// climbs from `from` to the deepest ancestor the two elements share and then descends to
    /// `to`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when either element is not stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree = Tree::from([50, 25, 75, 12, 37, 15]);
    ///
    /// assert_eq!(tree.path_between(&15, &37), Ok(vec![&15, &12, &25, &50, &37]));
    /// assert_eq!(tree.path_between(&50, &37), Ok(vec![&50, &37]));
    /// assert_eq!(tree.path_between(&75, &75), Ok(vec![&75]));
    /// ```
    pub fn path_between(&self, from: &T, to: &T) -> Result<Vec<&T>> {
        if !self.contains(from) || !self.contains(to) {
            return Err(Error::NotFound);
        }

        // Find the deepest node that holds one of the two or sits between them.
        let mut ancestor = self.root.as_deref().ok_or(Error::NotFound)?;
        loop {
            let next = match (from.cmp(&ancestor.value), to.cmp(&ancestor.value)) {
                (Ordering::Less, Ordering::Less) => ancestor.left.as_deref(),
                (Ordering::Greater, Ordering::Greater) => ancestor.right.as_deref(),
                _ => break,
            };
            match next {
                Some(next) => ancestor = next,
                None => break,
            }
        }

        let mut path: Vec<&T> = descend(ancestor, from).into_iter().rev().collect();
        path.push(&ancestor.value);
        path.extend(descend(ancestor, to));
        Ok(path)
    }
}

/// The elements visited while searching for `target` below `start`, excluding `start` itself.
fn descend<'a, T>(start: &'a Node<T>, target: &T) -> Vec<&'a T>
where
    T: Ord,
{
    let mut visited = Vec::new();
    let mut node = start;
    loop {
        let next = match target.cmp(&node.value) {
            Ordering::Less => node.left.as_deref(),
            Ordering::Equal => break,
            Ordering::Greater => node.right.as_deref(),
        };
        let Some(next) = next else {
            break;
        };
        visited.push(&next.value);
        node = next;
    }
    visited
}
