//! A self-balancing BST (specifically, an AVL tree) storing a set of ordered elements. Every node
//! owns its children through a `Box` and caches the height of the subtree it roots. Mutations
//! recurse down to the affected node and, on the way back up, each call hands its caller the new
//! owner of the subtree so the caller can re-link its child slot. That unwind is also where
//! heights are refreshed and rotations restore balance.
//!
//! # Examples
//!
//! ```
//! use avl::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.height(), -1);
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Duplicates are ignored.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing an element hands back the tree's own copy of it.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Err(Error::NotFound));
//! ```

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// An owned, possibly empty, subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// The height of a possibly empty subtree. An empty subtree has a height of -1.
fn height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(-1, |node| node.height)
}

/// A self-balancing Binary Search Tree (an AVL tree). This can be used for inserting, finding,
/// and removing elements while keeping the tree's height logarithmic in its size.
#[derive(Clone)]
pub struct Tree<T> {
    pub(crate) root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
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
    /// Two trees are equal when they hold equal elements, regardless of their shapes.
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

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The height of the tree: -1 when empty, 0 for a single element and the number of edges on
    /// the longest root-to-leaf path otherwise. This reads the height cached on the root and never
    /// walks the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// // Ascending inserts would make a plain BST a linked list.
    /// let tree: Tree<_> = (0..7).collect();
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// Removes every element from the tree.
    pub fn clear(&mut self) {
        debug!(dropped = self.len, "clearing tree");
        self.root = None;
        self.len = 0;
    }

    /// Returns up to the `k` smallest elements in ascending order. Only the part of the tree
    /// holding those elements is visited, so this is cheap when `k` is much smaller than the tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `k` is larger than [`Tree::len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree = Tree::from([50, 25, 75, 12, 37, 15]);
    ///
    /// assert_eq!(tree.k_smallest(3), Ok(vec![&12, &15, &25]));
    /// assert!(tree.k_smallest(0).unwrap().is_empty());
    /// assert!(tree.k_smallest(7).is_err());
    /// ```
    pub fn k_smallest(&self, k: usize) -> Result<Vec<&T>> {
        if k > self.len {
            debug!(k, len = self.len, "k_smallest called with k larger than the tree");
            return Err(Error::InvalidArgument(format!(
                "k ({}) cannot exceed the number of elements in the tree ({})",
                k, self.len
            )));
        }

        let mut smallest = Vec::with_capacity(k);
        collect_smallest(self.root.as_deref(), k, &mut smallest);
        Ok(smallest)
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts `value` into the tree. If an equal element is already stored, the tree is left
    /// untouched (the stored element is kept) and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = insert(self.root.take(), value);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the element equal to `value` from the tree and returns the element that was stored.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no equal element is stored. The tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::from([2, 1, 3]);
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(Error::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let Some(root) = self.root.take() else {
            return Err(Error::NotFound);
        };
        let (root, removed) = remove(root, value);
        self.root = root;
        let removed = removed.ok_or(Error::NotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Returns the stored element equal to `value`. This is the tree's own element, not the
    /// argument, which matters when equal elements are still distinguishable.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no equal element is stored.
    pub fn get(&self, value: &T) -> Result<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Ok(&node.value),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        Err(Error::NotFound)
    }

    /// Whether an element equal to `value` is stored in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_ok()
    }

    /// Returns the largest stored element smaller than `value`, or `None` when `value` is the
    /// smallest element.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when `value` itself is not stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let tree = Tree::from([76, 34, 90, 40, 81]);
    ///
    /// assert_eq!(tree.predecessor(&76), Ok(Some(&40)));
    /// assert_eq!(tree.predecessor(&81), Ok(Some(&76)));
    /// assert_eq!(tree.predecessor(&34), Ok(None));
    /// assert_eq!(tree.predecessor(&35), Err(Error::NotFound));
    /// ```
    pub fn predecessor(&self, value: &T) -> Result<Option<&T>> {
        // The last node at which the search went right. If the target has no left subtree, this
        // is its predecessor.
        let mut last_right_turn: Option<&Node<T>> = None;
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => {
                    let predecessor = match node.left.as_deref() {
                        Some(left) => Some(left.rightmost()),
                        None => last_right_turn,
                    };
                    return Ok(predecessor.map(|node| &node.value));
                }
                Ordering::Greater => {
                    last_right_turn = Some(node);
                    current = node.right.as_deref();
                }
            }
        }

        Err(Error::NotFound)
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    /// Builds a tree by inserting each element in iteration order.
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

impl<T, const N: usize> From<[T; N]> for Tree<T>
where
    T: Ord,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// A `Node` stores one element and two (possibly empty) children along with the height of the
/// subtree it roots.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,

    /// How many edges are on the longest path from this node down to a leaf. A node with no
    /// children has a height of 0.
    height: isize,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree. Positive means left
    /// heavy. See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        height(&self.left) - height(&self.right)
    }

    fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }
}

/// Inserts `value` into the subtree and returns its new root along with whether anything was
/// inserted. Nothing is rebalanced when an equal element was found since no height changed.
fn insert<T>(link: Link<T>, value: T) -> (Box<Node<T>>, bool)
where
    T: Ord,
{
    let Some(mut node) = link else {
        return (Node::new_boxed(value), true);
    };

    let inserted = match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), value);
            node.left = Some(left);
            inserted
        }
        Ordering::Equal => false,
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), value);
            node.right = Some(right);
            inserted
        }
    };

    if inserted {
        (balance(node), true)
    } else {
        (node, false)
    }
}

/// Removes the element equal to `value` from the subtree rooted at `node`. Returns the new root of
/// the subtree and the removed element, if one was found. When nothing is found the subtree comes
/// back exactly as it was passed in.
fn remove<T>(mut node: Box<Node<T>>, value: &T) -> (Link<T>, Option<T>)
where
    T: Ord,
{
    let removed = match value.cmp(&node.value) {
        Ordering::Less => {
            let Some(left) = node.left.take() else {
                return (Some(node), None);
            };
            let (left, removed) = remove(left, value);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let Some(right) = node.right.take() else {
                return (Some(node), None);
            };
            let (right, removed) = remove(right, value);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, Some(node.value)),
            (Some(child), None) | (None, Some(child)) => return (Some(child), Some(node.value)),
            // With two children, this node stays where it is and takes over the value of its
            // successor: the smallest element of the right subtree. That subtree is fully
            // rebalanced by `remove_smallest` before this node is.
            (Some(left), Some(right)) => {
                let (right, successor) = remove_smallest(right);
                node.left = Some(left);
                node.right = right;
                Some(std::mem::replace(&mut node.value, successor))
            }
        },
    };

    match removed {
        Some(removed) => (Some(balance(node)), Some(removed)),
        None => (Some(node), None),
    }
}

/// Splices the leftmost node out of the subtree, returning the new subtree root and the spliced
/// node's value.
fn remove_smallest<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (left, smallest) = remove_smallest(left);
            node.left = left;
            (Some(balance(node)), smallest)
        }
    }
}

/// Refreshes the height of `node` and, if it is out of balance, rotates it back into balance.
/// Returns the new root of the subtree. The children of `node` must already be balanced.
fn balance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.fix_height();

    // See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    let node = match node.balance_factor() {
        factor if factor < -1 => {
            node.right = node.right.take().map(|right| {
                if right.balance_factor() > 0 {
                    rotate_right(right)
                } else {
                    right
                }
            });
            rotate_left(node)
        }
        factor if factor > 1 => {
            node.left = node.left.take().map(|left| {
                if left.balance_factor() < 0 {
                    rotate_left(left)
                } else {
                    left
                }
            });
            rotate_right(node)
        }
        _ => node,
    };

    debug_assert_eq!(
        node.height,
        height(&node.left).max(height(&node.right)) + 1
    );
    debug_assert!(node.balance_factor().abs() <= 1);
    node
}

/// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down
/// vertically. Used to rebalance the tree when the left child is too tall. Without a left child
/// there is nothing to rotate and `old_root` is returned as is.
///
/// # Diagram
///
/// ```text
///     old_root               new_root
///      /    \                 /    \
///  new_root  z    rotate ->  x   old_root
///   /  \                          /  \
///  x    y                        y    z
/// ```
fn rotate_right<T>(mut old_root: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };

    old_root.left = new_root.right.take();
    old_root.fix_height();

    new_root.right = Some(old_root);
    new_root.fix_height();
    trace!(height = new_root.height, "rotated right");
    new_root
}

/// The mirror image of [`rotate_right`].
fn rotate_left<T>(mut old_root: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };

    old_root.right = new_root.left.take();
    old_root.fix_height();

    new_root.left = Some(old_root);
    new_root.fix_height();
    trace!(height = new_root.height, "rotated left");
    new_root
}

/// In-order walk that stops descending once `k` elements have been collected.
fn collect_smallest<'a, T>(node: Option<&'a Node<T>>, k: usize, smallest: &mut Vec<&'a T>) {
    let Some(node) = node else {
        return;
    };
    if smallest.len() >= k {
        return;
    }

    collect_smallest(node.left.as_deref(), k, smallest);
    if smallest.len() < k {
        smallest.push(&node.value);
        collect_smallest(node.right.as_deref(), k, smallest);
    }
}

#[cfg(test)]
impl<T> Tree<T>
where
    T: Ord,
{
    /// Recomputes every height from scratch and checks it against the cached one, along with the
    /// balance factor of every node, the ordering of the elements, and the length.
    pub(crate) fn assert_invariants(&self) {
        fn check<T>(link: &Link<T>) -> (isize, usize) {
            let Some(node) = link else {
                return (-1, 0);
            };
            let (left_height, left_len) = check(&node.left);
            let (right_height, right_len) = check(&node.right);

            assert_eq!(node.height, left_height.max(right_height) + 1);
            assert!((left_height - right_height).abs() <= 1);
            (node.height, left_len + right_len + 1)
        }

        let (height, len) = check(&self.root);
        assert_eq!(height, self.height());
        assert_eq!(len, self.len);
        assert!(self.iter().zip(self.iter().skip(1)).all(|(a, b)| a < b));
    }
}
