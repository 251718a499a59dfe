use alloc::collections::VecDeque;
use core::iter::FusedIterator;

use super::{NodeId, RbTree};
use crate::raw::{Handle, Link};

/// An iterator over the nodes of an `RbTree` in ascending key order.
///
/// This `struct` is created by the [`in_order`] method on [`RbTree`].
///
/// [`in_order`]: RbTree::in_order
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct InOrder<'a, K> {
    tree: &'a RbTree<K>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K> InOrder<'a, K> {
    pub(super) fn new(tree: &'a RbTree<K>) -> Self {
        let root = tree.raw.root();
        InOrder {
            tree,
            front: root.map(|root| tree.raw.minimum(root)),
            back: root.map(|root| tree.raw.maximum(root)),
            remaining: tree.len(),
        }
    }

    fn next_handle(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.raw.successor(handle);
        Some(handle)
    }

    fn next_back_handle(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.raw.predecessor(handle);
        Some(handle)
    }
}

impl<K> Iterator for InOrder<'_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.next_handle().map(|handle| self.tree.id(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for InOrder<'_, K> {
    fn next_back(&mut self) -> Option<NodeId> {
        self.next_back_handle().map(|handle| self.tree.id(handle))
    }
}

impl<K> ExactSizeIterator for InOrder<'_, K> {}

impl<K> FusedIterator for InOrder<'_, K> {}

/// An iterator over the keys of an `RbTree` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RbTree`].
///
/// # Examples
///
/// ```
/// use arena_rbtree::RbTree;
///
/// let mut tree = RbTree::new();
/// for key in [3, 1, 2] {
///     tree.insert(key).unwrap();
/// }
///
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RbTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    inner: InOrder<'a, K>,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(tree: &'a RbTree<K>) -> Self {
        Iter {
            inner: InOrder::new(tree),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.inner.tree;
        self.inner.next_handle().map(|handle| tree.raw.node(handle).key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        let tree = self.inner.tree;
        self.inner.next_back_handle().map(|handle| tree.raw.node(handle).key())
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

/// A breadth-first iterator over the nodes of an `RbTree`.
///
/// Yields the root, then every node of the next level from left to right,
/// and so on. This `struct` is created by the [`level_order`] method on
/// [`RbTree`].
///
/// [`level_order`]: RbTree::level_order
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrder<'a, K> {
    tree: &'a RbTree<K>,
    queue: VecDeque<Handle>,
}

impl<'a, K> LevelOrder<'a, K> {
    pub(super) fn new(tree: &'a RbTree<K>) -> Self {
        LevelOrder {
            tree,
            queue: tree.raw.root().into_iter().collect(),
        }
    }
}

impl<K> Iterator for LevelOrder<'_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let handle = self.queue.pop_front()?;
        let node = self.tree.raw.node(handle);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(self.tree.id(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.tree.len()))
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}
