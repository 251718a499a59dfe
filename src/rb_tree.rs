use core::borrow::Borrow;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::Error;
use crate::raw::{Color, Handle, Link, RawRbTree};

mod iter;
mod navigation;

pub use iter::{InOrder, Iter, LevelOrder};

/// An ordered set of keys stored in a red-black tree.
///
/// Keys are unique: inserting a key equal to one already present fails with
/// [`Error::DuplicateKey`] and leaves the tree unchanged.
///
/// Nodes are kept in an arena and exposed through copyable [`NodeId`]s, so
/// callers can walk the structure (parent, children, color) as well as the
/// order (minimum, maximum, successor, predecessor). A `NodeId` stays valid
/// until its node is removed or the tree is cleared; after that every
/// operation taking it fails with [`Error::InvalidArgument`], even if the
/// slot has since been reused by another node.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key changes while it is in the tree.
///
/// # Examples
///
/// ```
/// use arena_rbtree::{Error, RbTree};
///
/// let mut tree = RbTree::new();
/// for key in [10, 20, 30] {
///     tree.insert(key)?;
/// }
///
/// // Inserting ascending keys rotated 20 up to the root.
/// let root = tree.root().unwrap();
/// assert_eq!(tree.key(root)?, &20);
/// assert_eq!(tree.height(), 2);
///
/// let twenty = tree.search(&20)?;
/// let thirty = tree.successor(twenty)?.unwrap();
/// assert_eq!(tree.key(thirty)?, &30);
///
/// assert_eq!(tree.remove_key(&20), Ok(20));
/// assert_eq!(tree.search(&20), Err(Error::NotFound));
/// # Ok::<(), Error>(())
/// ```
pub struct RbTree<K> {
    raw: RawRbTree<K>,
    /// Stamped into every [`NodeId`] this tree hands out.
    owner: u32,
}

/// Source of per-tree owner tags.
static NEXT_OWNER: AtomicU32 = AtomicU32::new(0);

/// A handle to one node of an [`RbTree`].
///
/// Ids are only meaningful for the tree that produced them (and its clones);
/// any other tree rejects them with [`Error::InvalidArgument`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    handle: Handle,
    generation: u32,
    owner: u32,
}

impl<K> RbTree<K> {
    /// Makes a new, empty `RbTree`.
    ///
    /// Does not allocate anything on its own. Every new tree gets its own
    /// owner tag, so ids of one tree are rejected by another.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::RbTree;
    ///
    /// let tree: RbTree<i32> = RbTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.root(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        RbTree {
            raw: RawRbTree::new(),
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns the number of keys in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key. All outstanding [`NodeId`]s become invalid.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the root node, or `None` when the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.raw.root().map(|handle| self.id(handle))
    }

    /// Returns the height of the tree: the number of nodes on its longest
    /// root-to-leaf path, 0 when empty.
    ///
    /// # Complexity
    ///
    /// O(n); the height is computed on demand, not cached.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height_of(self.raw.root())
    }

    /// Returns the height of the subtree rooted at `node`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    pub fn subtree_height(&self, node: NodeId) -> Result<usize, Error> {
        let handle = self.resolve(node)?;
        Ok(self.raw.height_of(Some(handle)))
    }

    /// Returns the key stored at `node`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    pub fn key(&self, node: NodeId) -> Result<&K, Error> {
        let handle = self.resolve(node)?;
        Ok(self.raw.node(handle).key())
    }

    /// Returns the color of `node`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    pub fn color(&self, node: NodeId) -> Result<Color, Error> {
        let handle = self.resolve(node)?;
        Ok(self.raw.node(handle).color())
    }

    /// Returns the parent of `node`, `None` for the root.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        let handle = self.resolve(node)?;
        Ok(self.link_id(self.raw.node(handle).parent()))
    }

    /// Returns the left child of `node`, `None` when it is the sentinel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    pub fn left(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        let handle = self.resolve(node)?;
        Ok(self.link_id(self.raw.node(handle).left()))
    }

    /// Returns the right child of `node`, `None` when it is the sentinel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    pub fn right(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        let handle = self.resolve(node)?;
        Ok(self.link_id(self.raw.node(handle).right()))
    }

    /// Removes `node` from the tree and returns its key.
    ///
    /// The node's slot is freed immediately; `node` and any copy of it are
    /// invalid afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    /// The tree is not modified in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::{Error, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// let node = tree.insert(42)?;
    ///
    /// assert_eq!(tree.remove(node), Ok(42));
    /// assert_eq!(tree.height(), 0);
    /// assert_eq!(tree.remove(node), Err(Error::InvalidArgument));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, node: NodeId) -> Result<K, Error> {
        let handle = self.resolve(node)?;
        Ok(self.raw.remove(handle))
    }

    /// Gets an iterator over the keys of the tree, in ascending order.
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
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// Gets an iterator over the nodes of the tree in ascending key order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(self)
    }

    /// Gets an iterator over the nodes of the tree level by level: the root
    /// first, then each level from left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for key in [10, 20, 30, 40] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let levels: Vec<_> = tree.level_order().map(|node| *tree.key(node).unwrap()).collect();
    /// assert_eq!(levels, [20, 10, 30, 40]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder::new(self)
    }

    fn resolve(&self, node: NodeId) -> Result<Handle, Error> {
        if node.owner != self.owner {
            return Err(Error::InvalidArgument);
        }
        match self.raw.generation(node.handle) {
            Some(generation) if generation == node.generation => Ok(node.handle),
            _ => Err(Error::InvalidArgument),
        }
    }

    fn id(&self, handle: Handle) -> NodeId {
        let generation = self.raw.generation(handle).expect("`RbTree::id()` - `handle` is not live!");
        NodeId {
            handle,
            generation,
            owner: self.owner,
        }
    }

    fn link_id(&self, link: Link) -> Option<NodeId> {
        link.map(|handle| self.id(handle))
    }
}

impl<K: Ord> RbTree<K> {
    /// Adds a key to the tree and returns the node holding it.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if an equal key is already present. The tree
    /// is not modified and `key` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::{Error, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// let node = tree.insert(7)?;
    /// assert_eq!(tree.key(node)?, &7);
    /// assert_eq!(tree.insert(7), Err(Error::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> Result<NodeId, Error> {
        match self.raw.insert(key) {
            Ok(handle) => Ok(self.id(handle)),
            Err(_) => Err(Error::DuplicateKey),
        }
    }

    /// Finds the node holding `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no node holds `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn search<Q>(&self, key: &Q) -> Result<NodeId, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|handle| self.id(handle)).ok_or(Error::NotFound)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Searches for `key` and removes its node, returning the stored key.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no node holds `key`.
    pub fn remove_key<Q>(&mut self, key: &Q) -> Result<K, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key).ok_or(Error::NotFound)?;
        Ok(self.raw.remove(handle))
    }
}

impl<K> Default for RbTree<K> {
    /// Creates an empty `RbTree`.
    fn default() -> Self {
        RbTree::new()
    }
}

impl<K: Clone> Clone for RbTree<K> {
    /// Clones the tree node for node; ids of the original are valid for the clone.
    fn clone(&self) -> Self {
        RbTree {
            raw: self.raw.clone(),
            owner: self.owner,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for RbTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    fn tree_from(keys: impl IntoIterator<Item = i32>) -> RbTree<i32> {
        let mut tree = RbTree::new();
        for key in keys {
            tree.insert(key).expect("keys are distinct");
        }
        tree
    }

    #[test]
    fn stale_id_is_rejected_after_slot_reuse() {
        let mut tree = tree_from([1, 2, 3]);
        let two = tree.search(&2).expect("2 is present");
        assert_eq!(tree.remove(two), Ok(2));

        // The freed slot is handed to the next insertion.
        let four = tree.insert(4).expect("4 is new");
        assert_eq!(four.handle, two.handle);

        assert_eq!(tree.key(two), Err(Error::InvalidArgument));
        assert_eq!(tree.remove(two), Err(Error::InvalidArgument));
        assert_eq!(tree.key(four), Ok(&4));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn id_of_another_tree_is_rejected() {
        let mut a = RbTree::new();
        let mut b = RbTree::new();
        let in_a = a.insert(1).expect("fresh tree");
        let in_b = b.insert(2).expect("fresh tree");

        // Same slot, same generation: only the owner tells them apart.
        assert_eq!((in_a.handle, in_a.generation), (in_b.handle, in_b.generation));

        assert_eq!(b.remove(in_a), Err(Error::InvalidArgument));
        assert_eq!(b.key(in_a), Err(Error::InvalidArgument));
        assert_eq!(b.successor(in_a), Err(Error::InvalidArgument));
        assert_eq!(a.remove(in_b), Err(Error::InvalidArgument));

        assert_eq!(b.len(), 1);
        assert_eq!(b.key(in_b), Ok(&2));
        assert_eq!(a.remove(in_a), Ok(1));
    }

    #[test]
    fn clear_invalidates_ids() {
        let mut tree = tree_from(0..8);
        let ids: Vec<NodeId> = tree.in_order().collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);

        let _ = tree.insert(100);
        for id in ids {
            assert_eq!(tree.color(id), Err(Error::InvalidArgument));
        }
    }

    #[test]
    fn structure_accessors_agree() {
        let tree = tree_from([10, 20, 30]);
        let root = tree.root().expect("tree is not empty");
        let left = tree.left(root).expect("live").expect("root has a left child");
        let right = tree.right(root).expect("live").expect("root has a right child");

        assert_eq!(tree.parent(root), Ok(None));
        assert_eq!(tree.parent(left), Ok(Some(root)));
        assert_eq!(tree.parent(right), Ok(Some(root)));
        assert_eq!(tree.color(root), Ok(Color::Black));
        assert_eq!(tree.color(left), Ok(Color::Red));
        assert_eq!(tree.left(left), Ok(None));
        assert_eq!(tree.subtree_height(left), Ok(1));
    }

    #[test]
    fn clone_is_independent() {
        let original = tree_from(0..16);
        let mut copy = original.clone();
        let id = original.search(&5).expect("5 is present");
        assert_eq!(copy.key(id), Ok(&5));

        assert_eq!(copy.remove_key(&5), Ok(5));
        assert!(original.contains(&5));
        assert!(!copy.contains(&5));
    }

    #[test]
    fn debug_lists_keys_in_order() {
        let tree = tree_from([3, 1, 2]);
        assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
        assert_eq!(format!("{:?}", RbTree::<i32>::default()), "{}");
    }

    #[test]
    fn borrowed_lookup() {
        let mut tree = RbTree::new();
        tree.insert(alloc::string::String::from("pear")).expect("new key");
        assert!(tree.contains("pear"));
        assert_eq!(tree.remove_key("apple"), Err(Error::NotFound));
        assert_eq!(tree.remove_key("pear").as_deref(), Ok("pear"));
    }
}
