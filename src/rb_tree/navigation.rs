use super::{NodeId, RbTree};
use crate::Error;

impl<K> RbTree<K> {
    /// Returns the node with the smallest key in the subtree rooted at `node`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for key in [50, 30, 70, 20, 40] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let thirty = tree.search(&30).unwrap();
    /// let smallest = tree.minimum(thirty).unwrap();
    /// assert_eq!(tree.key(smallest), Ok(&20));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn minimum(&self, node: NodeId) -> Result<NodeId, Error> {
        let handle = self.resolve(node)?;
        Ok(self.id(self.raw.minimum(handle)))
    }

    /// Returns the node with the largest key in the subtree rooted at `node`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn maximum(&self, node: NodeId) -> Result<NodeId, Error> {
        let handle = self.resolve(node)?;
        Ok(self.id(self.raw.maximum(handle)))
    }

    /// Returns the node holding the next larger key, or `None` if `node`
    /// holds the largest key of the tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for key in [1, 5, 9] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// let five = tree.search(&5).unwrap();
    /// let next = tree.successor(five).unwrap().unwrap();
    /// assert_eq!(tree.key(next), Ok(&9));
    /// assert_eq!(tree.successor(next), Ok(None));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn successor(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        let handle = self.resolve(node)?;
        Ok(self.link_id(self.raw.successor(handle)))
    }

    /// Returns the node holding the next smaller key, or `None` if `node`
    /// holds the smallest key of the tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is not a live node of this tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn predecessor(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        let handle = self.resolve(node)?;
        Ok(self.link_id(self.raw.predecessor(handle)))
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use arena_rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.first(), None);
    /// tree.insert(2).unwrap();
    /// tree.insert(1).unwrap();
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        let root = self.raw.root()?;
        Some(self.raw.node(self.raw.minimum(root)).key())
    }

    /// Returns the largest key, or `None` if the tree is empty.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        let root = self.raw.root()?;
        Some(self.raw.node(self.raw.maximum(root)).key())
    }
}
