use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Color, Node, Side};

/// The red-black engine backing `RbTree`.
///
/// Nodes live in an arena and refer to one another by [`Handle`]. The
/// sentinel is the absent link: it has no slot, is black, and is never
/// written to, so none of the algorithms below need a shared mutable
/// placeholder node.
#[derive(Clone)]
pub(crate) struct RawRbTree<K> {
    /// Arena owning every node of the tree.
    nodes: Arena<Node<K>>,
    /// Root node, or the sentinel when the tree is empty.
    root: Link,
}

impl<K> RawRbTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node. Handles taken before the call stay invalid.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    /// Returns a reference to a live node.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.nodes.get_mut(handle)
    }

    /// Returns the generation of the slot if `handle` names a live node.
    pub(crate) fn generation(&self, handle: Handle) -> Option<u32> {
        self.nodes.generation(handle)
    }

    /// Color of a link; the sentinel is black.
    #[inline]
    pub(crate) fn color_of(&self, link: Link) -> Color {
        link.map_or(Color::Black, |handle| self.node(handle).color())
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    // ─── Navigation ──────────────────────────────────────────────────────────

    /// Walks from `handle` toward `side` until the next step would be the sentinel.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.node(handle).child(side) {
            handle = next;
        }
        handle
    }

    pub(crate) fn minimum(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Left)
    }

    pub(crate) fn maximum(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Right)
    }

    /// In-order neighbor of `handle` on `side`: `Right` is the successor,
    /// `Left` the predecessor. Returns the sentinel when there is none.
    fn neighbor(&self, handle: Handle, side: Side) -> Link {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        // Climb while we are the `side` child; the first ancestor reached from
        // the other side is the neighbor.
        let mut current = handle;
        let mut parent = self.node(current).parent();
        while let Some(up) = parent {
            if self.node(up).child(side) != Some(current) {
                break;
            }
            current = up;
            parent = self.node(up).parent();
        }
        parent
    }

    pub(crate) fn successor(&self, handle: Handle) -> Link {
        self.neighbor(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Link {
        self.neighbor(handle, Side::Left)
    }

    /// Number of nodes on the longest downward path from `link` (0 for the sentinel).
    pub(crate) fn height_of(&self, link: Link) -> usize {
        // Red-black depth stays below 2 * log2(n + 1), so the stack rarely spills.
        let mut stack: SmallVec<[(Handle, usize); 64]> = SmallVec::new();
        stack.extend(link.map(|handle| (handle, 1)));

        let mut height = 0;
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(handle);
            stack.extend(
                [node.left(), node.right()]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }
        height
    }

    // ─── Rotations ───────────────────────────────────────────────────────────

    /// Rotates around `pivot` toward `direction`.
    ///
    /// The child of `pivot` on the opposite side rises into `pivot`'s position
    /// and `pivot` becomes its `direction` child; the risen child's inner
    /// subtree moves across to `pivot`. Colors and in-order sequence are
    /// untouched. The rising child must not be the sentinel.
    fn rotate(&mut self, pivot: Handle, direction: Side) {
        match direction {
            Side::Left => self.rotate_left(pivot),
            Side::Right => self.rotate_right(pivot),
        }
    }

    /// Promotes the right child of `pivot`.
    pub(crate) fn rotate_left(&mut self, pivot: Handle) {
        self.rotate_toward(pivot, Side::Left);
    }

    /// Promotes the left child of `pivot`.
    pub(crate) fn rotate_right(&mut self, pivot: Handle) {
        self.rotate_toward(pivot, Side::Right);
    }

    fn rotate_toward(&mut self, pivot: Handle, direction: Side) {
        let rising = self
            .node(pivot)
            .child(direction.opposite())
            .expect("`RawRbTree::rotate()` - cannot rotate the sentinel into place!");
        log::trace!("rotate {direction:?} at {pivot:?}");

        let inner = self.node(rising).child(direction);
        self.node_mut(pivot).set_child(direction.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        let parent = self.node(pivot).parent();
        self.replace_child(parent, pivot, Some(rising));
        self.node_mut(rising).set_parent(parent);

        self.node_mut(rising).set_child(direction, Some(pivot));
        self.node_mut(pivot).set_parent(Some(rising));
    }

    /// Points the slot of `parent` that held `old` at `new`; the root slot
    /// when `parent` is the sentinel.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self
                    .node(parent)
                    .side_of(old)
                    .expect("`RawRbTree::replace_child()` - parent and child links disagree!");
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Puts `new` in `old`'s position under `old`'s parent. `new`'s own
    /// children are left alone.
    fn transplant(&mut self, old: Handle, new: Link) {
        let parent = self.node(old).parent();
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
    }

    // ─── Deletion ────────────────────────────────────────────────────────────

    /// Unlinks `handle`, rebalances, frees its slot and returns its key.
    pub(crate) fn remove(&mut self, handle: Handle) -> K {
        let node = self.node(handle);
        let (left, right) = (node.left(), node.right());
        let mut removed_color = node.color();

        // The position that inherits the removed color, tracked as
        // (node-or-sentinel, its parent) since the sentinel has no parent field.
        let (fix_node, fix_parent) = match (left, right) {
            (None, _) => {
                let parent = node.parent();
                self.transplant(handle, right);
                (right, parent)
            }
            (Some(_), None) => {
                let parent = node.parent();
                self.transplant(handle, left);
                (left, parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                removed_color = self.node(successor).color();
                let fix_node = self.node(successor).right();

                let fix_parent = if successor == right {
                    successor
                } else {
                    let parent = self.node(successor).parent();
                    self.transplant(successor, fix_node);
                    self.node_mut(successor).set_child(Side::Right, Some(right));
                    self.node_mut(right).set_parent(Some(successor));
                    parent.expect("`RawRbTree::remove()` - successor has no parent!")
                };

                self.transplant(handle, Some(successor));
                self.node_mut(successor).set_child(Side::Left, Some(left));
                self.node_mut(left).set_parent(Some(successor));
                let color = self.node(handle).color();
                self.set_color(successor, color);

                (fix_node, Some(fix_parent))
            }
        };

        let key = self.nodes.take(handle).into_key();
        log::debug!("removed {handle:?}, removed color {removed_color:?}");

        if removed_color.is_black() {
            self.fix_delete(fix_node, fix_parent);
        }
        key
    }

    /// Restores black-heights after a black node left the position held by
    /// `node` (possibly the sentinel) under `parent`.
    fn fix_delete(&mut self, mut node: Link, mut parent: Link) {
        while node != self.root && self.color_of(node).is_black() {
            let Some(up) = parent else { break };
            let side = if self.node(up).left() == node { Side::Left } else { Side::Right };
            let far_side = side.opposite();

            let mut sibling = self.sibling_of(up, side);
            if self.node(sibling).color().is_red() {
                log::trace!("fix_delete: red sibling {sibling:?}");
                self.set_color(sibling, Color::Black);
                self.set_color(up, Color::Red);
                self.rotate(up, side);
                sibling = self.sibling_of(up, side);
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(far_side);
            if self.color_of(near).is_black() && self.color_of(far).is_black() {
                log::trace!("fix_delete: black sibling {sibling:?} with black children");
                self.set_color(sibling, Color::Red);
                node = Some(up);
                parent = self.node(up).parent();
                continue;
            }

            if self.color_of(far).is_black() {
                log::trace!("fix_delete: red near nephew under {sibling:?}");
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far_side);
                sibling = self.sibling_of(up, side);
            }

            log::trace!("fix_delete: red far nephew under {sibling:?}");
            let parent_color = self.node(up).color();
            self.set_color(sibling, parent_color);
            self.set_color(up, Color::Black);
            if let Some(far) = self.node(sibling).child(far_side) {
                self.set_color(far, Color::Black);
            }
            self.rotate(up, side);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// The child of `parent` opposite `side`. A doubly-black position always
    /// has a real sibling.
    fn sibling_of(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent)
            .child(side.opposite())
            .expect("`RawRbTree::fix_delete()` - doubly-black position has no sibling!")
    }
}

impl<K: Ord> RawRbTree<K> {
    /// Searches for a key and returns its node, or the sentinel.
    pub(crate) fn search<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    // ─── Insertion ───────────────────────────────────────────────────────────

    /// Inserts `key` and rebalances. Returns the new node's handle, or
    /// `Err` with the handle of the equal key already present (the tree is
    /// left unchanged in that case).
    pub(crate) fn insert(&mut self, key: K) -> Result<Handle, Handle> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            side = match key.cmp(node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return Err(handle),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        let Some(parent) = parent else {
            // First node: it becomes the black root and nothing can be violated.
            let handle = self.nodes.alloc(Node::new(key, Color::Black, None));
            self.root = Some(handle);
            log::debug!("inserted {handle:?} as root");
            return Ok(handle);
        };

        let handle = self.nodes.alloc(Node::new(key, Color::Red, Some(parent)));
        self.node_mut(parent).set_child(side, Some(handle));
        log::debug!("inserted {handle:?} as {side:?} child of {parent:?}");

        self.fix_insert(handle);
        Ok(handle)
    }

    /// Walks up from the red node `node` removing red-red violations.
    fn fix_insert(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent().filter(|&parent| self.node(parent).color().is_red()) {
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self
                .node(parent)
                .parent()
                .expect("`RawRbTree::fix_insert()` - red node has no parent!");
            let side = self
                .node(grandparent)
                .side_of(parent)
                .expect("`RawRbTree::fix_insert()` - parent and child links disagree!");
            let uncle = self.node(grandparent).child(side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.node(uncle).color().is_red()) {
                log::trace!("fix_insert: red uncle {uncle:?}, recoloring {grandparent:?}");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut top = parent;
            if self.node(parent).child(side.opposite()) == Some(node) {
                log::trace!("fix_insert: inner grandchild {node:?}");
                self.rotate(parent, side);
                top = node;
            }

            log::trace!("fix_insert: outer grandchild under {top:?}");
            self.set_color(top, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }
}
