use super::handle::{Handle, Link};

/// The color tag of a red-black tree node.
///
/// The sentinel (an absent child or parent) is always [`Color::Black`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`](Color::Red).
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns `true` if the color is [`Black`](Color::Black).
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Color::Red => "Red",
            Color::Black => "Black",
        })
    }
}

/// Which child slot of a node. Lets the symmetric halves of the rebalancing
/// cases share one body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// A single node type; "is this the sentinel" is answered by the link being `None`.
#[derive(Clone)]
pub(crate) struct Node<K> {
    key: K,
    color: Color,
    parent: Link,
    left: Link,
    right: Link,
}

impl<K> Node<K> {
    /// Creates a detached leaf whose children are both the sentinel.
    pub(crate) fn new(key: K, color: Color, parent: Link) -> Self {
        Self {
            key,
            color,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns which side `child` hangs on, or `None` if it is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
