use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Stable index of a node slot in the tree's arena.
///
/// Zero is never a valid handle, so `Option<Handle>` costs nothing extra and
/// `None` serves as the tree's sentinel: the missing child, the root's parent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

/// A child or parent reference; `None` is the always-black sentinel.
pub(crate) type Link = Option<Handle>;

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::new()` - `slot` exceeds `Handle::MAX`!");
        // `slot + 1` is at most `RawHandle::MAX`, which is never zero.
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((slot + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
