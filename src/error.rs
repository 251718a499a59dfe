use thiserror::Error;

/// Errors returned by [`RbTree`](crate::RbTree) operations.
///
/// A failed operation never leaves a mutation half applied: the tree is
/// exactly as it was before the call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The key is not in the tree.
    #[error("key is not in the tree")]
    NotFound,
    /// The node id names a removed node or a node of another tree.
    #[error("node id does not name a node of this tree")]
    InvalidArgument,
    /// An equal key is already in the tree; keys form a set.
    #[error("key is already in the tree")]
    DuplicateKey,
}
