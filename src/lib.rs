//! An arena-backed red-black tree for Rust.
//!
//! This crate provides [`RbTree`], an ordered set of unique keys kept balanced
//! by the classic red-black rules, together with the structural view that
//! textbook treatments of the tree work with: every node is reachable
//! through a copyable [`NodeId`] exposing its key, [`Color`], parent and
//! children.
//!
//! - [`search`](RbTree::search), [`insert`](RbTree::insert) and
//!   [`remove`](RbTree::remove) in O(log n)
//! - [`minimum`](RbTree::minimum) / [`maximum`](RbTree::maximum) of any subtree
//! - [`successor`](RbTree::successor) / [`predecessor`](RbTree::predecessor) of any node
//! - in-order and level-order traversals
//!
//! # Example
//!
//! ```
//! use arena_rbtree::{Color, Error, RbTree};
//!
//! let mut tree = RbTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key)?;
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(tree.key(root)?, &20);
//! assert_eq!(tree.color(root)?, Color::Black);
//!
//! let ten = tree.search(&10)?;
//! assert_eq!(tree.color(ten)?, Color::Red);
//! assert_eq!(tree.predecessor(ten)?, None);
//!
//! assert_eq!(tree.insert(10), Err(Error::DuplicateKey));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Implementation
//!
//! Nodes live in a slot arena and link to each other with `NonZero` indices,
//! so parent back-references involve no reference counting or raw pointers.
//! An absent link plays the part of the classic shared sentinel node: it
//! costs no space (the niche of the index) and is black by definition.
//! Removed nodes are freed at once and their slots recycled; every slot
//! carries a generation so that stale [`NodeId`]s are detected.
//!
//! The crate also builds `rbtree`, an interactive shell over an
//! `RbTree<i64>`.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod rb_tree;

pub use error::Error;
pub use raw::Color;
pub use rb_tree::{NodeId, RbTree};
