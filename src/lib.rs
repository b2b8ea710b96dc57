//! Red-black tree collections for Rust.
//!
//! This crate provides three ordered containers that share one balancing engine:
//!
//! - [`RBTreeMap`] - unique keys mapped to values
//! - [`RBTreeSet`] - unique values
//! - [`RBTreeMultiSet`] - values with duplicates allowed
//!
//! Alongside a `BTreeMap`-flavoured API they expose explicit cursors ([`begin`], [`end`],
//! [`find`], [`lower_bound`], [`upper_bound`]) that walk the tree in key order through parent
//! links, and detached [`Position`]s that can be handed back to [`erase`].
//!
//! # Example
//!
//! ```
//! use rbtree_collections::{RBTreeMap, RBTreeMultiSet};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert_or_assign("Bob", 90);
//!
//! assert_eq!(scores.at(&"Bob"), Ok(&90));
//! assert!(scores.at(&"Carol").is_err());
//!
//! // Cursors walk in key order and stop at an explicit end.
//! let mut cursor = scores.begin();
//! assert_eq!(cursor.key(), &"Alice");
//! cursor.move_next();
//! cursor.move_next();
//! assert!(cursor.is_end());
//!
//! // Multisets keep every copy.
//! let mut rolls = RBTreeMultiSet::from([5, 3, 5, 5]);
//! assert_eq!(rolls.count(&5), 3);
//! rolls.remove_one(&5);
//! assert_eq!(rolls.count(&5), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena storage** - Nodes live in one contiguous arena and link to each other by index
//! - **Checked positions** - Stale [`Position`]s are detected instead of aliasing new elements
//! - **`tracing`** (optional) - Emits `trace` events for rotations and fixups
//!
//! # Implementation
//!
//! The collections are classic red-black trees: every insertion starts red and is repaired by
//! recoloring and rotation; every removal of a black node resolves the resulting double-black
//! deficiency. Equal keys in a multiset always descend to the right, so their relative order is
//! deterministic but not guaranteed to be insertion order.
//!
//! [`begin`]: RBTreeMap::begin
//! [`end`]: RBTreeMap::end
//! [`find`]: RBTreeMap::find
//! [`lower_bound`]: RBTreeMap::lower_bound
//! [`upper_bound`]: RBTreeMap::upper_bound
//! [`erase`]: RBTreeMap::erase

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
mod position;
mod raw;

pub mod rbtree_map;
pub mod rbtree_multiset;
pub mod rbtree_set;

pub use error::Error;
pub use position::Position;
pub use rbtree_map::RBTreeMap;
pub use rbtree_multiset::RBTreeMultiSet;
pub use rbtree_set::RBTreeSet;
