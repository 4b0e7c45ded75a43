//! Order-statistic red-black trees for Rust.
//!
//! This crate provides [`RedBlackTree`], an ordered map (or multimap) whose nodes record the
//! size of their subtrees. On top of the usual ordered-map operations it answers
//! order-statistic queries in O(log n):
//!
//! - [`get_by_rank`](RedBlackTree::get_by_rank) and [`at`](RedBlackTree::at) - Get the entry at a given sorted position
//! - [`rank_of`](RedBlackTree::rank_of) - Get the sorted position of a key
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the value of the first entry
//!
//! The [`Probable`] trait layers frequency statistics over the tree: how often a set of keys
//! occurs, the probability of drawing one of them, and the expected number of hits over a
//! run of trials.
//!
//! # Example
//!
//! ```
//! use osrb_tree::{Probable, RedBlackTree};
//!
//! let mut rolls = RedBlackTree::new(false);
//! for face in [3, 1, 6, 3, 5, 3, 2, 6] {
//!     rolls.insert(face, ());
//! }
//!
//! // Ordered-map operations.
//! assert_eq!(rolls.len(), 8);
//! assert!(rolls.contains_key(&5));
//!
//! // Order statistics (O(log n)).
//! assert_eq!(rolls.at(0).0, &1);
//! assert_eq!(rolls.rank_of(&3), Some(2));
//! assert_eq!(rolls.at(7), (&6, &()));
//!
//! // Frequency statistics.
//! assert_eq!(rolls.count_of(&[3]), 3);
//! assert_eq!(rolls.probability_of(&[3, 6]), 0.625);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes live in an arena and link to each other through handles
//! - **Unique or multi-keyed** - Chosen per tree at construction
//!
//! # Implementation
//!
//! The tree is a classic red-black tree with a shared sentinel leaf. Every node stores the
//! number of entries in its subtree; insertion, removal and rotation keep these counts
//! current, which is what makes rank queries logarithmic.

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

mod order_statistic;
mod probable;
mod raw;

pub mod red_black_tree;

pub use order_statistic::Rank;
pub use probable::Probable;
pub use red_black_tree::RedBlackTree;
