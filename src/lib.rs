//! # setkit
//!
//! Three hand-built implementations of one duplicate-free collection
//! contract, plus a spelling-suggestion utility that works with any of them.
//!
//! ## Overview
//!
//! None of the containers leans on a standard-library associative container.
//! Each one owns its node graph in an index-addressed arena:
//!
//! - **`BalancedTreeSet`**: AVL tree with rotations driven by parent links;
//!   balancing can be switched off to get a plain binary search tree
//! - **`ChainedHashSet`**: separately chained hash table that grows to
//!   `capacity * 2 + 1` whenever the load factor would pass 0.8
//! - **`TieredLinkedSet`**: skip list with sentinel-bounded levels and a
//!   pluggable level-promotion oracle
//! - **`SuggestionEngine`**: edit-distance-1 word suggestions over any [`set::Set`]
//!
//! ## Feature Flags
//!
//! - `tree`: `BalancedTreeSet`
//! - `hash`: `ChainedHashSet`
//! - `skiplist`: `TieredLinkedSet` and its promotion oracles
//! - `suggest`: `SuggestionEngine`
//! - `fxhash` / `ahash`: ready-made hash functions for `ChainedHashSet`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use setkit::prelude::*;
//!
//! let mut tree = BalancedTreeSet::new();
//! tree.add(2);
//! tree.add(1);
//! tree.add(3);
//! assert_eq!(tree.size(), 3);
//! assert_eq!(tree.height(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the [`Set`](set::Set) trait and every enabled container.
///
/// # Usage
///
/// ```rust
/// use setkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::set::*;

    #[cfg(feature = "suggest")]
    pub use crate::suggest::*;
}

pub mod set;

#[cfg(feature = "suggest")]
pub mod suggest;
