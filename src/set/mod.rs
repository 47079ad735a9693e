//! Mutable, duplicate-free set containers built from first principles.
//!
//! This module provides three interchangeable implementations of the
//! [`Set`] contract. None of them is built on a standard-library map or set;
//! each manages its own node graph inside an index-addressed arena:
//!
//! - [`BalancedTreeSet`]: AVL tree with optional balancing
//! - [`ChainedHashSet`]: separately chained hash table with automatic growth
//! - [`TieredLinkedSet`]: skip list with sentinel-bounded levels
//!
//! Besides the shared operations, each container exposes the introspection
//! its shape allows (tree height and traversals, per-bucket counts,
//! per-level counts). Those results are part of the observable contract, so
//! `Clone` reproduces the exact structure of the source, not just its
//! elements.
//!
//! # Examples
//!
//! ## `BalancedTreeSet`
//!
//! ```rust
//! use setkit::set::{BalancedTreeSet, Set};
//!
//! let mut tree = BalancedTreeSet::new();
//! for element in [1, 2, 3] {
//!     tree.add(element);
//! }
//! assert_eq!(tree.height(), 1);
//!
//! let mut visited = Vec::new();
//! tree.preorder(|element| visited.push(*element));
//! assert_eq!(visited, vec![2, 1, 3]);
//! ```
//!
//! ## `ChainedHashSet`
//!
//! ```rust
//! use setkit::set::{ChainedHashSet, Set};
//!
//! let mut table = ChainedHashSet::new(|element: &usize| *element);
//! for element in 0..9 {
//!     table.add(element);
//! }
//! // The ninth element pushed the load factor past 0.8.
//! assert_eq!(table.capacity(), 21);
//! assert!(table.is_element_at_index(&8, 8));
//! ```
//!
//! ## `TieredLinkedSet`
//!
//! ```rust
//! use setkit::set::{NeverPromote, Set, TieredLinkedSet};
//!
//! let mut list = TieredLinkedSet::with_promotion(NeverPromote);
//! list.add("kiwi");
//! list.add("apple");
//! assert_eq!(list.level_count(), 1);
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![&"apple", &"kiwi"]);
//! ```

#[cfg(any(feature = "tree", feature = "hash", feature = "skiplist"))]
mod arena;
mod error;

#[cfg(feature = "hash")]
mod hash;
#[cfg(feature = "skiplist")]
mod skiplist;
#[cfg(feature = "tree")]
mod tree;

pub use error::SetError;

#[cfg(feature = "hash")]
pub use hash::BuildHasherFunction;
#[cfg(feature = "hash")]
pub use hash::ChainedHashSet;
#[cfg(feature = "hash")]
pub use hash::ChainedHashSetIterator;
#[cfg(feature = "hash")]
pub use hash::DEFAULT_CAPACITY;
#[cfg(feature = "hash")]
pub use hash::DefaultHashFunction;
#[cfg(feature = "hash")]
pub use hash::HashFunction;
#[cfg(feature = "hash")]
pub use hash::MAX_LOAD_FACTOR;
#[cfg(feature = "skiplist")]
pub use skiplist::LevelPromotion;
#[cfg(feature = "skiplist")]
pub use skiplist::NeverPromote;
#[cfg(feature = "skiplist")]
pub use skiplist::RandomPromotion;
#[cfg(feature = "skiplist")]
pub use skiplist::ScriptedPromotion;
#[cfg(feature = "skiplist")]
pub use skiplist::TierKey;
#[cfg(feature = "skiplist")]
pub use skiplist::TieredLinkedSet;
#[cfg(feature = "skiplist")]
pub use skiplist::TieredLinkedSetIterator;
#[cfg(feature = "tree")]
pub use tree::BalancedTreeSet;
#[cfg(feature = "tree")]
pub use tree::BalancedTreeSetIterator;

// Fast-hash re-exports
#[cfg(feature = "ahash")]
pub use hash::AHashFunction;
#[cfg(feature = "fxhash")]
pub use hash::FxHashFunction;

// =============================================================================
// Set Trait
// =============================================================================

/// A mutable collection of unique elements.
///
/// `Set` is the capability every container in this module shares and the
/// only thing downstream consumers such as
/// [`SuggestionEngine`](crate::suggest::SuggestionEngine) depend on. There is
/// deliberately no removal operation.
///
/// # Laws
///
/// For every implementation:
///
/// - after `set.add(x)`, `set.contains(&x)` is `true`
/// - `add` is idempotent: adding an element that is already present changes
///   nothing observable
/// - `size()` equals the number of distinct elements added so far
///
/// # Examples
///
/// ```rust
/// use setkit::set::{BalancedTreeSet, ChainedHashSet, Set, TieredLinkedSet};
///
/// fn fill(set: &mut dyn Set<i32>) {
///     for element in [3, 1, 3, 2] {
///         set.add(element);
///     }
/// }
///
/// let mut tree: BalancedTreeSet<i32> = BalancedTreeSet::new();
/// let mut table = ChainedHashSet::new(|element: &i32| element.unsigned_abs() as usize);
/// let mut list: TieredLinkedSet<i32> = TieredLinkedSet::new();
///
/// fill(&mut tree);
/// fill(&mut table);
/// fill(&mut list);
///
/// assert_eq!(tree.size(), 3);
/// assert_eq!(Set::size(&table), 3);
/// assert_eq!(list.size(), 3);
/// ```
pub trait Set<T> {
    /// Adds `element` to the set. Does nothing if an equal element is present.
    fn add(&mut self, element: T);

    /// Returns `true` if an element equal to `element` is in the set.
    fn contains(&self, element: &T) -> bool;

    /// Returns the number of distinct elements in the set.
    fn size(&self) -> usize;

    /// Returns `true` if the set holds no elements.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Reports whether this container is a working implementation.
    ///
    /// Every container in this crate returns `true`.
    fn is_implemented(&self) -> bool {
        true
    }
}

impl<T, S: Set<T> + ?Sized> Set<T> for &mut S {
    fn add(&mut self, element: T) {
        (**self).add(element);
    }

    fn contains(&self, element: &T) -> bool {
        (**self).contains(element)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn is_implemented(&self) -> bool {
        (**self).is_implemented()
    }
}

impl<T, S: Set<T> + ?Sized> Set<T> for Box<S> {
    fn add(&mut self, element: T) {
        (**self).add(element);
    }

    fn contains(&self, element: &T) -> bool {
        (**self).contains(element)
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn is_implemented(&self) -> bool {
        (**self).is_implemented()
    }
}
