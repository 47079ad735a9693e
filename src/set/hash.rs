//! Mutable hash set based on separate chaining.
//!
//! This module provides [`ChainedHashSet`], a hash table whose buckets are
//! singly-linked chains, together with the [`HashFunction`] abstraction it
//! uses to place elements.
//!
//! # Overview
//!
//! - O(1) expected add and contains
//! - O(N) growth, amortized O(1) per add
//! - O(1) size and capacity
//!
//! The table starts with [`DEFAULT_CAPACITY`] buckets. Before an insertion
//! would push the load factor (`size / capacity`) above [`MAX_LOAD_FACTOR`],
//! the bucket array grows to `capacity * 2 + 1` and every existing node is
//! relinked into the bucket its hash selects under the new capacity.
//!
//! # Examples
//!
//! ```rust
//! use setkit::set::ChainedHashSet;
//!
//! let mut set = ChainedHashSet::new(|word: &String| word.len());
//! set.add("tea".to_string());
//! set.add("coffee".to_string());
//!
//! assert!(set.contains(&"tea".to_string()));
//! assert_eq!(set.elements_at_index(3), 1);
//! assert!(set.is_element_at_index(&"coffee".to_string(), 6));
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};
use std::iter::FromIterator;

use super::arena::{Arena, NodeId};
use super::{Set, SetError};

/// Number of buckets a table starts with unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest `size / capacity` ratio the table tolerates after an insertion.
///
/// The growth check itself is done in integers as `size * 5 > capacity * 4`.
pub const MAX_LOAD_FACTOR: f64 = 0.8;

// =============================================================================
// Hash Functions
// =============================================================================

/// Maps an element to a bucket seed; the table reduces it modulo its capacity.
///
/// Implemented for every `Fn(&T) -> usize` closure, and for
/// [`BuildHasherFunction`], which adapts any [`BuildHasher`].
///
/// # Examples
///
/// ```rust
/// use setkit::set::HashFunction;
///
/// let by_length = |word: &str| word.len();
/// assert_eq!(by_length.hash_of("four"), 4);
/// ```
pub trait HashFunction<T: ?Sized> {
    /// Returns the hash of `element`. Equal elements must hash equally.
    fn hash_of(&self, element: &T) -> usize;
}

impl<T: ?Sized, F: Fn(&T) -> usize> HashFunction<T> for F {
    #[inline]
    fn hash_of(&self, element: &T) -> usize {
        self(element)
    }
}

/// A [`HashFunction`] backed by a standard [`BuildHasher`].
#[derive(Clone, Debug, Default)]
pub struct BuildHasherFunction<S> {
    build_hasher: S,
}

impl<S> BuildHasherFunction<S> {
    /// Wraps `build_hasher`.
    #[must_use]
    pub const fn new(build_hasher: S) -> Self {
        Self { build_hasher }
    }
}

impl<T: Hash + ?Sized, S: BuildHasher> HashFunction<T> for BuildHasherFunction<S> {
    #[allow(clippy::cast_possible_truncation)]
    fn hash_of(&self, element: &T) -> usize {
        self.build_hasher.hash_one(element) as usize
    }
}

/// SipHash with per-instance random keys, the standard library's default.
pub type DefaultHashFunction = BuildHasherFunction<RandomState>;

/// `FxHash` from `rustc-hash`. Fast, but not `HashDoS`-resistant.
#[cfg(feature = "fxhash")]
pub type FxHashFunction = BuildHasherFunction<rustc_hash::FxBuildHasher>;

/// `aHash` with per-instance random keys.
#[cfg(feature = "ahash")]
pub type AHashFunction = BuildHasherFunction<ahash::RandomState>;

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone)]
struct Link<T> {
    element: T,
    next: Option<NodeId>,
}

// =============================================================================
// ChainedHashSet Definition
// =============================================================================

/// A mutable hash set based on separately chained buckets.
///
/// Elements must implement `Eq`; placement is decided by the caller-supplied
/// [`HashFunction`].
///
/// # Time Complexity
///
/// | Operation             | Complexity           |
/// |-----------------------|----------------------|
/// | `add`                 | O(1) amortized       |
/// | `contains`            | O(1) expected        |
/// | `len`                 | O(1)                 |
/// | `elements_at_index`   | O(chain length)      |
/// | `is_element_at_index` | O(chain length)      |
/// | `clone`               | O(N + capacity)      |
///
/// # Examples
///
/// ```rust
/// use setkit::set::ChainedHashSet;
///
/// let mut set = ChainedHashSet::new(|element: &u32| *element as usize);
/// for element in 0..9 {
///     set.add(element);
/// }
///
/// assert_eq!(set.len(), 9);
/// assert_eq!(set.capacity(), 21);
/// ```
pub struct ChainedHashSet<T, H = DefaultHashFunction> {
    hash_function: H,
    nodes: Arena<Link<T>>,
    /// Head of each chain.
    buckets: Vec<Option<NodeId>>,
}

impl<T, H> ChainedHashSet<T, H> {
    /// Creates a new empty set with [`DEFAULT_CAPACITY`] buckets.
    #[must_use]
    pub fn new(hash_function: H) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, hash_function)
    }

    /// Creates a new empty set with `capacity` buckets (at least one).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::ChainedHashSet;
    ///
    /// let set: ChainedHashSet<u8, _> = ChainedHashSet::with_capacity(0, |b: &u8| *b as usize);
    /// assert_eq!(set.capacity(), 1);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize, hash_function: H) -> Self {
        Self {
            hash_function,
            nodes: Arena::new(),
            buckets: vec![None; capacity.max(1)],
        }
    }

    /// Creates a new empty set with `capacity` buckets, reporting allocation
    /// failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if the bucket array could not be
    /// allocated.
    pub fn try_with_capacity(capacity: usize, hash_function: H) -> Result<Self, SetError> {
        Ok(Self {
            hash_function,
            nodes: Arena::new(),
            buckets: Self::try_bucket_array(capacity.max(1))?,
        })
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Returns the number of buckets.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns an iterator over the elements, bucket by bucket and in chain
    /// order within each bucket.
    #[must_use]
    pub fn iter(&self) -> ChainedHashSetIterator<'_, T> {
        ChainedHashSetIterator {
            nodes: &self.nodes,
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len(),
        }
    }

    fn try_bucket_array(capacity: usize) -> Result<Vec<Option<NodeId>>, SetError> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(capacity)?;
        buckets.resize(capacity, None);
        Ok(buckets)
    }

    /// Node ids of the chain at `index`, head first.
    fn chain(&self, index: usize) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.buckets[index], |&id| self.nodes[id].next)
    }

    const fn exceeds_load(&self, size: usize) -> bool {
        size.saturating_mul(5) > self.capacity().saturating_mul(4)
    }

    const fn next_capacity(&self) -> usize {
        self.capacity() * 2 + 1
    }
}

impl<T: Hash> ChainedHashSet<T> {
    /// Creates a new empty set hashed with [`DefaultHashFunction`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::ChainedHashSet;
    ///
    /// let mut set = ChainedHashSet::with_default_hasher();
    /// set.add("hello");
    /// assert!(set.contains(&"hello"));
    /// ```
    #[must_use]
    pub fn with_default_hasher() -> Self {
        Self::new(DefaultHashFunction::default())
    }
}

impl<T: Eq, H: HashFunction<T>> ChainedHashSet<T, H> {
    /// Returns `true` if the set contains the specified element.
    ///
    /// # Complexity
    ///
    /// O(1) expected
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        let index = self.bucket_index(element);
        self.chain(index)
            .any(|id| self.nodes[id].element == *element)
    }

    /// Adds an element to the set.
    ///
    /// Returns `true` if the element was newly inserted. If the insertion
    /// would take the load factor above [`MAX_LOAD_FACTOR`], the table first
    /// grows to `capacity * 2 + 1` buckets and rehashes every element.
    ///
    /// # Complexity
    ///
    /// O(1) amortized, O(N) when growing
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::ChainedHashSet;
    ///
    /// let mut set = ChainedHashSet::new(|element: &i64| element.unsigned_abs() as usize);
    /// assert!(set.add(-3));
    /// assert!(!set.add(-3));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        if self.contains(&element) {
            return false;
        }
        if self.exceeds_load(self.len() + 1) {
            let buckets = vec![None; self.next_capacity()];
            self.rehash_into(buckets);
        }
        self.append(element);
        true
    }

    /// Adds an element, reporting allocation failure instead of aborting.
    ///
    /// Room for the node and, if needed, the grown bucket array are both
    /// reserved before anything is relinked, so on `Err` the set is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if either allocation failed.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        if self.contains(&element) {
            return Ok(false);
        }
        self.nodes.try_reserve(1)?;
        if self.exceeds_load(self.len() + 1) {
            let buckets = Self::try_bucket_array(self.next_capacity())?;
            self.rehash_into(buckets);
        }
        self.append(element);
        Ok(true)
    }

    /// Returns the number of elements whose chain is the bucket at `index`,
    /// or `0` if `index` is not below [`capacity`](Self::capacity).
    #[must_use]
    pub fn elements_at_index(&self, index: usize) -> usize {
        if index >= self.capacity() {
            return 0;
        }
        self.chain(index).count()
    }

    /// Returns `true` if `element` is stored in the bucket at `index`.
    ///
    /// Out-of-range indices yield `false`.
    #[must_use]
    pub fn is_element_at_index(&self, element: &T, index: usize) -> bool {
        if index >= self.capacity() {
            return false;
        }
        self.chain(index)
            .any(|id| self.nodes[id].element == *element)
    }

    fn bucket_index(&self, element: &T) -> usize {
        self.hash_function.hash_of(element) % self.capacity()
    }

    /// Links a new node at the tail of its chain.
    fn append(&mut self, element: T) {
        let index = self.bucket_index(&element);
        let tail = self.chain(index).last();
        let id = self.nodes.alloc(Link {
            element,
            next: None,
        });
        match tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.buckets[index] = Some(id),
        }
    }

    /// Relinks every node into `buckets` using the new capacity, then drops
    /// the old bucket array.
    fn rehash_into(&mut self, mut buckets: Vec<Option<NodeId>>) {
        let old_capacity = self.capacity();
        let new_capacity = buckets.len();
        for id in self.nodes.ids() {
            let index = self.hash_function.hash_of(&self.nodes[id].element) % new_capacity;
            self.nodes[id].next = buckets[index];
            buckets[index] = Some(id);
        }
        self.buckets = buckets;
        tracing::debug!(
            old_capacity,
            new_capacity,
            size = self.len(),
            "grew bucket array"
        );
    }
}

impl<T: Clone, H: Clone> ChainedHashSet<T, H> {
    /// Deep-copies the set, reporting allocation failure instead of aborting.
    ///
    /// The copy keeps the capacity and the order of every chain.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if the nodes or the bucket array
    /// could not be allocated. Nothing is leaked in that case.
    pub fn try_clone(&self) -> Result<Self, SetError> {
        let nodes = self.nodes.try_clone()?;
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(self.buckets.len())?;
        buckets.extend_from_slice(&self.buckets);
        Ok(Self {
            hash_function: self.hash_function.clone(),
            nodes,
            buckets,
        })
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// An iterator over the elements of a [`ChainedHashSet`] in bucket order.
pub struct ChainedHashSetIterator<'a, T> {
    nodes: &'a Arena<Link<T>>,
    buckets: std::slice::Iter<'a, Option<NodeId>>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for ChainedHashSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.current {
                let link = &self.nodes[id];
                self.current = link.next;
                self.remaining -= 1;
                return Some(&link.element);
            }
            self.current = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ChainedHashSetIterator<'_, T> {}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Eq, H: HashFunction<T>> Set<T> for ChainedHashSet<T, H> {
    fn add(&mut self, element: T) {
        Self::add(self, element);
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Clone, H: Clone> Clone for ChainedHashSet<T, H> {
    fn clone(&self) -> Self {
        Self {
            hash_function: self.hash_function.clone(),
            nodes: self.nodes.clone(),
            buckets: self.buckets.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.hash_function.clone_from(&source.hash_function);
        self.nodes.clone_from(&source.nodes);
        self.buckets.clone_from(&source.buckets);
    }
}

impl<T, H: Default> Default for ChainedHashSet<T, H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<T: Eq, H: HashFunction<T> + Default> FromIterator<T> for ChainedHashSet<T, H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: Eq, H: HashFunction<T>> Extend<T> for ChainedHashSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T, H> IntoIterator for &'a ChainedHashSet<T, H> {
    type Item = &'a T;
    type IntoIter = ChainedHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq, H: HashFunction<T>> PartialEq for ChainedHashSet<T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Eq, H: HashFunction<T>> Eq for ChainedHashSet<T, H> {}

impl<T: fmt::Debug, H> fmt::Debug for ChainedHashSet<T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

static_assertions::assert_impl_all!(ChainedHashSet<i32>: Send, Sync, Clone, Default);

// =============================================================================
// Tests
// =============================================================================
