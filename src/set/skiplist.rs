//! Mutable ordered set based on a skip list.
//!
//! This module provides [`TieredLinkedSet`], a tower of sorted singly-linked
//! levels, and the [`LevelPromotion`] oracles that decide how tall each
//! element's tower grows.
//!
//! # Overview
//!
//! - O(log N) expected add and contains
//! - O(1) size and level count
//! - no worst-case bound: an adversarial oracle degrades towards O(N)
//!
//! Every level is bounded by a [`TierKey::NegativeInfinity`] sentinel on the
//! left and a [`TierKey::PositiveInfinity`] sentinel on the right. Level 0
//! holds every element; level `k` holds the elements whose towers reached at
//! least `k + 1` rungs.
//!
//! # Examples
//!
//! ```rust
//! use setkit::set::{ScriptedPromotion, TieredLinkedSet};
//!
//! // 7 is promoted twice, 3 never.
//! let promotion = ScriptedPromotion::new([true, true, false, false]);
//! let mut list = TieredLinkedSet::with_promotion(promotion);
//! list.add(7);
//! list.add(3);
//!
//! assert_eq!(list.level_count(), 3);
//! assert_eq!(list.elements_on_level(0), 2);
//! assert!(list.is_element_on_level(&7, 2));
//! assert!(!list.is_element_on_level(&3, 1));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use super::arena::{Arena, NodeId};
use super::{Set, SetError};

/// Tallest tower an element can get, counting the base level.
///
/// Bounds the level count even for an oracle that always promotes.
const MAX_LEVELS: usize = 64;

// =============================================================================
// Keys
// =============================================================================

/// Key stored in every skip-list node.
///
/// The derived ordering places `NegativeInfinity` before every `Normal` key
/// and `PositiveInfinity` after it; `Normal` keys compare by their elements.
///
/// # Examples
///
/// ```rust
/// use setkit::set::TierKey;
///
/// assert!(TierKey::NegativeInfinity < TierKey::Normal(i32::MIN));
/// assert!(TierKey::Normal(1) < TierKey::Normal(2));
/// assert!(TierKey::Normal(i32::MAX) < TierKey::PositiveInfinity);
/// assert_eq!(TierKey::<i32>::PositiveInfinity, TierKey::PositiveInfinity);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TierKey<T> {
    /// Left sentinel of a level.
    NegativeInfinity,
    /// A stored element.
    Normal(T),
    /// Right sentinel of a level.
    PositiveInfinity,
}

impl<T> TierKey<T> {
    /// Returns the wrapped element, or `None` for a sentinel.
    #[must_use]
    pub const fn element(&self) -> Option<&T> {
        match self {
            Self::Normal(element) => Some(element),
            Self::NegativeInfinity | Self::PositiveInfinity => None,
        }
    }

    /// Returns `true` for either sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Normal(_))
    }

    fn cmp_element<Q>(&self, element: &Q) -> Ordering
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            Self::NegativeInfinity => Ordering::Less,
            Self::Normal(stored) => stored.borrow().cmp(element),
            Self::PositiveInfinity => Ordering::Greater,
        }
    }
}

// =============================================================================
// Level Promotion
// =============================================================================

/// Decides whether an element that just landed on a level also occupies the
/// level above it.
///
/// [`TieredLinkedSet::add`] calls [`should_promote`](Self::should_promote)
/// once per level until the first `false`. Copying a set copies its oracle
/// through [`fork`](Self::fork).
pub trait LevelPromotion<T: ?Sized> {
    /// Returns `true` if `element` should be promoted one more level.
    fn should_promote(&mut self, element: &T) -> bool;

    /// Returns an oracle for a copy of the owning set.
    #[must_use]
    fn fork(&self) -> Self
    where
        Self: Sized;
}

/// Coin-flip promotion backed by a [`SmallRng`].
///
/// Each instance owns its generator. An instance built with [`new`](Self::new)
/// draws its seed from the thread-local entropy source, and so does every
/// fork of it. An instance built with [`with_seed`](Self::with_seed) is
/// reproducible: its forks continue from the exact generator state.
///
/// # Examples
///
/// ```rust
/// use setkit::set::{LevelPromotion, RandomPromotion};
///
/// let mut first = RandomPromotion::with_seed(42);
/// let mut second = LevelPromotion::<()>::fork(&first);
/// for _ in 0..16 {
///     assert_eq!(first.should_promote(&()), second.should_promote(&()));
/// }
/// ```
pub struct RandomPromotion {
    rng: SmallRng,
    probability: f64,
    seeded: bool,
}

impl RandomPromotion {
    /// Probability of promotion used unless told otherwise.
    pub const DEFAULT_PROBABILITY: f64 = 0.5;

    /// Creates an unbiased oracle seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_entropy(Self::DEFAULT_PROBABILITY)
    }

    /// Creates an unbiased oracle with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            probability: Self::DEFAULT_PROBABILITY,
            seeded: true,
        }
    }

    /// Creates an entropy-seeded oracle that promotes with `probability`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidProbability`] unless `probability` lies
    /// within `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::{RandomPromotion, SetError};
    ///
    /// assert!(RandomPromotion::with_probability(0.25).is_ok());
    /// assert_eq!(
    ///     RandomPromotion::with_probability(1.5).unwrap_err(),
    ///     SetError::InvalidProbability(1.5)
    /// );
    /// ```
    pub fn with_probability(probability: f64) -> Result<Self, SetError> {
        Self::validate(probability)?;
        Ok(Self::from_entropy(probability))
    }

    /// Creates an oracle with both a fixed seed and a custom `probability`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::InvalidProbability`] unless `probability` lies
    /// within `[0, 1]`.
    pub fn with_seed_and_probability(seed: u64, probability: f64) -> Result<Self, SetError> {
        Self::validate(probability)?;
        Ok(Self {
            probability,
            ..Self::with_seed(seed)
        })
    }

    /// Returns the probability of promotion.
    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Returns `true` if the generator was seeded explicitly.
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        self.seeded
    }

    fn from_entropy(probability: f64) -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
            probability,
            seeded: false,
        }
    }

    fn validate(probability: f64) -> Result<(), SetError> {
        // NaN fails the range check as well.
        if (0.0..=1.0).contains(&probability) {
            Ok(())
        } else {
            Err(SetError::InvalidProbability(probability))
        }
    }
}

impl<T: ?Sized> LevelPromotion<T> for RandomPromotion {
    fn should_promote(&mut self, _element: &T) -> bool {
        self.rng.random_bool(self.probability)
    }

    fn fork(&self) -> Self {
        if self.seeded {
            Self {
                rng: self.rng.clone(),
                probability: self.probability,
                seeded: true,
            }
        } else {
            Self::from_entropy(self.probability)
        }
    }
}

impl Default for RandomPromotion {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomPromotion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RandomPromotion")
            .field("probability", &self.probability)
            .field("seeded", &self.seeded)
            .finish_non_exhaustive()
    }
}

/// Oracle that never promotes, which keeps the set at a single level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeverPromote;

impl<T: ?Sized> LevelPromotion<T> for NeverPromote {
    fn should_promote(&mut self, _element: &T) -> bool {
        false
    }

    fn fork(&self) -> Self {
        Self
    }
}

/// Oracle that replays a fixed sequence of decisions, then answers `false`.
///
/// A fork continues from the decisions that have not been consumed yet.
///
/// # Examples
///
/// ```rust
/// use setkit::set::{LevelPromotion, ScriptedPromotion};
///
/// let mut promotion = ScriptedPromotion::new([true, false]);
/// assert!(promotion.should_promote(&"a"));
/// assert!(!promotion.should_promote(&"a"));
/// assert!(!promotion.should_promote(&"a"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedPromotion {
    decisions: VecDeque<bool>,
}

impl ScriptedPromotion {
    /// Creates an oracle answering with `decisions` in order.
    #[must_use]
    pub fn new<I: IntoIterator<Item = bool>>(decisions: I) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }

    /// Returns the number of decisions not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.decisions.len()
    }
}

impl<T: ?Sized> LevelPromotion<T> for ScriptedPromotion {
    fn should_promote(&mut self, _element: &T) -> bool {
        self.decisions.pop_front().unwrap_or(false)
    }

    fn fork(&self) -> Self {
        self.clone()
    }
}

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone)]
struct Rung<T> {
    key: TierKey<T>,
    right: Option<NodeId>,
    bottom: Option<NodeId>,
}

/// Rightmost node with a smaller key on every level, top level first.
type Path = SmallVec<[NodeId; 16]>;

enum Probe {
    Found,
    Vacant(Path),
}

// =============================================================================
// TieredLinkedSet Definition
// =============================================================================

/// A mutable ordered set based on a skip list.
///
/// The promotion oracle `P` defaults to [`RandomPromotion`]. Elements are
/// cloned once per level they occupy.
///
/// # Time Complexity
///
/// | Operation             | Complexity          |
/// |-----------------------|---------------------|
/// | `add`                 | O(log N) expected   |
/// | `contains`            | O(log N) expected   |
/// | `len`                 | O(1)                |
/// | `level_count`         | O(1)                |
/// | `elements_on_level`   | O(N)                |
/// | `is_element_on_level` | O(N)                |
/// | `clone`               | O(N * levels)       |
///
/// # Examples
///
/// ```rust
/// use setkit::set::{RandomPromotion, TieredLinkedSet};
///
/// let mut list = TieredLinkedSet::with_promotion(RandomPromotion::with_seed(7));
/// for word in ["pear", "fig", "apple", "fig"] {
///     list.add(word);
/// }
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.elements_on_level(0), 3);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["apple", "fig", "pear"]);
/// ```
pub struct TieredLinkedSet<T, P = RandomPromotion> {
    nodes: Arena<Rung<T>>,
    top_head: NodeId,
    top_tail: NodeId,
    head: NodeId,
    tail: NodeId,
    levels: usize,
    length: usize,
    promotion: P,
}

impl<T> TieredLinkedSet<T> {
    /// Creates a new empty set with an entropy-seeded [`RandomPromotion`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_promotion(RandomPromotion::new())
    }
}

impl<T, P> TieredLinkedSet<T, P> {
    /// Creates a new empty set that consults `promotion` on every insertion.
    ///
    /// The set starts with one level holding just its two sentinels.
    #[must_use]
    pub fn with_promotion(promotion: P) -> Self {
        let mut nodes = Arena::new();
        let tail = nodes.alloc(Rung {
            key: TierKey::PositiveInfinity,
            right: None,
            bottom: None,
        });
        let head = nodes.alloc(Rung {
            key: TierKey::NegativeInfinity,
            right: Some(tail),
            bottom: None,
        });
        Self {
            nodes,
            top_head: head,
            top_tail: tail,
            head,
            tail,
            levels: 1,
            length: 0,
            promotion,
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of levels, including the base level. Always at
    /// least 1.
    #[inline]
    #[must_use]
    pub const fn level_count(&self) -> usize {
        self.levels
    }

    /// Returns the promotion oracle.
    #[must_use]
    pub const fn promotion(&self) -> &P {
        &self.promotion
    }

    /// Returns the number of elements on `level`, where level 0 is the base.
    ///
    /// Levels at or above [`level_count`](Self::level_count) hold nothing.
    #[must_use]
    pub fn elements_on_level(&self, level: usize) -> usize {
        self.keys_on_level(level)
            .filter(|key| !key.is_sentinel())
            .count()
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> TieredLinkedSetIterator<'_, T> {
        TieredLinkedSetIterator {
            nodes: &self.nodes,
            current: self.nodes[self.head].right,
            tail: self.tail,
            remaining: self.length,
        }
    }

    /// Sentinel heading `level`, found by walking down from the top.
    fn level_head(&self, level: usize) -> Option<NodeId> {
        if level >= self.levels {
            return None;
        }
        let mut current = self.top_head;
        for _ in level + 1..self.levels {
            current = self.nodes[current].bottom?;
        }
        Some(current)
    }

    /// Keys on `level` from left sentinel to right sentinel.
    fn keys_on_level(&self, level: usize) -> impl Iterator<Item = &TierKey<T>> + '_ {
        std::iter::successors(self.level_head(level), |&id| self.nodes[id].right)
            .map(|id| &self.nodes[id].key)
    }

    /// Arena slots one insertion of a `height`-rung tower takes, sentinels of
    /// any new levels included.
    const fn nodes_needed(&self, height: usize) -> usize {
        height + 2 * height.saturating_sub(self.levels)
    }
}

impl<T: Ord, P> TieredLinkedSet<T, P> {
    /// Returns `true` if the set contains the specified element.
    ///
    /// # Complexity
    ///
    /// O(log N) expected
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::set::TieredLinkedSet;
    ///
    /// let mut list = TieredLinkedSet::new();
    /// list.add(String::from("owl"));
    /// assert!(list.contains("owl"));
    /// assert!(!list.contains("lark"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        matches!(self.locate(element), Probe::Found)
    }

    /// Returns `true` if `element` occupies `level`.
    ///
    /// Levels at or above [`level_count`](Self::level_count) yield `false`.
    #[must_use]
    pub fn is_element_on_level<Q>(&self, element: &Q, level: usize) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys_on_level(level)
            .any(|key| key.cmp_element(element) == Ordering::Equal)
    }

    /// Descends from the top-left sentinel, recording the predecessor on each
    /// level, until the element is found or the base level runs out.
    fn locate<Q>(&self, element: &Q) -> Probe
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = Path::new();
        let mut current = self.top_head;
        loop {
            while let Some(next) = self.nodes[current].right {
                match self.nodes[next].key.cmp_element(element) {
                    Ordering::Less => current = next,
                    Ordering::Equal => return Probe::Found,
                    Ordering::Greater => break,
                }
            }
            path.push(current);
            match self.nodes[current].bottom {
                Some(below) => current = below,
                None => return Probe::Vacant(path),
            }
        }
    }
}

impl<T: Ord + Clone, P: LevelPromotion<T>> TieredLinkedSet<T, P> {
    /// Adds an element to the set.
    ///
    /// Returns `true` if the element was newly inserted. A new element lands
    /// on level 0 and climbs one level for every consecutive `true` from the
    /// oracle, creating fresh top levels as needed. The oracle is not
    /// consulted for an element that is already present.
    ///
    /// # Complexity
    ///
    /// O(log N) expected
    pub fn add(&mut self, element: T) -> bool {
        let Probe::Vacant(path) = self.locate(&element) else {
            return false;
        };
        let height = self.tower_height(&element);
        self.raise(element, &path, height);
        true
    }

    /// Adds an element, reporting allocation failure instead of aborting.
    ///
    /// Room for the tallest possible tower, sentinels of new levels included,
    /// is reserved before the oracle is consulted or anything is linked, so
    /// on `Err` neither the levels nor the oracle have moved.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if the nodes could not be allocated.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        let Probe::Vacant(path) = self.locate(&element) else {
            return Ok(false);
        };
        self.nodes.try_reserve(self.nodes_needed(MAX_LEVELS))?;
        let height = self.tower_height(&element);
        self.raise(element, &path, height);
        Ok(true)
    }

    fn tower_height(&mut self, element: &T) -> usize {
        let mut height = 1;
        while height < MAX_LEVELS && self.promotion.should_promote(element) {
            height += 1;
        }
        height
    }

    /// Links a tower of `height` rungs, bottom first.
    fn raise(&mut self, element: T, path: &Path, height: usize) {
        let mut below = None;
        for level in 0..height - 1 {
            let rung = self.link(level, TierKey::Normal(element.clone()), below, path);
            below = Some(rung);
        }
        self.link(height - 1, TierKey::Normal(element), below, path);
        self.length += 1;
    }

    fn link(
        &mut self,
        level: usize,
        key: TierKey<T>,
        below: Option<NodeId>,
        path: &Path,
    ) -> NodeId {
        if level < path.len() {
            let predecessor = path[path.len() - 1 - level];
            let id = self.nodes.alloc(Rung {
                key,
                right: self.nodes[predecessor].right,
                bottom: below,
            });
            self.nodes[predecessor].right = Some(id);
            return id;
        }

        let top_tail = self.nodes.alloc(Rung {
            key: TierKey::PositiveInfinity,
            right: None,
            bottom: Some(self.top_tail),
        });
        let id = self.nodes.alloc(Rung {
            key,
            right: Some(top_tail),
            bottom: below,
        });
        let top_head = self.nodes.alloc(Rung {
            key: TierKey::NegativeInfinity,
            right: Some(id),
            bottom: Some(self.top_head),
        });
        self.top_head = top_head;
        self.top_tail = top_tail;
        self.levels += 1;
        tracing::debug!(levels = self.levels, "added skip list level");
        id
    }
}

impl<T: Clone, P: LevelPromotion<T>> TieredLinkedSet<T, P> {
    /// Deep-copies the set, reporting allocation failure instead of aborting.
    ///
    /// The copy has the same levels and the same `right`/`bottom` links, and
    /// a [`fork`](LevelPromotion::fork) of the oracle.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::Allocation`] if the nodes could not be allocated.
    pub fn try_clone(&self) -> Result<Self, SetError> {
        let nodes = self.nodes.try_clone()?;
        Ok(self.with_nodes(nodes))
    }

    /// Copy of `self` over an already copied arena.
    fn with_nodes(&self, nodes: Arena<Rung<T>>) -> Self {
        Self {
            nodes,
            top_head: self.top_head,
            top_tail: self.top_tail,
            head: self.head,
            tail: self.tail,
            levels: self.levels,
            length: self.length,
            promotion: self.promotion.fork(),
        }
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// An iterator over the elements of a [`TieredLinkedSet`] in ascending order.
pub struct TieredLinkedSetIterator<'a, T> {
    nodes: &'a Arena<Rung<T>>,
    current: Option<NodeId>,
    tail: NodeId,
    remaining: usize,
}

impl<'a, T> Iterator for TieredLinkedSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current.filter(|&id| id != self.tail)?;
        let rung = &self.nodes[id];
        self.current = rung.right;
        self.remaining -= 1;
        rung.key.element()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for TieredLinkedSetIterator<'_, T> {}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Ord + Clone, P: LevelPromotion<T>> Set<T> for TieredLinkedSet<T, P> {
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

impl<T: Clone, P: LevelPromotion<T>> Clone for TieredLinkedSet<T, P> {
    fn clone(&self) -> Self {
        self.with_nodes(self.nodes.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
        self.top_head = source.top_head;
        self.top_tail = source.top_tail;
        self.head = source.head;
        self.tail = source.tail;
        self.levels = source.levels;
        self.length = source.length;
        self.promotion = source.promotion.fork();
    }
}

impl<T, P: Default> Default for TieredLinkedSet<T, P> {
    fn default() -> Self {
        Self::with_promotion(P::default())
    }
}

impl<T: Ord + Clone, P: LevelPromotion<T> + Default> FromIterator<T> for TieredLinkedSet<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: Ord + Clone, P: LevelPromotion<T>> Extend<T> for TieredLinkedSet<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T, P> IntoIterator for &'a TieredLinkedSet<T, P> {
    type Item = &'a T;
    type IntoIter = TieredLinkedSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, P> PartialEq for TieredLinkedSet<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for TieredLinkedSet<T, P> {}

impl<T: fmt::Debug, P> fmt::Debug for TieredLinkedSet<T, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

static_assertions::assert_impl_all!(TieredLinkedSet<i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(RandomPromotion: Send, Sync, Default);

// =============================================================================
// Tests
// =============================================================================
