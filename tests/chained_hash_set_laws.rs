#![cfg(feature = "hash")]
//! Property-based tests for ChainedHashSet.
//!
//! The identity hash keeps bucket placement predictable, so the per-bucket
//! introspection can be compared against `hash % capacity`.

use proptest::prelude::*;
use setkit::set::{ChainedHashSet, DEFAULT_CAPACITY};

type IdentitySet = ChainedHashSet<usize, fn(&usize) -> usize>;

fn identity(element: &usize) -> usize {
    *element
}

fn build(elements: &[usize], capacity: usize) -> IdentitySet {
    let mut set: IdentitySet = ChainedHashSet::with_capacity(capacity, identity);
    set.extend(elements.iter().copied());
    set
}

fn bucket_counts(set: &IdentitySet) -> Vec<usize> {
    (0..set.capacity())
        .map(|index| set.elements_at_index(index))
        .collect()
}

// =============================================================================
// Load Factor Laws
// =============================================================================

proptest! {
    /// Law: size / capacity never exceeds 0.8 after an insertion.
    #[test]
    fn prop_load_factor_bounded_after_every_add(
        elements in prop::collection::vec(any::<usize>(), 0..300),
        capacity in 1usize..40
    ) {
        let mut set: IdentitySet = ChainedHashSet::with_capacity(capacity, identity);
        for element in elements {
            set.add(element);
            prop_assert!(set.len() * 5 <= set.capacity() * 4);
        }
    }

    /// Law: capacity only ever moves along the `capacity * 2 + 1` sequence.
    #[test]
    fn prop_capacity_follows_growth_sequence(
        elements in prop::collection::vec(0usize..10_000, 0..200)
    ) {
        let set = build(&elements, DEFAULT_CAPACITY);
        let mut expected = DEFAULT_CAPACITY;
        while expected < set.capacity() {
            expected = expected * 2 + 1;
        }
        prop_assert_eq!(set.capacity(), expected);
    }
}

// =============================================================================
// Placement Laws
// =============================================================================

proptest! {
    /// Law: every element sits in bucket `hash % capacity` and nowhere else,
    /// and the bucket counts add up to the size.
    #[test]
    fn prop_elements_sit_in_their_bucket(
        elements in prop::collection::vec(any::<usize>(), 0..150),
        capacity in 1usize..30
    ) {
        let set = build(&elements, capacity);
        for element in &elements {
            let home = element % set.capacity();
            prop_assert!(set.is_element_at_index(element, home));
            if set.capacity() > 1 {
                let neighbour = (home + 1) % set.capacity();
                prop_assert!(!set.is_element_at_index(element, neighbour));
            }
        }
        prop_assert_eq!(bucket_counts(&set).iter().sum::<usize>(), set.len());
    }

    /// Law: indices at or past the capacity report nothing.
    #[test]
    fn prop_out_of_range_index_is_empty(
        elements in prop::collection::vec(any::<usize>(), 0..50),
        offset in 0usize..1000
    ) {
        let set = build(&elements, DEFAULT_CAPACITY);
        let index = set.capacity() + offset;
        prop_assert_eq!(set.elements_at_index(index), 0);
        for element in &elements {
            prop_assert!(!set.is_element_at_index(element, index));
        }
    }
}

// =============================================================================
// Idempotence and Copy Laws
// =============================================================================

proptest! {
    /// Law: size counts distinct elements, and re-adding changes nothing.
    #[test]
    fn prop_add_is_idempotent(
        elements in prop::collection::vec(0usize..100, 1..120)
    ) {
        let mut set = build(&elements, DEFAULT_CAPACITY);
        let mut distinct = elements.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(set.len(), distinct.len());

        let before = (set.capacity(), bucket_counts(&set));
        for element in &elements {
            prop_assert!(!set.add(*element));
        }
        prop_assert_eq!((set.capacity(), bucket_counts(&set)), before);
    }

    /// Law: a copy has the same buckets and chains, and evolves independently.
    #[test]
    fn prop_clone_is_exact_and_independent(
        elements in prop::collection::vec(any::<usize>(), 0..100),
        extra in prop::collection::vec(any::<usize>(), 1..30)
    ) {
        let original = build(&elements, DEFAULT_CAPACITY);
        let mut copy = original.clone();

        prop_assert_eq!(copy.capacity(), original.capacity());
        prop_assert_eq!(bucket_counts(&copy), bucket_counts(&original));
        prop_assert_eq!(
            copy.iter().collect::<Vec<_>>(),
            original.iter().collect::<Vec<_>>()
        );

        let snapshot = original.iter().copied().collect::<Vec<_>>();
        copy.extend(extra);
        prop_assert_eq!(original.iter().copied().collect::<Vec<_>>(), snapshot);
    }
}
