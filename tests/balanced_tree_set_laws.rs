#![cfg(feature = "tree")]
//! Property-based tests for BalancedTreeSet.
//!
//! The tree's shape is recovered from its preorder sequence, which uniquely
//! determines a binary search tree, so balance can be checked from outside.

use proptest::prelude::*;
use setkit::set::BalancedTreeSet;

// =============================================================================
// Helpers
// =============================================================================

fn preorder_of(set: &BalancedTreeSet<i32>) -> Vec<i32> {
    let mut visited = Vec::new();
    set.preorder(|element| visited.push(*element));
    visited
}

fn inorder_of(set: &BalancedTreeSet<i32>) -> Vec<i32> {
    let mut visited = Vec::new();
    set.inorder(|element| visited.push(*element));
    visited
}

/// Height of the search tree with the given preorder, or `None` if some
/// node's subtrees differ in height by more than one.
fn balanced_height(preorder: &[i32]) -> Option<isize> {
    let Some((&root, rest)) = preorder.split_first() else {
        return Some(-1);
    };
    let split = rest.partition_point(|element| *element < root);
    let left = balanced_height(&rest[..split])?;
    let right = balanced_height(&rest[split..])?;
    ((left - right).abs() <= 1).then_some(left.max(right) + 1)
}

/// Preorder of the plain search tree built by inserting `order` one by one.
fn naive_preorder(order: &[i32]) -> Vec<i32> {
    let Some((&root, rest)) = order.split_first() else {
        return Vec::new();
    };
    let smaller: Vec<i32> = rest
        .iter()
        .copied()
        .filter(|element| *element < root)
        .collect();
    let larger: Vec<i32> = rest
        .iter()
        .copied()
        .filter(|element| *element > root)
        .collect();
    let mut preorder = vec![root];
    preorder.extend(naive_preorder(&smaller));
    preorder.extend(naive_preorder(&larger));
    preorder
}

fn build(elements: &[i32], balancing: bool) -> BalancedTreeSet<i32> {
    let mut set = BalancedTreeSet::with_balancing(balancing);
    set.extend(elements.iter().copied());
    set
}

// =============================================================================
// Ordering Laws
// =============================================================================

proptest! {
    /// Law: inorder traversal is strictly ascending and holds each distinct
    /// element exactly once.
    #[test]
    fn prop_inorder_is_sorted_and_deduplicated(
        elements in prop::collection::vec(-500i32..500, 0..200),
        balancing: bool
    ) {
        let set = build(&elements, balancing);
        let mut expected = elements.clone();
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(inorder_of(&set), expected.clone());
        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), expected);
    }

    /// Law: every added element is contained and nothing else is.
    #[test]
    fn prop_contains_after_add(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        probe: i32,
        balancing: bool
    ) {
        let set = build(&elements, balancing);
        for element in &elements {
            prop_assert!(set.contains(element));
        }
        prop_assert_eq!(set.contains(&probe), elements.contains(&probe));
    }
}

// =============================================================================
// Balance Laws
// =============================================================================

proptest! {
    /// Law: with balancing, every node's subtree heights differ by at most one
    /// after every insertion, and `height` agrees with the recovered shape.
    #[test]
    fn prop_avl_balance_after_every_add(
        elements in prop::collection::vec(-1000i32..1000, 0..150)
    ) {
        let mut set = BalancedTreeSet::new();
        for element in elements {
            set.add(element);
            let height = balanced_height(&preorder_of(&set));
            prop_assert_eq!(height, Some(set.height()));
        }
    }

    /// Law: a plain tree has the shape of naive insertion.
    #[test]
    fn prop_unbalanced_shape_matches_naive_insertion(
        elements in prop::collection::vec(-50i32..50, 0..60)
    ) {
        let set = build(&elements, false);

        let mut first_seen = Vec::new();
        for element in &elements {
            if !first_seen.contains(element) {
                first_seen.push(*element);
            }
        }
        prop_assert_eq!(preorder_of(&set), naive_preorder(&first_seen));
    }
}

// =============================================================================
// Idempotence and Copy Laws
// =============================================================================

proptest! {
    /// Law: adding an element twice leaves every observation unchanged.
    #[test]
    fn prop_add_is_idempotent(
        elements in prop::collection::vec(any::<i32>(), 1..80),
        balancing: bool,
        pick in any::<prop::sample::Index>()
    ) {
        let mut set = build(&elements, balancing);
        let before = (set.len(), set.height(), preorder_of(&set));

        set.add(elements[pick.index(elements.len())]);
        prop_assert_eq!((set.len(), set.height(), preorder_of(&set)), before);
    }

    /// Law: a copy matches the source exactly and evolves independently.
    #[test]
    fn prop_clone_is_exact_and_independent(
        elements in prop::collection::vec(any::<i32>(), 0..80),
        extra in prop::collection::vec(any::<i32>(), 1..20),
        balancing: bool
    ) {
        let original = build(&elements, balancing);
        let mut copy = original.clone();

        prop_assert_eq!(copy.height(), original.height());
        prop_assert_eq!(preorder_of(&copy), preorder_of(&original));

        let snapshot = preorder_of(&original);
        copy.extend(extra);
        prop_assert_eq!(preorder_of(&original), snapshot);
    }
}
