#![cfg(feature = "tree")]
//! Integration tests for BalancedTreeSet.
//!
//! These tests exercise the public API only: insertion, membership,
//! traversal orders, height and deep copies, with and without balancing.

use rstest::rstest;
use setkit::set::{BalancedTreeSet, Set};

fn preorder_of<T: Clone>(set: &BalancedTreeSet<T>) -> Vec<T> {
    let mut visited = Vec::new();
    set.preorder(|element| visited.push(element.clone()));
    visited
}

fn inorder_of<T: Clone>(set: &BalancedTreeSet<T>) -> Vec<T> {
    let mut visited = Vec::new();
    set.inorder(|element| visited.push(element.clone()));
    visited
}

fn postorder_of<T: Clone>(set: &BalancedTreeSet<T>) -> Vec<T> {
    let mut visited = Vec::new();
    set.postorder(|element| visited.push(element.clone()));
    visited
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_balancing_set() {
    let set: BalancedTreeSet<i32> = BalancedTreeSet::new();
    assert!(set.is_empty());
    assert!(set.is_balancing());
    assert_eq!(set.len(), 0);
    assert_eq!(set.height(), -1);
    assert!(set.is_implemented());
}

#[rstest]
fn test_default_matches_new() {
    let set: BalancedTreeSet<i32> = BalancedTreeSet::default();
    assert!(set.is_balancing());
    assert!(set.is_empty());
}

#[rstest]
fn test_with_balancing_false_reports_flag() {
    let set: BalancedTreeSet<i32> = BalancedTreeSet::with_balancing(false);
    assert!(!set.is_balancing());
}

// =============================================================================
// Rebalancing
// =============================================================================

#[rstest]
fn test_ascending_triple_rotates_to_middle_root() {
    let mut set = BalancedTreeSet::new();
    for element in [1, 2, 3] {
        set.add(element);
    }

    assert_eq!(set.height(), 1);
    assert_eq!(inorder_of(&set), vec![1, 2, 3]);
    assert_eq!(preorder_of(&set), vec![2, 1, 3]);
}

#[rstest]
#[case(&[3, 2, 1])]
#[case(&[3, 1, 2])]
#[case(&[1, 3, 2])]
#[case(&[1, 2, 3])]
fn test_every_rotation_case_balances_three_nodes(#[case] order: &[i32]) {
    let set: BalancedTreeSet<i32> = order.iter().copied().collect();
    assert_eq!(set.height(), 1);
    assert_eq!(preorder_of(&set), vec![2, 1, 3]);
}

#[rstest]
fn test_unbalanced_ascending_triple_is_a_chain() {
    let mut set = BalancedTreeSet::with_balancing(false);
    for element in [1, 2, 3] {
        set.add(element);
    }

    assert_eq!(set.height(), 2);
    assert_eq!(preorder_of(&set), vec![1, 2, 3]);
    assert_eq!(postorder_of(&set), vec![3, 2, 1]);
}

#[rstest]
#[case(1, 0)]
#[case(3, 1)]
#[case(7, 2)]
#[case(15, 3)]
#[case(1000, 9)]
fn test_sorted_input_reaches_minimal_height(#[case] count: i32, #[case] expected: isize) {
    let set: BalancedTreeSet<i32> = (0..count).collect();
    assert_eq!(set.height(), expected);
}

#[rstest]
fn test_long_unbalanced_chain_traverses_without_recursion() {
    let set = {
        let mut set = BalancedTreeSet::with_balancing(false);
        set.extend(0..10_000);
        set
    };

    assert_eq!(set.height(), 9_999);
    let mut count = 0;
    set.postorder(|_| count += 1);
    assert_eq!(count, 10_000);
    drop(set);
}

// =============================================================================
// Membership
// =============================================================================

#[rstest]
fn test_contains_reports_membership() {
    let set: BalancedTreeSet<i32> = [40, 10, 70, 20].into_iter().collect();
    assert!(set.contains(&10));
    assert!(set.contains(&70));
    assert!(!set.contains(&15));
    assert!(!set.contains(&80));
}

#[rstest]
fn test_add_duplicate_is_idempotent() {
    let mut set = BalancedTreeSet::new();
    assert!(set.add("kiwi"));
    let before = preorder_of(&set);

    assert!(!set.add("kiwi"));
    assert_eq!(set.len(), 1);
    assert_eq!(preorder_of(&set), before);
}

#[rstest]
fn test_contains_with_borrowed_str() {
    let mut set = BalancedTreeSet::new();
    set.add(String::from("maple"));
    assert!(set.contains("maple"));
    assert!(!set.contains("oak"));
}

#[rstest]
fn test_used_through_set_trait_object() {
    let mut set: BalancedTreeSet<u8> = BalancedTreeSet::new();
    let dynamic: &mut dyn Set<u8> = &mut set;
    dynamic.add(9);
    dynamic.add(9);
    assert_eq!(dynamic.size(), 1);
    assert!(dynamic.contains(&9));
}

// =============================================================================
// Copies
// =============================================================================

#[rstest]
fn test_clone_matches_source_exactly() {
    let original: BalancedTreeSet<i32> = [50, 20, 80, 10, 30, 90, 25].into_iter().collect();
    let copy = original.clone();

    assert_eq!(copy.height(), original.height());
    assert_eq!(preorder_of(&copy), preorder_of(&original));
    assert_eq!(copy.is_balancing(), original.is_balancing());
    assert_eq!(copy, original);
}

#[rstest]
fn test_clone_is_independent() {
    let original: BalancedTreeSet<i32> = [2, 1, 3].into_iter().collect();
    let mut copy = original.clone();
    copy.extend([4, 5, 6]);

    assert_eq!(original.len(), 3);
    assert!(!original.contains(&4));
    assert_eq!(copy.len(), 6);
}

#[rstest]
fn test_clone_keeps_unbalanced_shape() {
    let mut original = BalancedTreeSet::with_balancing(false);
    original.extend([3, 1, 2]);

    let copy = original.clone();
    assert!(!copy.is_balancing());
    assert_eq!(copy.height(), 2);
    assert_eq!(preorder_of(&copy), vec![3, 1, 2]);
}

#[rstest]
fn test_clone_from_and_self_assignment() {
    let source: BalancedTreeSet<i32> = (0..10).collect();
    let mut target: BalancedTreeSet<i32> = BalancedTreeSet::with_balancing(false);
    target.clone_from(&source);
    assert_eq!(preorder_of(&target), preorder_of(&source));

    let snapshot = target.clone();
    target = target.clone();
    assert_eq!(target, snapshot);
}

#[rstest]
fn test_move_leaves_source_empty_via_take() {
    let mut source: BalancedTreeSet<i32> = (0..5).collect();
    let moved = std::mem::take(&mut source);

    assert!(source.is_empty());
    assert_eq!(source.height(), -1);
    assert_eq!(moved.len(), 5);
}

// =============================================================================
// Fallible API
// =============================================================================

#[rstest]
fn test_try_add_and_try_clone() {
    let mut set = BalancedTreeSet::new();
    assert_eq!(set.try_add(1), Ok(true));
    assert_eq!(set.try_add(1), Ok(false));

    let copy = set.try_clone().unwrap();
    assert_eq!(copy, set);
}

#[rstest]
fn test_debug_output_is_sorted() {
    let set: BalancedTreeSet<char> = "tree".chars().collect();
    assert_eq!(format!("{set:?}"), "{'e', 'r', 't'}");
}
