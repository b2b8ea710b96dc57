use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use proptest::prelude::*;
use rbtree_collections::{Error, RBTreeSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates values in a range small enough to cause collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Take(i64),
    EraseFound(i64),
    Contains(i64),
    Get(i64),
    LowerBound(i64),
    UpperBound(i64),
    First,
    Last,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        2 => value_strategy().prop_map(SetOp::Remove),
        1 => value_strategy().prop_map(SetOp::Take),
        2 => value_strategy().prop_map(SetOp::EraseFound),
        1 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Get),
        1 => value_strategy().prop_map(SetOp::LowerBound),
        1 => value_strategy().prop_map(SetOp::UpperBound),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeSet and BTreeSet and asserts
    /// identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    let expected = bt_set.insert(*v);
                    let (cursor, inserted) = rb_set.insert(*v);
                    prop_assert_eq!(inserted, expected, "insert({})", v);
                    prop_assert_eq!(cursor.get(), Some(v), "insert({}) cursor", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(rb_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(rb_set.take(v), bt_set.take(v), "take({})", v);
                }
                SetOp::EraseFound(v) => {
                    let position = rb_set.find(v).position();
                    prop_assert_eq!(rb_set.erase(position), bt_set.take(v), "erase(find({}))", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::Get(v) => {
                    prop_assert_eq!(rb_set.get(v), bt_set.get(v), "get({})", v);
                }
                SetOp::LowerBound(v) => {
                    prop_assert_eq!(rb_set.lower_bound(v).get(), bt_set.range(v..).next(), "lower_bound({})", v);
                }
                SetOp::UpperBound(v) => {
                    let expected = bt_set.range((Excluded(v), Unbounded)).next();
                    prop_assert_eq!(rb_set.upper_bound(v).get(), expected, "upper_bound({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(rb_set.first(), bt_set.first(), "first");
                }
                SetOp::Last => {
                    prop_assert_eq!(rb_set.last(), bt_set.last(), "last");
                }
            }
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
        }

        prop_assert!(rb_set.iter().eq(bt_set.iter()));
    }

    /// Tests that iteration order matches BTreeSet in both directions.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        prop_assert!(rb_set.iter().eq(bt_set.iter()));
        prop_assert!(rb_set.iter().rev().eq(bt_set.iter().rev()));
        prop_assert_eq!(rb_set.iter().len(), bt_set.len());
        prop_assert!((&rb_set).into_iter().eq(&bt_set));
        prop_assert!(rb_set.into_iter().eq(bt_set));
    }

    /// Merging leaves exactly the shared values behind in `other`.
    #[test]
    fn merge_matches_btreeset(
        a in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        b in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
    ) {
        let mut rb_a: RBTreeSet<i64> = a.iter().copied().collect();
        let mut rb_b: RBTreeSet<i64> = b.iter().copied().collect();
        let bt_a: BTreeSet<i64> = a.into_iter().collect();
        let bt_b: BTreeSet<i64> = b.into_iter().collect();

        rb_a.merge(&mut rb_b);

        prop_assert!(rb_a.iter().eq(bt_a.union(&bt_b)));
        prop_assert!(rb_b.iter().eq(bt_a.intersection(&bt_b)));
    }

    /// Cursor traversal from either end visits every value once.
    #[test]
    fn cursor_walk_matches_btreeset(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.into_iter().collect();

        let mut forward = Vec::new();
        let mut cursor = rb_set.begin();
        while let Some(v) = cursor.get() {
            forward.push(*v);
            cursor = cursor.next();
        }
        prop_assert!(forward.iter().eq(bt_set.iter()));

        let mut backward = Vec::new();
        let mut cursor = rb_set.end();
        cursor.move_prev();
        while let Some(v) = cursor.get() {
            backward.push(*v);
            cursor.move_prev();
        }
        prop_assert!(backward.iter().eq(bt_set.iter().rev()));
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn round_trip_of_small_set() {
    let set = RBTreeSet::from([3, 2, 5, 7, 9, 12]);

    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [2, 3, 5, 7, 9, 12]);
    assert_eq!(set.find(&9).value(), &9);
    assert_eq!(set.find(&100), set.end());
}

#[test]
fn merge_disjoint_sets() {
    let mut a = RBTreeSet::from([1, 3, 5]);
    let mut b = RBTreeSet::from([2, 4, 6, 7]);
    a.merge(&mut b);

    assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
    assert!(b.is_empty());
}

#[test]
fn duplicate_insert_points_at_existing() {
    let mut set = RBTreeSet::new();
    let first = set.insert(String::from("a")).0.position();
    let (cursor, inserted) = set.insert(String::from("a"));
    assert!(!inserted);
    assert_eq!(cursor.position(), first);
    assert_eq!(set.len(), 1);
}

#[test]
fn stale_position_is_rejected() {
    let mut set = RBTreeSet::from([1, 2, 3]);
    let two = set.find(&2).position();
    assert_eq!(set.try_erase(two), Ok(Some(2)));
    assert_eq!(set.try_erase(two), Err(Error::InvalidPosition));
}

#[test]
fn merge_leaves_other_positions_stale() {
    let mut a = RBTreeSet::from([1]);
    let mut b = RBTreeSet::new();
    b.insert(3);
    let three = b.find(&3).position();
    b.insert(1);

    a.merge(&mut b);
    assert!(a.contains(&3));
    assert_eq!(b.try_erase(three), Err(Error::InvalidPosition));
    assert!(b.contains(&1));
}

#[test]
#[should_panic(expected = "`RBTreeSet::erase()` - ")]
fn erase_of_stale_position_names_the_set() {
    let mut set = RBTreeSet::from([5, 6]);
    let five = set.find(&5).position();
    set.erase(five);
    set.erase(five);
}

#[test]
#[should_panic(expected = "`Cursor::value()` - cursor is at the end!")]
fn end_cursor_value_panics() {
    let set = RBTreeSet::from([1]);
    let _ = set.begin().next().value();
}

#[test]
fn insert_many_reports_duplicates() {
    let mut set = RBTreeSet::new();
    let results = set.insert_many([4, 4, 1, 4]);
    let inserted: Vec<bool> = results.iter().map(|&(_, inserted)| inserted).collect();
    assert_eq!(inserted, [true, false, true, false]);
    assert_eq!(results[0].0, results[3].0);
}

#[test]
fn clone_is_independent() {
    let original: RBTreeSet<i32> = (0..100).collect();
    let mut copy = original.clone();
    assert_eq!(copy, original);
    copy.remove(&50);
    assert!(original.contains(&50));
    assert_ne!(copy, original);
}

#[test]
fn debug_formats_like_a_set() {
    let set = RBTreeSet::from([2, 1]);
    assert_eq!(format!("{set:?}"), "{1, 2}");
    assert_eq!(format!("{:?}", set.iter()), "[1, 2]");
}

#[test]
fn borrowed_lookup() {
    let set: RBTreeSet<String> = ["pear", "apple"].into_iter().map(String::from).collect();
    assert!(set.contains("apple"));
    assert_eq!(set.lower_bound("b").value(), "pear");
    assert_eq!(set.get("pear").map(String::as_str), Some("pear"));
}
