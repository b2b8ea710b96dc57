use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbtree_collections::{Error, RBTreeMultiSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// A narrow range so most values repeat.
fn value_strategy() -> impl Strategy<Value = i32> {
    -200i32..200i32
}

/// Sorted `Vec` standing in for a multiset.
#[derive(Default)]
struct Model {
    values: Vec<i32>,
}

impl Model {
    fn insert(&mut self, value: i32) {
        let at = self.values.partition_point(|v| *v <= value);
        self.values.insert(at, value);
    }

    fn remove_one(&mut self, value: i32) -> bool {
        match self.values.binary_search(&value) {
            Ok(at) => {
                self.values.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    fn count(&self, value: i32) -> usize {
        self.values.iter().filter(|v| **v == value).count()
    }

    fn lower_bound(&self, value: i32) -> Option<&i32> {
        self.values.get(self.values.partition_point(|v| *v < value))
    }

    fn upper_bound(&self, value: i32) -> Option<&i32> {
        self.values.get(self.values.partition_point(|v| *v <= value))
    }
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MultiSetOp {
    Insert(i32),
    RemoveOne(i32),
    RemoveAll(i32),
    EraseFound(i32),
    Count(i32),
    Contains(i32),
    LowerBound(i32),
    UpperBound(i32),
    EqualRange(i32),
}

fn multiset_op_strategy() -> impl Strategy<Value = MultiSetOp> {
    prop_oneof![
        6 => value_strategy().prop_map(MultiSetOp::Insert),
        2 => value_strategy().prop_map(MultiSetOp::RemoveOne),
        1 => value_strategy().prop_map(MultiSetOp::RemoveAll),
        2 => value_strategy().prop_map(MultiSetOp::EraseFound),
        1 => value_strategy().prop_map(MultiSetOp::Count),
        1 => value_strategy().prop_map(MultiSetOp::Contains),
        1 => value_strategy().prop_map(MultiSetOp::LowerBound),
        1 => value_strategy().prop_map(MultiSetOp::UpperBound),
        1 => value_strategy().prop_map(MultiSetOp::EqualRange),
    ]
}

// ─── Core operations against a sorted Vec ────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMultiSet and a sorted Vec and
    /// asserts identical results at every step.
    #[test]
    fn multiset_ops_match_sorted_vec(ops in proptest::collection::vec(multiset_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeMultiSet<i32> = RBTreeMultiSet::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                MultiSetOp::Insert(v) => {
                    model.insert(v);
                    prop_assert_eq!(rb_set.insert(v).value(), &v, "insert({})", v);
                }
                MultiSetOp::RemoveOne(v) => {
                    prop_assert_eq!(rb_set.remove_one(&v), model.remove_one(v), "remove_one({})", v);
                }
                MultiSetOp::RemoveAll(v) => {
                    let expected = model.count(v);
                    model.values.retain(|x| *x != v);
                    prop_assert_eq!(rb_set.remove_all(&v), expected, "remove_all({})", v);
                }
                MultiSetOp::EraseFound(v) => {
                    let position = rb_set.find(&v).position();
                    let expected = model.remove_one(v).then_some(v);
                    prop_assert_eq!(rb_set.erase(position), expected, "erase(find({}))", v);
                }
                MultiSetOp::Count(v) => {
                    prop_assert_eq!(rb_set.count(&v), model.count(v), "count({})", v);
                }
                MultiSetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(&v), model.count(v) > 0, "contains({})", v);
                }
                MultiSetOp::LowerBound(v) => {
                    prop_assert_eq!(rb_set.lower_bound(&v).get(), model.lower_bound(v), "lower_bound({})", v);
                }
                MultiSetOp::UpperBound(v) => {
                    prop_assert_eq!(rb_set.upper_bound(&v).get(), model.upper_bound(v), "upper_bound({})", v);
                }
                MultiSetOp::EqualRange(v) => {
                    let (mut first, last) = rb_set.equal_range(&v);
                    let mut run = 0;
                    while first != last {
                        prop_assert_eq!(first.value(), &v);
                        run += 1;
                        first.move_next();
                    }
                    prop_assert_eq!(run, model.count(v), "equal_range({})", v);
                }
            }
            prop_assert_eq!(rb_set.len(), model.values.len(), "len mismatch after {:?}", op);
        }

        prop_assert!(rb_set.iter().eq(model.values.iter()));
    }

    /// Merging concatenates the two sorted sequences and empties `other`.
    #[test]
    fn merge_moves_everything(
        a in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
        b in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
    ) {
        let mut rb_a: RBTreeMultiSet<i32> = a.iter().copied().collect();
        let mut rb_b: RBTreeMultiSet<i32> = b.iter().copied().collect();
        rb_a.merge(&mut rb_b);

        let mut expected: Vec<i32> = a.into_iter().chain(b).collect();
        expected.sort_unstable();

        prop_assert!(rb_b.is_empty());
        prop_assert!(rb_a.iter().eq(expected.iter()));
        prop_assert!(rb_a.into_iter().rev().eq(expected.into_iter().rev()));
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn duplicates_are_counted() {
    let mut set = RBTreeMultiSet::new();
    for v in [1, 5, 9, 5, 5] {
        set.insert(v);
    }
    assert_eq!(set.count(&5), 3);

    assert!(set.remove_one(&5));
    assert_eq!(set.count(&5), 2);
    assert_eq!(set.count(&1), 1);
    assert_eq!(set.count(&9), 1);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 5, 5, 9]);
}

#[test]
fn erase_removes_only_the_named_copy() {
    let mut set = RBTreeMultiSet::from([2, 2, 2, 1, 3]);
    let positions = set.insert_many([2, 2]);
    assert_eq!(positions.len(), 2);
    assert_eq!(set.len(), 7);

    assert_eq!(set.erase(positions[1]), Some(2));
    assert_eq!(set.count(&2), 4);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 2, 2, 2, 3]);

    // Positions taken fresh are always live.
    while set.contains(&2) {
        let position = set.find(&2).position();
        assert_eq!(set.erase(position), Some(2));
    }
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn equal_range_of_missing_value_is_empty() {
    let set = RBTreeMultiSet::from([1, 3, 3, 5]);

    let (first, last) = set.equal_range(&4);
    assert!(first == last);
    assert_eq!(first.value(), &5);

    let (first, last) = set.equal_range(&9);
    assert!(first.is_end() && last.is_end());
}

#[test]
fn find_returns_first_of_run() {
    let mut set = RBTreeMultiSet::new();
    for v in [1, 1, 0, 1, 2] {
        set.insert(v);
    }

    let cursor = set.find(&1);
    assert_eq!(cursor.prev().value(), &0);
    assert_eq!(cursor, set.lower_bound(&1));
    assert_eq!(set.get(&1), Some(&1));
    assert_eq!(set.remove_all(&1), 3);
    assert!(set.find(&1).is_end());
}

#[test]
fn stale_position_is_rejected() {
    let mut set = RBTreeMultiSet::from([7, 7]);
    let position = set.find(&7).position();
    assert_eq!(set.try_erase(position), Ok(Some(7)));
    assert_eq!(set.try_erase(position), Err(Error::InvalidPosition));
    assert_eq!(set.len(), 1);
}

#[test]
fn clone_and_eq() {
    let set = RBTreeMultiSet::from([3, 1, 3]);
    let copy = set.clone();
    assert_eq!(copy, set);
    assert_eq!(format!("{copy:?}"), "[1, 3, 3]");
    assert_ne!(copy, RBTreeMultiSet::from([1, 3]));
}
