use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use crate::raw::{Handle, RawCursor, RawRBTree};
use crate::rbtree_map::{self, Keys};
use crate::rbtree_set::{Cursor, IntoIter, Iter};
use crate::{Error, Position};

/// An ordered multiset based on a red-black tree.
///
/// Unlike [`RBTreeSet`](crate::RBTreeSet), inserting a value that compares equal to one already
/// stored adds another copy. Equal values sit next to each other in iteration order; a new copy
/// is placed after the copies already present at the point it descends to, so the order among
/// equal values is deterministic but should not be relied on as insertion order.
///
/// Cursors are shared with the set, see [`Cursor`].
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeMultiSet;
///
/// let mut rolls = RBTreeMultiSet::new();
/// for roll in [4, 2, 6, 4, 4, 1] {
///     rolls.insert(roll);
/// }
///
/// assert_eq!(rolls.len(), 6);
/// assert_eq!(rolls.count(&4), 3);
///
/// // Walk the run of fours.
/// let (mut first, last) = rolls.equal_range(&4);
/// let mut fours = 0;
/// while first != last {
///     fours += 1;
///     first.move_next();
/// }
/// assert_eq!(fours, 3);
///
/// rolls.remove_one(&4);
/// assert_eq!(rolls.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 4, 6]);
/// ```
pub struct RBTreeMultiSet<T> {
    raw: RawRBTree<T, ()>,
}

impl<T> RBTreeMultiSet<T> {
    /// Makes a new, empty `RBTreeMultiSet`.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> RBTreeMultiSet<T> {
        RBTreeMultiSet { raw: RawRBTree::new() }
    }

    /// Creates an empty multiset with room for at least `capacity` elements.
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMultiSet {
            raw: RawRBTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the multiset can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of elements any multiset of this type can hold.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        RawRBTree::<T, ()>::max_size()
    }

    /// Clears the multiset, removing all elements.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the multiset, counting every copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let set = RBTreeMultiSet::from([1, 1, 2]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the multiset contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn cursor(&self, node: Option<Handle>) -> Cursor<'_, T> {
        Cursor::new(RawCursor::new(&self.raw, node))
    }

    /// Returns a cursor at the smallest element, or the end cursor if the multiset is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(RawCursor::begin(&self.raw))
    }

    /// Returns the end cursor, one past the largest element.
    pub const fn end(&self) -> Cursor<'_, T> {
        Cursor::new(RawCursor::end(&self.raw))
    }

    /// Gets an iterator that visits every element, copies included, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(Keys::new(&self.raw))
    }

    /// Removes the element at `position` and returns it. The end position is a no-op.
    ///
    /// Only the one element is removed; other copies of an equal value stay.
    ///
    /// # Panics
    ///
    /// Panics if `position` refers to an element that has already been removed.
    pub fn erase(&mut self, position: Position) -> Option<T> {
        match self.try_erase(position) {
            Ok(value) => value,
            Err(err) => panic!("`RBTreeMultiSet::erase()` - {err}"),
        }
    }

    /// Removes the element at `position`, reporting a stale position as
    /// [`Error::InvalidPosition`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if the element `position` referred to has been removed.
    pub fn try_erase(&mut self, position: Position) -> Result<Option<T>, Error> {
        Ok(position.resolve(&self.raw)?.map(|handle| self.raw.erase(handle).0))
    }
}

impl<T: Ord> RBTreeMultiSet<T> {
    /// Adds a copy of `value`, whether or not an equal value is already present.
    ///
    /// Returns a cursor at the new element.
    ///
    /// # Panics
    ///
    /// Panics if memory for the new node cannot be allocated. See
    /// [`try_insert`](Self::try_insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let mut set = RBTreeMultiSet::new();
    /// set.insert(5);
    /// set.insert(5);
    /// let cursor = set.insert(5);
    /// assert_eq!(cursor.value(), &5);
    /// assert_eq!(set.count(&5), 3);
    /// ```
    pub fn insert(&mut self, value: T) -> Cursor<'_, T> {
        let (handle, _) = self.raw.insert_to_tree(value, (), true);
        self.cursor(Some(handle))
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] or [`Error::CapacityOverflow`] if no node could be
    /// allocated; the multiset is left unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<Cursor<'_, T>, Error> {
        let (handle, _) = self.raw.try_insert_to_tree(value, (), true)?;
        Ok(self.cursor(Some(handle)))
    }

    /// Inserts every value from `values` in order and returns the position of each new element.
    pub fn insert_many<I>(&mut self, values: I) -> Vec<Position>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(|value| self.insert(value).position()).collect()
    }

    /// Returns `true` if the multiset contains at least one element equal to the value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }

    /// Returns a reference to the first element equal to the value, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(value).map(|h| self.raw.key(h))
    }

    /// Returns the number of elements equal to the value.
    ///
    /// # Complexity
    ///
    /// O(log n + k) where k is the returned count.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let set = RBTreeMultiSet::from([1, 2, 2, 3, 2]);
    /// assert_eq!(set.count(&2), 3);
    /// assert_eq!(set.count(&4), 0);
    /// ```
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count(value)
    }

    /// Returns a reference to the smallest element, if any.
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|h| self.raw.key(h))
    }

    /// Returns a reference to the largest element, if any.
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|h| self.raw.key(h))
    }

    /// Returns a cursor at the first element equal to `value`, or the end cursor if there is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor(self.raw.find(value))
    }

    /// Returns a cursor at the first element not less than `value`.
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor(self.raw.lower_bound(value))
    }

    /// Returns a cursor at the first element strictly greater than `value`.
    pub fn upper_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor(self.raw.upper_bound(value))
    }

    /// Returns the half-open cursor range `[lower_bound, upper_bound)` of elements equal to
    /// `value`. Both cursors are equal when there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let set = RBTreeMultiSet::from([1, 3, 3, 5]);
    /// let (first, last) = set.equal_range(&3);
    /// assert_eq!(first.value(), &3);
    /// assert_eq!(last.value(), &5);
    ///
    /// let (first, last) = set.equal_range(&4);
    /// assert_eq!(first, last);
    /// ```
    pub fn equal_range<Q>(&self, value: &Q) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (first, last) = self.raw.equal_range(value);
        (self.cursor(first), self.cursor(last))
    }

    /// Removes one element equal to the value. Returns whether one was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let mut set = RBTreeMultiSet::from([7, 7]);
    /// assert!(set.remove_one(&7));
    /// assert_eq!(set.count(&7), 1);
    /// assert!(set.remove_one(&7));
    /// assert!(!set.remove_one(&7));
    /// ```
    pub fn remove_one<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.raw.find(value) {
            Some(handle) => {
                self.raw.erase(handle);
                true
            }
            None => false,
        }
    }

    /// Removes every element equal to the value and returns how many there were.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut removed = 0;
        while let Some(handle) = self.raw.find(value) {
            self.raw.erase(handle);
            removed += 1;
        }
        removed
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let mut a = RBTreeMultiSet::from([1, 2]);
    /// let mut b = RBTreeMultiSet::from([2, 3]);
    /// a.merge(&mut b);
    ///
    /// assert!(b.is_empty());
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 2, 2, 3]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.raw.merge(&mut other.raw, true);
    }
}

impl<T: PartialEq> PartialEq for RBTreeMultiSet<T> {
    fn eq(&self, other: &RBTreeMultiSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RBTreeMultiSet<T> {}

impl<T: Clone> Clone for RBTreeMultiSet<T> {
    fn clone(&self) -> Self {
        RBTreeMultiSet { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTreeMultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for RBTreeMultiSet<T> {
    fn default() -> RBTreeMultiSet<T> {
        RBTreeMultiSet::new()
    }
}

impl<T: Ord> FromIterator<T> for RBTreeMultiSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> RBTreeMultiSet<T> {
        let mut set = RBTreeMultiSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for RBTreeMultiSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTreeMultiSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RBTreeMultiSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out every element in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMultiSet;
    ///
    /// let set = RBTreeMultiSet::from([2, 1, 2]);
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 2]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter::new(rbtree_map::IntoIter::new(self.raw.drain()))
    }
}

impl<'a, T> IntoIterator for &'a RBTreeMultiSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
