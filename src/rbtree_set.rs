use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::RawCursor;
use crate::rbtree_map::{self, Keys};
use crate::{Error, Position, RBTreeMap};

mod capacity;

/// An ordered set based on a red-black tree.
///
/// See [`RBTreeMap`]'s documentation for a detailed discussion of this collection's cursors and
/// positions.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeSet` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeSet;
///
/// let mut books = RBTreeSet::new();
///
/// // Add some books.
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything.
/// for book in &books {
///     println!("{book}");
/// }
/// ```
pub struct RBTreeSet<T> {
    map: RBTreeMap<T, ()>,
}

/// A cursor over the items of a [`RBTreeSet`] or [`RBTreeMultiSet`](crate::RBTreeMultiSet).
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeSet;
///
/// let set = RBTreeSet::from([10, 20, 30]);
/// let mut cursor = set.lower_bound(&15);
/// assert_eq!(cursor.value(), &20);
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.get(), None);
/// ```
pub struct Cursor<'a, T> {
    raw: RawCursor<'a, T, ()>,
}

/// An iterator over the items of a `RBTreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeSet`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeSet;
///
/// let set = RBTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: RBTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `RBTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: rbtree_map::IntoIter<T, ()>,
}

impl<T> RBTreeSet<T> {
    /// Makes a new, empty `RBTreeSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set: RBTreeSet<i32> = RBTreeSet::new();
    /// ```
    #[must_use]
    pub const fn new() -> RBTreeSet<T> {
        RBTreeSet { map: RBTreeMap::new() }
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut v = RBTreeSet::new();
    /// v.insert(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a cursor at the smallest element, or the end cursor if the set is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::from(self.map.begin())
    }

    /// Returns the end cursor, one past the largest element.
    pub const fn end(&self) -> Cursor<'_, T> {
        Cursor {
            raw: self.map.end().into_raw(),
        }
    }

    /// Gets an iterator that visits the elements in the `RBTreeSet` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }

    /// Removes the element at `position` and returns it. The end position is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `position` refers to an element that has already been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3]);
    /// let last = set.find(&3).position();
    /// assert_eq!(set.erase(last), Some(3));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn erase(&mut self, position: Position) -> Option<T> {
        match self.try_erase(position) {
            Ok(value) => value,
            Err(err) => panic!("`RBTreeSet::erase()` - {err}"),
        }
    }

    /// Removes the element at `position`, reporting a stale position as
    /// [`Error::InvalidPosition`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if the element `position` referred to has been removed.
    pub fn try_erase(&mut self, position: Position) -> Result<Option<T>, Error> {
        Ok(self.map.try_erase(position)?.map(|(value, ())| value))
    }
}

impl<T: Ord> RBTreeSet<T> {
    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// The value may be any borrowed form of the set's element type,
    /// but the ordering on the borrowed form *must* match the
    /// ordering on the element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Returns a reference to the first element in the set, if any.
    /// This element is always the minimum of all elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    /// This element is always the maximum of all elements in the set.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Adds a value to the set unless an equal value is already present.
    ///
    /// Returns a cursor at the element equal to `value` and whether it was newly inserted.
    ///
    /// # Panics
    ///
    /// Panics if memory for the new node cannot be allocated. See
    /// [`try_insert`](Self::try_insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    ///
    /// assert_eq!(set.insert(2).1, true);
    /// assert_eq!(set.insert(2).1, false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor<'_, T>, bool) {
        let (cursor, inserted) = self.map.insert(value, ());
        (Cursor::from(cursor), inserted)
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] or [`Error::CapacityOverflow`] if no node could be
    /// allocated; the set is left unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<(Cursor<'_, T>, bool), Error> {
        let (cursor, inserted) = self.map.try_insert(value, ())?;
        Ok((Cursor::from(cursor), inserted))
    }

    /// Inserts every value from `values` in order, as [`insert`](Self::insert) would.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// let results = set.insert_many([5, 1, 5]);
    /// assert_eq!(results.iter().filter(|&&(_, inserted)| inserted).count(), 2);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        self.map.insert_many(values.into_iter().map(|value| (value, ())))
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to the value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let position = self.find(value).position();
        self.erase(position)
    }

    /// Returns a cursor at the element equal to `value`, or the end cursor if there is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::from(self.map.find(value))
    }

    /// Returns a cursor at the first element not less than `value`.
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::from(self.map.lower_bound(value))
    }

    /// Returns a cursor at the first element strictly greater than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 3, 5]);
    /// assert_eq!(set.upper_bound(&3).value(), &5);
    /// assert_eq!(set.upper_bound(&0).value(), &1);
    /// assert!(set.upper_bound(&5).is_end());
    /// ```
    pub fn upper_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::from(self.map.upper_bound(value))
    }

    /// Moves every element of `other` that is not yet in `self` into `self`.
    ///
    /// Elements already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut a = RBTreeSet::from([1, 2, 3]);
    /// let mut b = RBTreeSet::from([3, 4, 5]);
    /// a.merge(&mut b);
    ///
    /// assert_eq!(a.len(), 5);
    /// assert_eq!(b.iter().copied().collect::<Vec<_>>(), [3]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.map.merge(&mut other.map);
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) const fn new(raw: RawCursor<'a, T, ()>) -> Self {
        Cursor { raw }
    }

    /// Returns the element under the cursor, or `None` at the end.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.raw.get().map(|(value, ())| value)
    }

    /// Returns the element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[must_use]
    pub fn value(&self) -> &'a T {
        match self.get() {
            Some(value) => value,
            None => panic!("`Cursor::value()` - cursor is at the end!"),
        }
    }

    /// Returns `true` if the cursor is one past the last element.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.raw.is_end()
    }

    /// Moves to the next element in order. The end cursor stays at the end.
    pub fn move_next(&mut self) {
        self.raw.move_next();
    }

    /// Moves to the previous element in order. From the end this is the last element; from the
    /// first element it is the end.
    pub fn move_prev(&mut self) {
        self.raw.move_prev();
    }

    /// Returns a cursor at the next element, leaving `self` in place.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn next(mut self) -> Self {
        self.move_next();
        self
    }

    /// Returns a cursor at the previous element, leaving `self` in place.
    #[must_use]
    pub fn prev(mut self) -> Self {
        self.move_prev();
        self
    }

    /// Detaches the cursor into a [`Position`] that can be passed to `erase`.
    #[must_use]
    pub fn position(&self) -> Position {
        self.raw.position()
    }
}

impl<'a, T> From<rbtree_map::Cursor<'a, T, ()>> for Cursor<'a, T> {
    fn from(cursor: rbtree_map::Cursor<'a, T, ()>) -> Self {
        Cursor::new(cursor.into_raw())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<T: PartialEq> PartialEq for RBTreeSet<T> {
    fn eq(&self, other: &RBTreeSet<T>) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq> Eq for RBTreeSet<T> {}

impl<T: Clone> Clone for RBTreeSet<T> {
    fn clone(&self) -> Self {
        RBTreeSet { map: self.map.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for RBTreeSet<T> {
    fn default() -> RBTreeSet<T> {
        RBTreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for RBTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> RBTreeSet<T> {
        let mut set = RBTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for RBTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|value| (value, ())));
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RBTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `RBTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RBTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) const fn new(inner: Keys<'a, T, ()>) -> Self {
        Iter { inner }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> IntoIter<T> {
    pub(crate) const fn new(inner: rbtree_map::IntoIter<T, ()>) -> Self {
        IntoIter { inner }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(value, ())| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(|(value, ())| value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}
