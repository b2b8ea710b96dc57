use alloc::vec::{self, Vec};
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{Handle, RawCursor, RawRBTree};
use crate::{Error, Position};

mod capacity;

/// An ordered map based on a [red-black tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in key order.
/// That means that keys must be of a type that implements the [`Ord`] trait,
/// such that two keys can always be compared to determine their [`Ordering`].
///
/// Iterators obtained from functions such as [`RBTreeMap::iter`], [`RBTreeMap::into_iter`],
/// [`RBTreeMap::values`], or [`RBTreeMap::keys`] produce their items in key order. Besides
/// iterators, the map hands out [`Cursor`]s: a cursor names one element (or the end) and can be
/// moved in either direction. Cursors borrow the map; to remove an element through a cursor,
/// detach it with [`Cursor::position`] and pass the [`Position`] to [`RBTreeMap::erase`].
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeMap;
///
/// let mut movie_reviews = RBTreeMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// // look up the value for a key, reporting a missing key as an error.
/// match movie_reviews.at("Up!") {
///     Ok(review) => println!("Up!: {review}"),
///     Err(err) => println!("Up!: {err}"),
/// }
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Ordering`]: core::cmp::Ordering
pub struct RBTreeMap<K, V> {
    raw: RawRBTree<K, V>,
}

/// A cursor over the entries of a `RBTreeMap`.
///
/// A cursor points at one entry or at the end, one past the last entry. Reading through an end
/// cursor is an error: [`get`](Cursor::get) returns `None` and [`key`](Cursor::key) /
/// [`value`](Cursor::value) panic.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
/// let mut cursor = map.end();
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some((&2, &"b")));
/// cursor.move_prev();
/// assert_eq!(cursor.key(), &1);
/// cursor.move_prev();
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, K, V> {
    raw: RawCursor<'a, K, V>,
}

/// An iterator over the entries of a `RBTreeMap`.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeMap`]. See its
/// documentation for more.
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawRBTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// A mutable iterator over the entries of a `RBTreeMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`RBTreeMap`].
///
/// [`iter_mut`]: RBTreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: vec::IntoIter<(&'a K, &'a mut V)>,
}

/// An owning iterator over the entries of a `RBTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `RBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`RBTreeMap`].
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `RBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`RBTreeMap`].
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `RBTreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`RBTreeMap`].
///
/// [`values_mut`]: RBTreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> RBTreeMap<K, V> {
        RBTreeMap { raw: RawRBTree::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns a cursor at the first entry in key order, or the end cursor if the map is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            raw: RawCursor::begin(&self.raw),
        }
    }

    /// Returns the end cursor, one past the last entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::new();
    /// assert_eq!(map.begin(), map.end());
    /// ```
    pub const fn end(&self) -> Cursor<'_, K, V> {
        Cursor {
            raw: RawCursor::end(&self.raw),
        }
    }

    fn cursor(&self, node: Option<Handle>) -> Cursor<'_, K, V> {
        Cursor {
            raw: RawCursor::new(&self.raw, node),
        }
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.raw)
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.entries_mut().into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(&self.raw)
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Removes the entry at `position` and returns it. The end position is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `position` refers to an entry that has already been removed.
    /// [`try_erase`](Self::try_erase) reports that case as an error instead.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// let first = map.begin().position();
    /// assert_eq!(map.erase(first), Some((1, "a")));
    /// assert_eq!(map.erase(map.end().position()), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn erase(&mut self, position: Position) -> Option<(K, V)> {
        match self.try_erase(position) {
            Ok(entry) => entry,
            Err(err) => panic!("`RBTreeMap::erase()` - {err}"),
        }
    }

    /// Removes the entry at `position`, reporting a stale position as
    /// [`Error::InvalidPosition`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if the entry `position` referred to has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::from([(1, "a")]);
    /// let position = map.find(&1).position();
    /// assert_eq!(map.try_erase(position), Ok(Some((1, "a"))));
    /// assert_eq!(map.try_erase(position), Err(Error::InvalidPosition));
    /// ```
    pub fn try_erase(&mut self, position: Position) -> Result<Option<(K, V)>, Error> {
        Ok(position.resolve(&self.raw)?.map(|handle| self.raw.erase(handle)))
    }
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|h| self.raw.entry(h).1)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|h| self.raw.entry(h))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns a reference to the value for `key`, or [`Error::KeyNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the map does not contain `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(1, "a")]);
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`, or [`Error::KeyNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the map does not contain `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()` first if
    /// the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut counts: RBTreeMap<&str, u32> = RBTreeMap::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let handle = match self.raw.search(&key) {
            Some(handle) => handle,
            None => self.raw.insert_to_tree(key, V::default(), false).0,
        };
        self.raw.value_mut(handle)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(key)
    }

    /// Returns the first key-value pair in the map.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|h| self.raw.entry(h))
    }

    /// Returns the last key-value pair in the map.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|h| self.raw.entry(h))
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// Returns a cursor at the entry for `key` and whether a new entry was created. An
    /// existing entry keeps its value; use [`insert_or_assign`](Self::insert_or_assign) to
    /// overwrite it.
    ///
    /// # Panics
    ///
    /// Panics if memory for the new node cannot be allocated. See
    /// [`try_insert`](Self::try_insert).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert!(map.insert(37, "a").1);
    ///
    /// let (cursor, inserted) = map.insert(37, "b");
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), &"a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool) {
        let (handle, inserted) = self.raw.insert_to_tree(key, value, false);
        (self.cursor(Some(handle)), inserted)
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] or [`Error::CapacityOverflow`] if no node could be
    /// allocated; the map is left unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Cursor<'_, K, V>, bool), Error> {
        let (handle, inserted) = self.raw.try_insert_to_tree(key, value, false)?;
        Ok((self.cursor(Some(handle)), inserted))
    }

    /// Inserts a key-value pair, overwriting the value in place if the key is already present.
    ///
    /// Returns a cursor at the entry and whether a new entry was created.
    ///
    /// # Panics
    ///
    /// Panics if memory for a new node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::from([(1, "a")]);
    /// let (cursor, inserted) = map.insert_or_assign(1, "b");
    /// assert!(!inserted);
    /// assert_eq!(cursor.get(), Some((&1, &"b")));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool) {
        match self.raw.try_insert_or_assign(key, value) {
            Ok((handle, inserted)) => (self.cursor(Some(handle)), inserted),
            Err(err) => panic!("`RBTreeMap::insert_or_assign()` - {err}"),
        }
    }

    /// Inserts every pair from `entries` in order, as [`insert`](Self::insert) would.
    ///
    /// Returns the position of each pair's entry and whether it was newly inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// let results = map.insert_many([(1, "a"), (2, "b"), (1, "c")]);
    /// let inserted: Vec<bool> = results.iter().map(|&(_, inserted)| inserted).collect();
    /// assert_eq!(inserted, [true, true, false]);
    /// assert_eq!(results[2].0, results[0].0);
    /// assert_eq!(map[&1], "a");
    /// ```
    pub fn insert_many<I>(&mut self, entries: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        entries
            .into_iter()
            .map(|(key, value)| {
                let (cursor, inserted) = self.insert(key, value);
                (cursor.position(), inserted)
            })
            .collect()
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.erase(handle).1)
    }

    /// Returns a cursor at the entry for `key`, or the end cursor if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(3, 'c'), (2, 'b'), (5, 'e')]);
    /// assert_eq!(map.find(&5).value(), &'e');
    /// assert_eq!(map.find(&100), map.end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor(self.raw.find(key))
    }

    /// Returns a cursor at the first entry whose key is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.lower_bound(&20).key(), &20);
    /// assert_eq!(map.lower_bound(&25).key(), &30);
    /// assert!(map.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor(self.raw.lower_bound(key))
    }

    /// Returns a cursor at the first entry whose key is strictly greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.upper_bound(&20).key(), &30);
    /// assert!(map.upper_bound(&30).is_end());
    /// ```
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.cursor(self.raw.upper_bound(key))
    }

    /// Moves every entry of `other` whose key is not yet in `self` into `self`.
    ///
    /// Entries with keys already present stay in `other`, which ends up holding exactly those.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// let mut b = RBTreeMap::from([(2, "x"), (3, "c")]);
    /// a.merge(&mut b);
    ///
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a[&2], "b");
    /// assert_eq!(b.into_iter().collect::<Vec<_>>(), [(2, "x")]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.raw.merge(&mut other.raw, false);
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn into_raw(self) -> RawCursor<'a, K, V> {
        self.raw
    }

    /// Returns the entry under the cursor, or `None` at the end.
    #[must_use]
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.raw.get()
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[must_use]
    pub fn key(&self) -> &'a K {
        match self.raw.get() {
            Some((key, _)) => key,
            None => panic!("`Cursor::key()` - cursor is at the end!"),
        }
    }

    /// Returns the value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[must_use]
    pub fn value(&self) -> &'a V {
        match self.raw.get() {
            Some((_, value)) => value,
            None => panic!("`Cursor::value()` - cursor is at the end!"),
        }
    }

    /// Returns `true` if the cursor is one past the last entry.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.raw.is_end()
    }

    /// Moves to the next entry in key order. The end cursor stays at the end.
    pub fn move_next(&mut self) {
        self.raw.move_next();
    }

    /// Moves to the previous entry in key order. From the end this is the last entry; from the
    /// first entry it is the end.
    pub fn move_prev(&mut self) {
        self.raw.move_prev();
    }

    /// Returns a cursor at the next entry, leaving `self` in place.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn next(mut self) -> Self {
        self.move_next();
        self
    }

    /// Returns a cursor at the previous entry, leaving `self` in place.
    #[must_use]
    pub fn prev(mut self) -> Self {
        self.move_prev();
        self
    }

    /// Detaches the cursor into a [`Position`] that can be passed to [`RBTreeMap::erase`].
    #[must_use]
    pub fn position(&self) -> Position {
        self.raw.position()
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<K: Clone, V: Clone> Clone for RBTreeMap<K, V> {
    fn clone(&self) -> Self {
        RBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RBTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for RBTreeMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RBTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for RBTreeMap<K, V> {
    fn default() -> Self {
        RBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RBTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut RBTreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for RBTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter::new(self.raw.drain())
    }
}

impl<K, Q, V> Index<&Q> for RBTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `RBTreeMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawRBTree<K, V>) -> Self {
        Iter {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.tree.next(handle);
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.tree.prev(handle);
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: Vec<(K, V)>) -> Self {
        IntoIter {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(tree: &'a RawRBTree<K, V>) -> Self {
        Keys { inner: Iter::new(tree) }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
