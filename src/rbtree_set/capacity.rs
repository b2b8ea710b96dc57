use super::RBTreeSet;
use crate::RBTreeMap;

impl<T> RBTreeSet<T> {
    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::with_capacity(4);
    /// let capacity = set.capacity();
    /// set.insert_many([1, 2, 3, 4]);
    /// assert_eq!(set.capacity(), capacity);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeSet {
            map: RBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns the largest number of elements any set of this type can hold.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.map.max_size()
    }
}
