use super::RBTreeMap;
use crate::raw::RawRBTree;

impl<K, V> RBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` nodes.
    ///
    /// Nodes freed by removals are reused before the arena grows again.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map: RBTreeMap<i32, i32> = RBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RBTreeMap {
            raw: RawRBTree::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes the map can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the largest number of entries any map of this type can hold.
    ///
    /// Inserting beyond this fails with an allocation or capacity error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::RBTreeMap;
    ///
    /// let map: RBTreeMap<u8, u8> = RBTreeMap::new();
    /// assert!(map.max_size() > 1_000_000);
    /// ```
    #[must_use]
    pub const fn max_size(&self) -> usize {
        RawRBTree::<K, V>::max_size()
    }
}
