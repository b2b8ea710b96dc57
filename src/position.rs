use crate::Error;
use crate::raw::{Generation, Handle, RawRBTree};

/// A detached reference to an element of a tree-backed collection, or to its end.
///
/// Cursors borrow their collection, so they cannot be handed back to a mutating method such
/// as [`RBTreeMap::erase`](crate::RBTreeMap::erase). A `Position` can: it is `Copy` and holds no
/// borrow. It stays valid across insertions, and across removals that do not touch its element.
///
/// A position goes stale when its element is removed, and also when its element is relocated:
/// erasing an element with two children moves the in-order predecessor into the erased
/// element's node. Using a stale position is reported as [`Error::InvalidPosition`] rather than
/// silently naming whatever now occupies the node.
///
/// # Examples
///
/// ```
/// use rbtree_collections::RBTreeSet;
///
/// let mut set = RBTreeSet::from([1, 2, 3]);
/// let two = set.find(&2).position();
/// set.insert(4);
/// assert_eq!(set.erase(two), Some(2));
/// assert!(!set.contains(&2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    slot: Option<(Handle, Generation)>,
}

impl Position {
    /// The end sentinel. Erasing it is a no-op.
    pub const END: Position = Position { slot: None };

    pub(crate) fn new<K, V>(tree: &RawRBTree<K, V>, node: Option<Handle>) -> Self {
        Position {
            slot: node.map(|h| (h, tree.generation(h))),
        }
    }

    /// Returns true if this is the end sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.slot.is_none()
    }

    /// Looks the position up in `tree`; `Ok(None)` is the end sentinel.
    pub(crate) fn resolve<K, V>(self, tree: &RawRBTree<K, V>) -> Result<Option<Handle>, Error> {
        match self.slot {
            None => Ok(None),
            Some((handle, generation)) if tree.is_live(handle, generation) => Ok(Some(handle)),
            Some(_) => Err(Error::InvalidPosition),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::END
    }
}
