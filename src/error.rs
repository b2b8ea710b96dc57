use alloc::collections::TryReserveError;
use core::fmt;

/// Errors reported by the fallible operations of the tree-backed collections.
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
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested key is not present in the map.
    KeyNotFound,
    /// Memory for a new node could not be reserved. The collection is unchanged.
    AllocationFailure(TryReserveError),
    /// Every node handle is in use; the collection cannot grow any further.
    CapacityOverflow,
    /// The [`Position`](crate::Position) refers to an element that has since been removed.
    InvalidPosition,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => f.write_str("no entry found for key"),
            Error::AllocationFailure(err) => write!(f, "node allocation failed: {err}"),
            Error::CapacityOverflow => f.write_str("collection is at maximum capacity"),
            Error::InvalidPosition => f.write_str("position refers to a removed element"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::AllocationFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::AllocationFailure(err)
    }
}
