mod arena;
mod cursor;
mod handle;
mod node;
mod raw_rbtree;

pub(crate) use cursor::RawCursor;
pub(crate) use handle::{Generation, Handle};
pub(crate) use raw_rbtree::RawRBTree;
