use super::handle::Handle;
use super::raw_rbtree::RawRBTree;
use crate::Position;

/// A position in a tree's key order, or the end sentinel one past the last element.
///
/// Holds nothing but a handle between calls; successor and predecessor are recomputed from
/// parent links each time it moves.
pub(crate) struct RawCursor<'a, K, V> {
    tree: &'a RawRBTree<K, V>,
    node: Option<Handle>,
}

impl<'a, K, V> RawCursor<'a, K, V> {
    pub(crate) const fn new(tree: &'a RawRBTree<K, V>, node: Option<Handle>) -> Self {
        Self { tree, node }
    }

    /// Cursor at the minimum element, or at the end of an empty tree.
    pub(crate) fn begin(tree: &'a RawRBTree<K, V>) -> Self {
        Self::new(tree, tree.first())
    }

    pub(crate) const fn end(tree: &'a RawRBTree<K, V>) -> Self {
        Self::new(tree, None)
    }

    pub(crate) const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the entry under the cursor, or `None` at the end.
    pub(crate) fn get(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.node.map(|h| tree.entry(h))
    }

    /// Advances to the successor. The end stays at the end.
    pub(crate) fn move_next(&mut self) {
        if let Some(h) = self.node {
            self.node = self.tree.next(h);
        }
    }

    /// Steps back to the predecessor. From the end this lands on the maximum; from the
    /// minimum it becomes the end.
    pub(crate) fn move_prev(&mut self) {
        self.node = match self.node {
            Some(h) => self.tree.prev(h),
            None => self.tree.last(),
        };
    }

    /// Detaches the cursor into a `Position` that outlives the borrow.
    pub(crate) fn position(&self) -> Position {
        Position::new(self.tree, self.node)
    }
}

impl<K, V> Clone for RawCursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for RawCursor<'_, K, V> {}

impl<K, V> PartialEq for RawCursor<'_, K, V> {
    /// Cursors are equal when they denote the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<K, V> Eq for RawCursor<'_, K, V> {}
