use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::{Generation, Handle};
use super::node::{Color, Node, Side};
use crate::Error;

/// The red-black tree engine shared by `RBTreeMap`, `RBTreeSet` and `RBTreeMultiSet`.
///
/// Nodes live in an arena and refer to each other by handle; `parent` links are plain
/// handles too, so the arena is the only owner.
pub(crate) struct RawRBTree<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of nodes reachable from `root`.
    len: usize,
}

/// Explicit DFS stack; deep enough for any red-black tree addressable by a `u32` handle.
type Stack<T> = SmallVec<[T; 64]>;

impl<K, V> RawRBTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Theoretical ceiling on the number of elements.
    pub(crate) const fn max_size() -> usize {
        Arena::<Node<K, V>>::MAX_LEN
    }

    /// Frees every node and resets the root.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.node(handle).key()
    }

    #[inline]
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (node.key(), node.value())
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        self.node_mut(handle).value_mut()
    }

    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.nodes.generation(handle)
    }

    pub(crate) fn is_live(&self, handle: Handle, generation: Generation) -> bool {
        self.nodes.is_live(handle, generation)
    }

    // ─── Color and shape helpers ─────────────────────────────────────────────

    /// A missing node counts as black.
    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        handle.is_some_and(|h| self.node(h).is_red())
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Returns which child of its parent `handle` is, or `None` for the root.
    fn side_of(&self, handle: Handle) -> Option<Side> {
        let parent = self.node(handle).parent()?;
        if self.node(parent).left() == Some(handle) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Hangs `child` under `parent` on `side`, or makes it the root when there is no parent.
    fn link(&mut self, parent: Option<Handle>, side: Side, child: Option<Handle>) {
        if let Some(c) = child {
            self.node_mut(c).set_parent(parent);
        }
        match parent {
            Some(p) => self.node_mut(p).set_child(side, child),
            None => self.root = child,
        }
    }

    /// Rotates the subtree at `handle` towards `side`: `Side::Left` is a left rotation, where
    /// the right child becomes the subtree root.
    fn rotate(&mut self, handle: Handle, side: Side) {
        let up = side.opposite();
        let pivot = self.node(handle).child(up).expect("`RawRBTree::rotate()` - missing pivot!");
        let inner = self.node(pivot).child(side);
        let parent = self.node(handle).parent();
        let parent_side = self.side_of(handle).unwrap_or(Side::Left);

        #[cfg(feature = "tracing")]
        tracing::trace!(node = handle.to_index(), pivot = pivot.to_index(), ?side, "rotate");

        self.link(Some(handle), up, inner);
        self.link(parent, parent_side, Some(pivot));
        self.link(Some(pivot), side, Some(handle));
    }

    // ─── Ordered navigation ──────────────────────────────────────────────────

    fn subtree_extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Returns the minimum node.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.subtree_extreme(root, Side::Left))
    }

    /// Returns the maximum node.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.subtree_extreme(root, Side::Right))
    }

    /// In-order neighbour of `handle` towards `side` (`Right` = successor), by parent links.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.subtree_extreme(child, side.opposite()));
        }
        let mut current = handle;
        // Climb while we arrive from the `side` link; the first ancestor reached from the
        // other link is the neighbour.
        while let Some(parent) = self.node(current).parent() {
            if self.node(parent).child(side) != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Returns the in-order successor of `handle`, or `None` past the maximum.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    /// Returns the in-order predecessor of `handle`, or `None` before the minimum.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Handles of every node in key order.
    fn handles_in_order(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(h) = current {
            handles.push(h);
            current = self.next(h);
        }
        handles
    }

    /// Moves every entry out in key order, leaving the tree empty.
    pub(crate) fn drain(&mut self) -> Vec<(K, V)> {
        let entries = self.handles_in_order().into_iter().map(|h| self.nodes.take(h).into_entry()).collect();
        self.root = None;
        self.len = 0;
        entries
    }

    /// Borrows every entry in key order with mutable access to the values.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let mut rank = alloc::vec![usize::MAX; self.nodes.slot_count()];
        for (i, h) in self.handles_in_order().into_iter().enumerate() {
            rank[h.to_index()] = i;
        }

        let mut ordered: Vec<Option<(&K, &mut V)>> = (0..self.len).map(|_| None).collect();
        for (h, node) in self.nodes.iter_mut() {
            ordered[rank[h.to_index()]] = Some(node.entry_mut());
        }
        ordered.into_iter().map(|entry| entry.expect("`RawRBTree::entries_mut()` - unreachable node!")).collect()
    }

    // ─── Removal ─────────────────────────────────────────────────────────────

    /// Removes the element at `target` and returns its key and value.
    ///
    /// When `target` has two children its in-order predecessor is moved into it and the
    /// predecessor's node is the one unlinked. The target node stays in the tree under a new
    /// generation, so positions naming the erased element or the relocated predecessor go stale.
    pub(crate) fn erase(&mut self, target: Handle) -> (K, V) {
        let (left, right) = {
            let node = self.node(target);
            (node.left(), node.right())
        };

        let doomed = match (left, right) {
            (Some(left), Some(_)) => {
                let predecessor = self.subtree_extreme(left, Side::Right);
                let (a, b) = self.nodes.get2_mut(target, predecessor);
                a.swap_entry(b);
                self.nodes.retire(target);
                predecessor
            }
            _ => target,
        };

        let child = {
            let node = self.node(doomed);
            node.left().or(node.right())
        };
        let doomed_black = !self.node(doomed).is_red();

        // A black leaf leaves a hole in the black-height; repair it while the doomed node
        // still stands in for the hole and its sibling can be found.
        if child.is_none() && doomed_black {
            self.erase_fixup(doomed);
        }

        let parent = self.node(doomed).parent();
        let side = self.side_of(doomed).unwrap_or(Side::Left);
        self.link(parent, side, child);

        if let Some(child) = child
            && doomed_black
        {
            self.erase_fixup(child);
        }

        self.len -= 1;
        let entry = self.nodes.take(doomed).into_entry();
        debug_assert_eq!(self.nodes.len(), self.len, "`RawRBTree::erase()` - arena out of sync!");
        entry
    }

    /// Resolves a double-black deficiency at `handle`.
    fn erase_fixup(&mut self, mut handle: Handle) {
        while Some(handle) != self.root && !self.node(handle).is_red() {
            let parent = self.node(handle).parent().expect("`RawRBTree::erase_fixup()` - non-root without parent!");
            let side = self.side_of(handle).unwrap_or(Side::Left);
            let far = side.opposite();
            let mut sibling = self.sibling(parent, far);

            if self.node(sibling).is_red() {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = handle.to_index(), "erase fixup: red sibling");

                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.sibling(parent, far);
            }

            let near_nephew = self.node(sibling).child(side);
            let far_nephew = self.node(sibling).child(far);

            if !self.is_red(near_nephew) && !self.is_red(far_nephew) {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = handle.to_index(), "erase fixup: push deficiency up");

                self.set_color(sibling, Color::Red);
                handle = parent;
                continue;
            }

            if !self.is_red(far_nephew) {
                // Only the near nephew is red: turn it into the far one.
                if let Some(near) = near_nephew {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.sibling(parent, far);
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(node = handle.to_index(), "erase fixup: absorb at parent");

            let parent_color = self.node(parent).color();
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            if let Some(far_nephew) = self.node(sibling).child(far) {
                self.set_color(far_nephew, Color::Black);
            }
            self.rotate(parent, side);
            handle = self.root.expect("`RawRBTree::erase_fixup()` - tree lost its root!");
        }
        self.set_color(handle, Color::Black);
    }

    /// A double-black node always has a sibling: the other side carries at least one black.
    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent).child(side).expect("`RawRBTree::sibling()` - black-height violated!")
    }
}

impl<K: Ord, V> RawRBTree<K, V> {
    // ─── Search ──────────────────────────────────────────────────────────────

    /// Descends from the root and stops at the first node whose key equals `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Returns the first node, in key order, whose key equals `key`.
    ///
    /// With duplicate keys the descent keeps going left after a match, since any earlier
    /// equal key can only be in the left subtree.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut found = None;
        while let Some(h) = current {
            let node = self.node(h);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => {
                    found = Some(h);
                    node.left()
                }
            };
        }
        found
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Counts the run of equal keys starting at `find(key)`.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.find(key);
        while let Some(h) = current {
            if key.cmp(self.key(h).borrow()) != Ordering::Equal {
                break;
            }
            count += 1;
            current = self.next(h);
        }
        count
    }

    /// First node whose key is not less than `key`; `exclusive` makes it strictly greater.
    fn bound<Q>(&self, key: &Q, exclusive: bool) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut bound = None;
        while let Some(h) = current {
            let node = self.node(h);
            let go_right = match key.cmp(node.key().borrow()) {
                Ordering::Greater => true,
                Ordering::Equal => exclusive,
                Ordering::Less => false,
            };
            if go_right {
                current = node.right();
            } else {
                bound = Some(h);
                current = node.left();
            }
        }
        bound
    }

    /// Returns the first node whose key is not less than `key`.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.bound(key, false)
    }

    /// Returns the first node whose key is strictly greater than `key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.bound(key, true)
    }

    /// Returns the half-open run `[first equal, first greater)` of keys equal to `key`.
    pub(crate) fn equal_range<Q>(&self, key: &Q) -> (Option<Handle>, Option<Handle>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    // ─── Insertion ───────────────────────────────────────────────────────────

    /// Inserts `key`/`value`, or returns the existing node when `multi` is false and the key is
    /// already present.
    ///
    /// The node is allocated before any link changes, so a failed allocation leaves the tree
    /// exactly as it was.
    pub(crate) fn try_insert_to_tree(&mut self, key: K, value: V, multi: bool) -> Result<(Handle, bool), Error> {
        if !multi && let Some(existing) = self.search(&key) {
            return Ok((existing, false));
        }

        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(h) = current {
            parent = Some(h);
            // Equal keys go right.
            side = if key < *self.key(h) { Side::Left } else { Side::Right };
            current = self.node(h).child(side);
        }

        let new = self.nodes.try_alloc(Node::new(key, value))?;
        self.link(parent, side, Some(new));
        self.len += 1;

        if parent.is_none() {
            self.set_color(new, Color::Black);
        } else if self.is_red(parent) {
            self.insert_fixup(new);
        }

        Ok((new, true))
    }

    /// Like [`try_insert_to_tree`](Self::try_insert_to_tree), panicking if no node can be
    /// allocated.
    pub(crate) fn insert_to_tree(&mut self, key: K, value: V, multi: bool) -> (Handle, bool) {
        match self.try_insert_to_tree(key, value, multi) {
            Ok(result) => result,
            Err(err) => panic!("`RawRBTree::insert_to_tree()` - {err}"),
        }
    }

    /// Inserts a new entry, or overwrites the value of the existing one in place.
    pub(crate) fn try_insert_or_assign(&mut self, key: K, value: V) -> Result<(Handle, bool), Error> {
        if let Some(existing) = self.search(&key) {
            *self.value_mut(existing) = value;
            return Ok((existing, false));
        }
        self.try_insert_to_tree(key, value, false)
    }

    /// Restores the red-black rules after `handle` was attached red under a red parent.
    fn insert_fixup(&mut self, mut handle: Handle) {
        while let Some(parent) = self.node(handle).parent() {
            if !self.node(parent).is_red() {
                break;
            }
            let Some(grandparent) = self.node(parent).parent() else {
                self.set_color(parent, Color::Black);
                break;
            };

            let parent_side = self.side_of(parent).unwrap_or(Side::Left);
            let uncle = self.node(grandparent).child(parent_side.opposite());

            if let Some(uncle) = uncle
                && self.node(uncle).is_red()
            {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = handle.to_index(), "insert fixup: red uncle");

                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                handle = grandparent;
                continue;
            }

            let mut top = parent;
            if self.side_of(handle) != Some(parent_side) {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = handle.to_index(), "insert fixup: straighten zig-zag");

                self.rotate(parent, parent_side);
                top = handle;
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(node = handle.to_index(), "insert fixup: rotate grandparent");

            self.set_color(top, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    // ─── Merge ───────────────────────────────────────────────────────────────

    /// Moves every entry of `other` into `self`.
    ///
    /// Without `multi`, entries whose key is already present stay behind in `other`; with
    /// `multi` everything transfers and `other` ends up empty. `other` keeps its arena, so its
    /// outstanding positions go stale rather than aliasing the entries left behind.
    pub(crate) fn merge(&mut self, other: &mut Self, multi: bool) {
        for (key, value) in other.drain() {
            if multi || !self.contains(&key) {
                self.insert_to_tree(key, value, multi);
            } else {
                other.insert_to_tree(key, value, false);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(len = self.len, rejected = other.len, multi, "merged trees");
    }
}

impl<K: Clone, V: Clone> Clone for RawRBTree<K, V> {
    /// Deep structural copy: same shape and colors, freshly packed arena.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        let Some(root) = self.root else {
            return copy;
        };

        let new_root = copy.alloc_copy(self.node(root));
        copy.root = Some(new_root);

        let mut stack: Stack<(Handle, Handle)> = smallvec![(root, new_root)];
        while let Some((source, target)) = stack.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = self.node(source).child(side) {
                    let copied = copy.alloc_copy(self.node(child));
                    copy.link(Some(target), side, Some(copied));
                    stack.push((child, copied));
                }
            }
        }

        copy.len = self.len;
        copy
    }
}

impl<K: Clone, V: Clone> RawRBTree<K, V> {
    fn alloc_copy(&mut self, source: &Node<K, V>) -> Handle {
        let mut node = Node::new(source.key().clone(), source.value().clone());
        node.set_color(source.color());
        match self.nodes.try_alloc(node) {
            Ok(handle) => handle,
            Err(err) => panic!("`RawRBTree::clone()` - {err}"),
        }
    }
}

impl<K, V> Default for RawRBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
