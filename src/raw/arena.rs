use alloc::vec::Vec;

use super::handle::{Generation, Handle};
use crate::Error;

struct Slot<T> {
    // Bumped whenever the slot is vacated, so stale positions can be told apart from the
    // element that later reuses the slot.
    generation: Generation,
    element: Option<T>,
}

pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    /// Upper bound on the number of elements, from both the address space and `Handle::MAX`.
    pub(crate) const MAX_LEN: usize = {
        let slot = core::mem::size_of::<Slot<T>>();
        let by_memory = if slot == 0 { usize::MAX } else { isize::MAX as usize / slot };
        if by_memory < Handle::MAX { by_memory } else { Handle::MAX }
    };

    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Number of slots ever handed out, occupied or not. Every live handle indexes below it.
    pub(crate) const fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over the occupied slots in slot order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.element.as_mut().map(|element| (Handle::from_index(index), element)))
    }

    /// Stores `element` and returns its handle.
    ///
    /// Nothing observable changes on failure, which is what lets the tree allocate a node
    /// before it edits any link.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, Error> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()].element = Some(element);
            return Ok(h);
        }

        // Strict less-than keeps the element count within `Handle::MAX`.
        if self.slots.len() >= Handle::MAX {
            return Err(Error::CapacityOverflow);
        }
        self.slots.try_reserve(1)?;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns mutable references to two distinct live elements.
    pub(crate) fn get2_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert_ne!(i, j, "`Arena::get2_mut()` - handles alias!");
        let (first, second) = if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        };
        (
            first.element.as_mut().expect("`Arena::get2_mut()` - `a` is invalid!"),
            second.element.as_mut().expect("`Arena::get2_mut()` - `b` is invalid!"),
        )
    }

    /// Returns the current generation of the slot behind `handle`.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.slots[handle.to_index()].generation
    }

    /// Returns true if `handle` names an occupied slot that has not been vacated since
    /// `generation` was observed.
    pub(crate) fn is_live(&self, handle: Handle, generation: Generation) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.generation == generation && slot.element.is_some())
    }

    /// Invalidates outstanding generations for `handle` while keeping its element in place.
    pub(crate) fn retire(&mut self, handle: Handle) {
        let slot = &mut self.slots[handle.to_index()];
        slot.generation = slot.generation.wrapping_add(1);
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle);
        element
    }

    /// Drops every element. Slots are kept so that generations keep counting up.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.element.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(Handle::from_index(index));
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn retire_keeps_element() {
        let mut arena = Arena::new();
        let h = arena.try_alloc('x').unwrap();
        let generation = arena.generation(h);
        arena.retire(h);
        assert!(!arena.is_live(h, generation));
        assert!(arena.is_live(h, arena.generation(h)));
        assert_eq!(*arena.get(h), 'x');
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn generation_advances_on_take() {
        let mut arena: Arena<u32> = Arena::new();
        let h = arena.try_alloc(7).unwrap();
        let generation = arena.generation(h);
        assert!(arena.is_live(h, generation));

        assert_eq!(arena.take(h), 7);
        assert!(!arena.is_live(h, generation));

        // The slot is reused, but the old generation stays stale.
        let h2 = arena.try_alloc(8).unwrap();
        assert_eq!(h2, h);
        assert!(!arena.is_live(h2, generation));
        assert!(arena.is_live(h2, arena.generation(h2)));
    }

    #[test]
    fn clear_invalidates_every_handle() {
        let mut arena: Arena<u32> = Arena::new();
        let handles: Vec<_> = (0..4).map(|v| arena.try_alloc(v).unwrap()).collect();
        let generations: Vec<_> = handles.iter().map(|&h| arena.generation(h)).collect();

        arena.clear();
        assert_eq!(arena.len(), 0);
        for (&h, &g) in handles.iter().zip(&generations) {
            assert!(!arena.is_live(h, g));
        }

        // Reuse starts from the lowest slot.
        assert_eq!(arena.try_alloc(9).unwrap(), handles[0]);
    }

    #[test]
    fn capacity_overflow_is_reported() {
        let mut arena: Arena<()> = Arena::new();
        for _ in 0..Handle::MAX {
            arena.try_alloc(()).unwrap();
        }
        assert_eq!(arena.try_alloc(()), Err(Error::CapacityOverflow));
        assert_eq!(arena.len(), Handle::MAX);
    }

    #[test]
    fn get2_mut_returns_both() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.try_alloc(1).unwrap();
        let b = arena.try_alloc(2).unwrap();
        {
            let (x, y) = arena.get2_mut(b, a);
            core::mem::swap(x, y);
        }
        assert_eq!(*arena.get(a), 2);
        assert_eq!(*arena.get(b), 1);
    }

    #[test]
    #[should_panic(expected = "`Arena::get2_mut()` - handles alias!")]
    fn get2_mut_rejects_alias() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.try_alloc(1).unwrap();
        let _ = arena.get2_mut(a, a);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.try_alloc(value).unwrap();
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                    prop_assert!(arena.is_live(handle, arena.generation(handle)));
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
