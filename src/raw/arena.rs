use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Freed slots are recycled. Every slot counts how many times it has been
/// freed so that a handle saved before a removal can be told apart from the
/// node that later reuses the same slot.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.slot()].element = Some(element);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is full ({} slots)",
                Handle::MAX + 1
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            Handle::new(self.slots.len() - 1)
        }
    }

    /// Returns the current generation of a live slot, or `None` when `handle`
    /// is out of range or its slot is free.
    pub(crate) fn generation(&self, handle: Handle) -> Option<u32> {
        self.slots
            .get(handle.slot())
            .filter(|slot| slot.element.is_some())
            .map(|slot| slot.generation)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.slot()].element.as_ref().expect("`Arena::get()` - `handle` is not live!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.slot()].element.as_mut().expect("`Arena::get_mut()` - `handle` is not live!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.slot()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is not live!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle);
        element
    }

    /// Frees every slot. Slots are kept (not truncated) so that their
    /// generations keep counting and old handles stay dead.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.element.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(Handle::new(index));
        }
    }
}
