//! Fixed-capacity entity pools
//!
//! Slots are allocated once when the pool is built and recycled in place.
//! Allocation takes the first inactive slot; iteration visits active slots
//! in index order, which is also the order collisions are resolved in.

/// An entity that lives in a [`Pool`] slot
pub trait Poolable: Default {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

#[derive(Debug, Clone)]
pub struct Pool<T: Poolable> {
    slots: Vec<T>,
}

impl<T: Poolable> Pool<T> {
    /// Build a pool with `capacity` inactive slots
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// First free slot, or `None` when every slot is in use.
    /// The caller is responsible for initializing and activating it.
    pub fn allocate(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find(|s| !s.is_active())
    }

    /// Deactivate every slot in place
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    /// Every slot, active or not (index order)
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }
}
