/// Fixed-capacity entity pool with an active watermark.
///
/// Slots hold `Option<Entity>`; "empty" is a first-class state rather
/// than a sentinel. The physical capacity never changes after
/// construction, while the watermark (the sub-range actually scanned by
/// allocation and traversal) grows at runtime but is clamped to
/// capacity. Exhaustion is never an error: allocation simply discards
/// the candidate and reports failure.

use log::debug;

use crate::entities::Entity;

#[derive(Clone, Debug)]
pub struct Pool {
    slots: Vec<Option<Entity>>,
    watermark: usize,
}

impl Pool {
    /// A pool of `capacity` empty slots with `watermark` of them active.
    /// A watermark above capacity is a configuration bug and is clamped.
    pub fn new(capacity: usize, watermark: usize) -> Self {
        Pool {
            slots: vec![None; capacity],
            watermark: watermark.min(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn watermark(&self) -> usize {
        self.watermark
    }

    /// Number of occupied slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Install `entity` into the first empty slot below the watermark.
    /// Returns the slot index, or `None` (discarding the entity) when
    /// every active slot is occupied.
    pub fn allocate(&mut self, entity: Entity) -> Option<usize> {
        for i in 0..self.watermark {
            if self.slots[i].is_none() {
                self.slots[i] = Some(entity);
                return Some(i);
            }
        }
        debug!("pool full ({} active slots), entity discarded", self.watermark);
        None
    }

    /// Empty slot `index`. Releasing an already-empty (or out-of-range)
    /// slot is a no-op. Returns whether an entity was actually freed.
    pub fn release(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.slots.get_mut(index).and_then(|s| s.as_mut())
    }

    /// Occupied slots in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Entity)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|e| (i, e)))
    }

    /// Release every occupied slot. Returns how many were freed.
    pub fn clear(&mut self) -> usize {
        let mut freed = 0;
        for slot in &mut self.slots {
            if slot.take().is_some() {
                freed += 1;
            }
        }
        freed
    }

    /// Raise the watermark by one, clamped at physical capacity.
    /// Returns false (and logs) when already at capacity.
    pub fn raise_watermark(&mut self) -> bool {
        if self.watermark < self.capacity() {
            self.watermark += 1;
            true
        } else {
            debug!("watermark already at capacity {}", self.capacity());
            false
        }
    }

    /// Drop the watermark back to `watermark` (used on game reset).
    pub fn reset_watermark(&mut self, watermark: usize) {
        self.watermark = watermark.min(self.capacity());
    }
}
