//! Particle storage: an arena with active and free index lists.
//!
//! "Pooling" here is index recycling, not object surgery. Every particle
//! ever created lives in a slot; the `active` list is the simulated set and
//! the `free` list is the pool. Retiring moves an index between lists,
//! so nothing is deallocated, nothing is copied, and no reference to a
//! pooled particle can exist anywhere (the grid holds indices too).
//!
//! Invariant: each slot index is in exactly one of `active` or `free`.

use crate::particle::Particle;

/// Slot-based particle store with active/free index recycling.
#[derive(Debug, Default)]
pub struct ParticleArena {
    slots: Vec<Particle>,
    active: Vec<usize>,
    free: Vec<usize>,
}

impl ParticleArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active particles.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of pooled (retired) slots available for recycling.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Active slot indices, in activation order.
    #[inline]
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    /// Reactivate a pooled slot, returning its index. The slot keeps its
    /// retired-era fields; callers reconfigure and reset it.
    pub fn recycle(&mut self) -> Option<usize> {
        let index = self.free.pop()?;
        self.active.push(index);
        Some(index)
    }

    /// Insert a fresh particle into a new slot and activate it.
    pub fn insert(&mut self, particle: Particle) -> usize {
        let index = self.slots.len();
        self.slots.push(particle);
        self.active.push(index);
        index
    }

    /// Retire the most recently activated slot into the pool.
    pub fn retire_last(&mut self) -> Option<usize> {
        let index = self.active.pop()?;
        self.free.push(index);
        Some(index)
    }

    /// Retire every active slot.
    pub fn retire_all(&mut self) {
        self.free.extend(self.active.drain(..));
    }

    /// Shared access to a slot.
    #[inline]
    pub fn slot(&self, index: usize) -> &Particle {
        &self.slots[index]
    }

    /// Mutable access to a slot.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.slots[index]
    }

    /// Mutable access to two distinct slots at once, for pairwise collision
    /// resolution.
    ///
    /// # Panics
    ///
    /// Panics if `i == j`.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Particle, &mut Particle) {
        assert_ne!(i, j, "pair_mut requires distinct slots");
        if i < j {
            let (head, tail) = self.slots.split_at_mut(j);
            (&mut head[i], &mut tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(i);
            (&mut tail[0], &mut head[j])
        }
    }

    /// Iterate over `(slot_index, particle)` for the active set.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.active.iter().map(move |&i| (i, &self.slots[i]))
    }

    /// All slots, active and pooled alike, in slot order.
    pub(crate) fn slots_mut(&mut self) -> &mut [Particle] {
        &mut self.slots
    }
}
