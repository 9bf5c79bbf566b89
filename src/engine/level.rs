//! FIFO price level with lazy head advance and tombstoned slots.

use super::order::{Id, LevelIndex, Order, Volume};

/// Number of popped head slots a level tolerates before its dead prefix
/// becomes eligible for reclamation.
const RECLAIM_THRESHOLD: usize = 1024;

/// Orders resting at one price, in strict arrival order.
///
/// Slots are append-only. Cancellation tombstones a slot in place rather
/// than removing it, and fully filled slots are likewise left behind once
/// the head cursor moves past them. This keeps cancel and amend O(1) and
/// keeps every slot's `level_index` valid for the lifetime of the
/// external references held by the order index.
///
/// The dead prefix below `start` is dropped wholesale by [`reclaim`]
/// (rebasing surviving indices) once it dominates the backing storage.
///
/// [`reclaim`]: PriceLevel::reclaim
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    orders: Vec<Order>,
    /// First slot not yet popped from the head.
    start: usize,
    /// Count of active slots anywhere in `orders`.
    live: usize,
}

impl PriceLevel {
    /// Creates an empty level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an order to the tail and returns the slot index it was
    /// assigned. Infallible.
    pub fn append(&mut self, mut order: Order) -> LevelIndex {
        let index = self.orders.len();
        order.level_index = index;
        self.orders.push(order);
        self.live += 1;
        index
    }

    /// The first not-yet-popped slot, tombstone or not. Callers drain
    /// tombstones themselves via [`pop_front`](PriceLevel::pop_front).
    #[must_use]
    pub fn front(&self) -> Option<&Order> {
        self.orders.get(self.start)
    }

    /// Advances the head cursor past the current front slot.
    pub fn pop_front(&mut self) {
        debug_assert!(self.start < self.orders.len());
        self.start += 1;
    }

    /// Subtracts `volume` from the front slot, tombstoning it when it
    /// reaches zero. Returns the slot's remaining volume (0 when the level
    /// is empty).
    pub fn reduce_front(&mut self, volume: Volume) -> Volume {
        let start = self.start;
        let Some(slot) = self.orders.get_mut(start) else {
            return 0;
        };
        slot.volume = slot.volume.saturating_sub(volume);
        if slot.volume == 0 && slot.active {
            slot.active = false;
            self.live -= 1;
        }
        slot.volume
    }

    /// Sets the volume of the slot referenced by `snapshot`, provided the
    /// slot still carries the same identity (id, side, price). Returns
    /// false on a stale reference, leaving the level untouched.
    pub fn modify(&mut self, snapshot: &Order, new_volume: Volume) -> bool {
        match self.orders.get_mut(snapshot.level_index) {
            Some(slot) if slot.same_identity(snapshot) && slot.active => {
                slot.volume = new_volume;
                true
            }
            _ => false,
        }
    }

    /// Tombstones the slot referenced by `snapshot` after the same
    /// identity check as [`modify`](PriceLevel::modify). The slot keeps
    /// its position; head advance reclaims it later.
    pub fn cancel(&mut self, snapshot: &Order) -> bool {
        match self.orders.get_mut(snapshot.level_index) {
            Some(slot) if slot.same_identity(snapshot) && slot.active => {
                slot.active = false;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// True when every slot has been popped from the head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.orders.len()
    }

    /// Number of not-yet-popped slots, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len() - self.start
    }

    /// True while at least one slot is still active.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.live > 0
    }

    /// Not-yet-popped slots in FIFO order, tombstones included.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders[self.start..].iter()
    }

    /// Drops the dead prefix once `start` has passed the reclamation
    /// threshold and more than half the storage is dead, rebasing
    /// `level_index` for every surviving slot. Returns the
    /// `(id, new_index)` pairs of surviving *active* slots so the caller
    /// can repair the external references held by the order index.
    /// Returns an empty vec when nothing was reclaimed.
    pub fn reclaim(&mut self) -> Vec<(Id, LevelIndex)> {
        if self.start < RECLAIM_THRESHOLD || self.start * 2 <= self.orders.len() {
            return Vec::new();
        }
        self.orders.drain(..self.start);
        self.start = 0;
        let mut rebased = Vec::with_capacity(self.orders.len());
        for (index, slot) in self.orders.iter_mut().enumerate() {
            slot.level_index = index;
            if slot.active {
                rebased.push((slot.id, index));
            }
        }
        rebased
    }
}
