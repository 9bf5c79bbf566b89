//! Sorted per-side sequence of price levels with the top of book at the tail.

use super::level::PriceLevel;
use super::order::{LevelIndex, Order, Price, Side, price_cmp};
use std::cmp::Ordering;

/// Price levels for one side of the book.
///
/// Levels are kept sorted so the aggressive end sits at the tail (bids
/// ascend, asks descend), making top-of-book access and removal O(1)
/// vector-tail operations. Contiguous storage is deliberate: most traffic
/// lands near the top of book, so the binary search stays cache-friendly
/// and mid-vector insertion of a brand-new level is the rare case.
#[derive(Debug)]
pub struct SideLadder {
    side: Side,
    levels: Vec<(Price, PriceLevel)>,
}

impl SideLadder {
    /// Creates an empty ladder for `side`.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: Vec::new(),
        }
    }

    /// The side this ladder belongs to.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// True when no level remains, empty or otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of levels currently held, empty or otherwise.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when `a` sits further from the top of book than `b` on this
    /// side.
    fn further_from_top(&self, a: Price, b: Price) -> bool {
        match self.side {
            Side::Bid => price_cmp(a, b) == Ordering::Less,
            Side::Ask => price_cmp(a, b) == Ordering::Greater,
        }
    }

    /// Position of the first level whose price is not further from the
    /// top than `price`: the lower bound under the side's comparator.
    fn lower_bound(&self, price: Price) -> usize {
        self.levels
            .partition_point(|&(level_price, _)| self.further_from_top(level_price, price))
    }

    /// Places `order` at its price level, creating the level at its sorted
    /// position if absent. Returns the slot index the order received
    /// inside the level (0 for a freshly created level).
    pub fn insert(&mut self, order: Order) -> LevelIndex {
        let position = self.lower_bound(order.price);
        let hit = matches!(
            self.levels.get(position),
            Some(&(level_price, _)) if price_cmp(level_price, order.price) == Ordering::Equal
        );
        if hit {
            self.levels[position].1.append(order)
        } else {
            let mut level = PriceLevel::new();
            let index = level.append(order);
            self.levels.insert(position, (order.price, level));
            index
        }
    }

    /// The level resting exactly at `price`, if any.
    pub fn find_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        let position = self.lower_bound(price);
        match self.levels.get_mut(position) {
            Some((level_price, level)) if price_cmp(*level_price, price) == Ordering::Equal => {
                Some(level)
            }
            _ => None,
        }
    }

    /// Price of the tail level, dead or alive. The matching loop keys its
    /// cross test off this raw view so fully tombstoned tails still get
    /// drained and popped.
    #[must_use]
    pub fn tail_price(&self) -> Option<Price> {
        self.levels.last().map(|&(price, _)| price)
    }

    /// Price of the best level that still holds an active order. Levels
    /// emptied by cancels linger until the matching loop pops them, so
    /// this walks past fully tombstoned tails.
    #[must_use]
    pub fn best_price(&self) -> Option<Price> {
        self.levels
            .iter()
            .rev()
            .find(|(_, level)| level.has_active())
            .map(|&(price, _)| price)
    }

    /// The top-of-book level for in-place mutation.
    pub fn tail_level_mut(&mut self) -> Option<&mut PriceLevel> {
        self.levels.last_mut().map(|(_, level)| level)
    }

    /// Removes the top-of-book level, releasing its storage.
    pub fn pop_tail(&mut self) {
        self.levels.pop();
    }

    /// Levels from the top of book outward.
    pub fn iter_from_top(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }
}
