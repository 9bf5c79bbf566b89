//! Order record and side definitions shared across the engine.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Engine-assigned order identifier, issued monotonically from 0.
pub type Id = u64;

/// Limit price. Treated as an exact key; see [`price_cmp`].
pub type Price = f64;

/// Order volume in instrument units.
pub type Volume = u64;

/// Absolute slot position of an order inside its price level.
pub type LevelIndex = usize;

/// Which half of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side.
    Bid,
    /// Sell side.
    Ask,
}

impl Side {
    /// The side an incoming order matches against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Ask => write!(f, "ASK"),
        }
    }
}

/// Total, deterministic ordering for price keys.
///
/// Prices are compared with `f64::total_cmp`, so every finite price has a
/// stable position in a ladder and equal bit patterns are the only equal
/// keys. Non-finite prices are rejected at the book boundary and never
/// reach a comparison.
#[inline]
#[must_use]
pub fn price_cmp(a: Price, b: Price) -> Ordering {
    a.total_cmp(&b)
}

/// A single order slot.
///
/// The same value type serves as the level slot, the order-index snapshot,
/// and the trade-event payload. `level_index` threads the slot position
/// through the order index so amend and cancel can address the slot
/// directly; identity is re-verified on every such dereference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Engine-assigned identifier.
    pub id: Id,
    /// Book side this order rests on.
    pub side: Side,
    /// Limit price.
    pub price: Price,
    /// Remaining volume. Zero implies the order is inactive.
    pub volume: Volume,
    /// Slot position inside the owning level. Assigned at insertion and
    /// stable until the level reclaims its dead prefix.
    pub level_index: LevelIndex,
    /// Cleared on cancel and on full fill; inactive slots are tombstones
    /// awaiting head advance.
    pub active: bool,
}

impl Order {
    pub(crate) fn new(id: Id, side: Side, price: Price, volume: Volume) -> Self {
        Self {
            id,
            side,
            price,
            volume,
            level_index: 0,
            active: true,
        }
    }

    /// Identity check used when dereferencing a level slot through the
    /// order index: id, side and price must agree. Volume is deliberately
    /// excluded so a snapshot taken before a partial fill still addresses
    /// its slot.
    #[must_use]
    pub fn same_identity(&self, other: &Order) -> bool {
        self.id == other.id
            && self.side == other.side
            && price_cmp(self.price, other.price) == Ordering::Equal
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(id={} side={} volume={} price={} level_index={} active={})",
            self.id, self.side, self.volume, self.price, self.level_index, self.active
        )
    }
}
