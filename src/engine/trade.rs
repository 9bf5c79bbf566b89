//! Trade events emitted by the matching loop.

use super::order::{Order, Price, Volume};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A single match between a resting bid and a resting ask.
///
/// Both snapshots are taken at the moment the trade is struck, before the
/// traded volume is subtracted: `bid.volume` and `ask.volume` still
/// include `volume`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    /// Deterministic trade identifier, derived from the book symbol and
    /// the trade sequence number. Replaying the same operation sequence
    /// yields byte-identical trades.
    pub trade_id: Uuid,
    /// The symbol of the book that produced this trade.
    pub symbol: String,
    /// The bid-side order as it stood when the trade was struck.
    pub bid: Order,
    /// The ask-side order as it stood when the trade was struck.
    pub ask: Order,
    /// Volume exchanged.
    pub volume: Volume,
}

impl Trade {
    /// The execution price: the resting (maker) order's limit.
    ///
    /// Ids are issued monotonically, so the maker is the side carrying the
    /// lower id.
    #[must_use]
    pub fn price(&self) -> Price {
        if self.bid.id < self.ask.id {
            self.bid.price
        } else {
            self.ask.price
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE {} volume={} price={} bid={} ask={}",
            self.symbol,
            self.volume,
            self.price(),
            self.bid,
            self.ask
        )
    }
}

/// Trade listener specification using Arc for shared ownership.
///
/// Invoked synchronously, once per matched pair, in match order, before
/// the triggering call returns. A blocking listener blocks the engine.
pub type TradeListener = Arc<dyn Fn(&Trade) + Send + Sync>;

/// Issues trade ids as UUIDv5 names inside a per-book namespace.
///
/// The namespace is derived from the book symbol and the name is the
/// big-endian trade sequence number, so the id stream is a pure function
/// of (symbol, trade count).
#[derive(Debug)]
pub(super) struct TradeIdGenerator {
    namespace: Uuid,
    sequence: u64,
}

impl TradeIdGenerator {
    pub(super) fn new(symbol: &str) -> Self {
        Self {
            namespace: Uuid::new_v5(&Uuid::NAMESPACE_OID, symbol.as_bytes()),
            sequence: 0,
        }
    }

    pub(super) fn next(&mut self) -> Uuid {
        let id = Uuid::new_v5(&self.namespace, &self.sequence.to_be_bytes());
        self.sequence += 1;
        id
    }
}
