//! Core order book state and read-side operations.

use super::ladder::SideLadder;
use super::order::{Id, Order, Price, Side};
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use super::trade::{TradeIdGenerator, TradeListener};
use crate::utils::current_time_millis;
use std::collections::HashMap;
use tracing::trace;

/// A price-time priority limit order book for a single instrument.
///
/// The book owns the two price ladders, the id → order index used for
/// O(1) amend and cancel, and the monotonic id counter. It is strictly
/// single-threaded: every public operation, including the entire matching
/// loop and any trade listener invocations it triggers, runs to
/// completion on the caller's thread before the next operation may begin.
/// Embedders that receive orders concurrently serialize them externally;
/// multiple instruments are multiple books.
///
/// Given the same operation sequence, the emitted trade stream (order,
/// contents and ids) is byte-identical across runs.
pub struct OrderBook {
    /// The symbol or identifier for this order book.
    pub(super) symbol: String,

    /// Bid-side price levels, best bid at the tail.
    pub(super) bids: SideLadder,

    /// Ask-side price levels, best ask at the tail.
    pub(super) asks: SideLadder,

    /// Id → order snapshot for O(1) lookup on amend and cancel. Each
    /// snapshot mirrors its level slot (id, side, price, volume) plus the
    /// slot index inside the level; identity is re-verified whenever the
    /// slot is dereferenced through this map.
    pub(super) orders: HashMap<Id, Order>,

    /// Next engine-assigned order id.
    pub(super) next_order_id: Id,

    /// Generator for deterministic trade identifiers.
    pub(super) trade_ids: TradeIdGenerator,

    /// Invoked synchronously for every trade the matching loop produces.
    pub(super) trade_listener: Option<TradeListener>,
}

impl OrderBook {
    /// Creates an empty book for `symbol`.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            bids: SideLadder::new(Side::Bid),
            asks: SideLadder::new(Side::Ask),
            orders: HashMap::new(),
            next_order_id: 0,
            trade_ids: TradeIdGenerator::new(symbol),
            trade_listener: None,
        }
    }

    /// The symbol this book trades.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Best (highest) bid price with active volume, or `None` when the
    /// bid side is empty.
    #[must_use]
    pub fn best_bid(&self) -> Option<Price> {
        let best = self.bids.best_price();
        trace!("best_bid: {:?}", best);
        best
    }

    /// Best (lowest) ask price with active volume, or `None` when the ask
    /// side is empty.
    #[must_use]
    pub fn best_ask(&self) -> Option<Price> {
        let best = self.asks.best_price();
        trace!("best_ask: {:?}", best);
        best
    }

    /// Read-only snapshot of an order by id. Cancelled and fully filled
    /// orders are absent.
    #[must_use]
    pub fn find_order(&self, id: Id) -> Option<Order> {
        let order = self.orders.get(&id).copied();
        if order.is_none() {
            trace!("no active order found for id={}", id);
        }
        order
    }

    /// Number of open orders in the index.
    #[must_use]
    pub fn open_orders(&self) -> usize {
        self.orders.len()
    }

    /// Installs the trade sink, replacing any previous one.
    pub fn set_trade_listener(&mut self, listener: TradeListener) {
        self.trade_listener = Some(listener);
    }

    pub(super) fn ladder_mut(&mut self, side: Side) -> &mut SideLadder {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Aggregate depth snapshot of the top `depth` levels per side.
    /// Tombstoned slots and fully dead levels are excluded.
    #[must_use]
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: Self::side_snapshot(&self.bids, depth),
            asks: Self::side_snapshot(&self.asks, depth),
        }
    }

    fn side_snapshot(ladder: &SideLadder, depth: usize) -> Vec<LevelSnapshot> {
        ladder
            .iter_from_top()
            .filter_map(|(price, level)| {
                let mut volume = 0;
                let mut order_count = 0;
                for order in level.iter().filter(|order| order.active) {
                    volume += order.volume;
                    order_count += 1;
                }
                (order_count > 0).then_some(LevelSnapshot {
                    price,
                    volume,
                    order_count,
                })
            })
            .take(depth)
            .collect()
    }
}
