//! The matching loop that reconciles the book after each add.

use super::book::OrderBook;
use super::ladder::SideLadder;
use super::level::PriceLevel;
use super::order::{Id, Order};
use super::trade::Trade;
use std::collections::HashMap;
use tracing::trace;

impl OrderBook {
    /// Drives matching until the book is no longer crossed.
    ///
    /// Each pass inspects the raw tail of both ladders, drains tombstoned
    /// heads, crosses the two front orders, and pops levels that empty
    /// out. Tombstone cleanup happens inside the loop rather than on the
    /// cancel path, so cancels stay O(1) beyond their level lookup.
    /// Trades execute at the resting order's price and are delivered to
    /// the listener in match order, synchronously.
    pub(super) fn match_orders(&mut self) {
        let listener = self.trade_listener.clone();
        loop {
            let (Some(best_bid), Some(best_ask)) =
                (self.bids.tail_price(), self.asks.tail_price())
            else {
                break;
            };
            if best_bid < best_ask {
                // No cross.
                break;
            }

            let bid_emptied = Self::drain_inactive_head(&mut self.bids, &mut self.orders);
            let ask_emptied = Self::drain_inactive_head(&mut self.asks, &mut self.orders);
            if bid_emptied || ask_emptied {
                if bid_emptied {
                    self.bids.pop_tail();
                }
                if ask_emptied {
                    self.asks.pop_tail();
                }
                // Tail levels changed; re-evaluate the cross from the top.
                continue;
            }

            let Some(bid_level) = self.bids.tail_level_mut() else {
                break;
            };
            let Some(ask_level) = self.asks.tail_level_mut() else {
                break;
            };
            let (Some(&bid), Some(&ask)) = (bid_level.front(), ask_level.front()) else {
                break;
            };

            let volume = bid.volume.min(ask.volume);
            let trade = Trade {
                trade_id: self.trade_ids.next(),
                symbol: self.symbol.clone(),
                bid,
                ask,
                volume,
            };
            trace!("{}", trade);
            if let Some(callback) = &listener {
                callback(&trade);
            }

            let bid_remaining = bid_level.reduce_front(volume);
            if bid_remaining == 0 {
                self.orders.remove(&bid.id);
                bid_level.pop_front();
                Self::repair_after_reclaim(bid_level, &mut self.orders);
            } else if let Some(entry) = self.orders.get_mut(&bid.id) {
                entry.volume = bid_remaining;
            }

            let ask_remaining = ask_level.reduce_front(volume);
            if ask_remaining == 0 {
                self.orders.remove(&ask.id);
                ask_level.pop_front();
                Self::repair_after_reclaim(ask_level, &mut self.orders);
            } else if let Some(entry) = self.orders.get_mut(&ask.id) {
                entry.volume = ask_remaining;
            }

            let bid_level_emptied = bid_level.is_empty();
            let ask_level_emptied = ask_level.is_empty();
            if bid_level_emptied {
                self.bids.pop_tail();
            }
            if ask_level_emptied {
                self.asks.pop_tail();
            }
        }
    }

    /// Pops tombstoned slots off the head of the side's tail level,
    /// repairing the order index if the level reclaims its dead prefix.
    /// Returns true when the level ran empty and should be popped from
    /// its ladder.
    fn drain_inactive_head(ladder: &mut SideLadder, orders: &mut HashMap<Id, Order>) -> bool {
        let side = ladder.side();
        let Some(level) = ladder.tail_level_mut() else {
            return false;
        };
        while let Some(front) = level.front() {
            if front.active {
                break;
            }
            trace!("cleanup inactive {} head order {}", side, front);
            level.pop_front();
        }
        Self::repair_after_reclaim(level, orders);
        level.is_empty()
    }

    /// Applies a level's prefix reclamation, rebasing the `level_index`
    /// recorded in the order index for every surviving active slot.
    fn repair_after_reclaim(level: &mut PriceLevel, orders: &mut HashMap<Id, Order>) {
        for (id, index) in level.reclaim() {
            if let Some(entry) = orders.get_mut(&id) {
                entry.level_index = index;
            }
        }
    }
}
