//! Order book operations: adding, amending and cancelling orders.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Id, Order, Price, Side, Volume};
use tracing::{trace, warn};

impl OrderBook {
    /// Submits a new limit order and runs the matching loop.
    ///
    /// The order receives the next monotonic id. Whatever volume does not
    /// cross immediately rests on the book at `price`. Trades produced by
    /// the cross are delivered to the trade listener before this call
    /// returns.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidPrice`] for non-finite prices,
    /// [`OrderBookError::InvalidVolume`] for zero volume, and
    /// [`OrderBookError::DuplicateOrderId`] when the id counter collides
    /// with an indexed order (an engine invariant violation, surfaced
    /// rather than retried).
    pub fn add_order(
        &mut self,
        side: Side,
        price: Price,
        volume: Volume,
    ) -> Result<Id, OrderBookError> {
        if !price.is_finite() {
            return Err(OrderBookError::InvalidPrice { price });
        }
        if volume == 0 {
            return Err(OrderBookError::InvalidVolume { volume });
        }

        let id = self.next_order_id;
        if self.orders.contains_key(&id) {
            return Err(OrderBookError::DuplicateOrderId { id });
        }
        self.next_order_id += 1;

        let mut order = Order::new(id, side, price, volume);
        order.level_index = self.ladder_mut(side).insert(order);
        self.orders.insert(id, order);
        trace!("added order {}", order);

        self.match_orders();
        Ok(id)
    }

    /// Amends an order by id with cancel-then-add semantics.
    ///
    /// The resting order is cancelled and a fresh order for (`new_price`,
    /// `new_volume`) is submitted on the same side. The amended order
    /// therefore loses time priority and receives a new id, which is
    /// returned; repricing in place has no meaning in a price-time
    /// priority book. The replacement add runs the matching loop, so an
    /// amend can itself produce trades.
    ///
    /// Returns `None`, leaving the book untouched, when `id` is unknown
    /// or already inactive, or when the replacement values are invalid.
    pub fn modify_order(&mut self, id: Id, new_price: Price, new_volume: Volume) -> Option<Id> {
        if !new_price.is_finite() || new_volume == 0 {
            warn!(
                "rejecting modify_order for id={}: invalid replacement price={} volume={}",
                id, new_price, new_volume
            );
            return None;
        }
        let side = match self.orders.get(&id) {
            Some(order) => order.side,
            None => {
                warn!("could not find existing order while calling modify_order with id={}", id);
                return None;
            }
        };
        if !self.delete_order(id) {
            return None;
        }
        match self.add_order(side, new_price, new_volume) {
            Ok(new_id) => {
                trace!("modified order id={} into id={}", id, new_id);
                Some(new_id)
            }
            Err(error) => {
                warn!("replacement add failed while modifying order id={}: {}", id, error);
                None
            }
        }
    }

    /// Cancels an order by id.
    ///
    /// The level slot is tombstoned in place and the index entry removed;
    /// the slot itself is reclaimed later by head advance inside the
    /// matching loop. Cancels cannot create a cross, so no matching runs.
    ///
    /// Returns false when `id` is unknown or already inactive, or when
    /// the slot fails its identity check against the index snapshot (a
    /// stale reference, surfaced but not fatal).
    pub fn delete_order(&mut self, id: Id) -> bool {
        let Some(snapshot) = self.orders.get(&id).copied() else {
            warn!("could not find existing order while calling delete_order with id={}", id);
            return false;
        };
        let cancelled = match self.ladder_mut(snapshot.side).find_mut(snapshot.price) {
            Some(level) => level.cancel(&snapshot),
            None => false,
        };
        if !cancelled {
            warn!("stale slot reference while calling delete_order for order {}", snapshot);
            return false;
        }
        self.orders.remove(&id);
        trace!("deleted order {}", snapshot);
        true
    }
}
