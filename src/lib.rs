//! # matchbook-rs
//!
//! A price-time priority limit order book matching engine for a single
//! instrument. The engine implements a continuous double auction: each
//! incoming limit order crosses against the resting book at the maker's
//! price, strictly in price/time priority, and any unmatched remainder
//! rests.
//!
//! ## Key Features
//!
//! - **Lazy-deletion FIFO levels**: cancels and amends are O(1) tombstone
//!   writes into append-only slot storage; the matching loop reclaims dead
//!   slots on head advance, so the slot indices held by the order index
//!   stay valid without extra bookkeeping.
//!
//! - **Contiguous price ladders**: each side is a sorted vector with the
//!   top of book at the tail. Best-price access and removal are O(1), and
//!   most insertions land near the tail where the book is busiest.
//!
//! - **Deterministic trade stream**: given the same operation sequence,
//!   the engine emits a byte-identical sequence of trades (order,
//!   contents and ids). Trade ids are UUIDv5 values derived from the book
//!   symbol and a sequence counter, never from a clock or an RNG.
//!
//! - **Synchronous trade listener**: a single sink invoked once per
//!   matched pair, in match order, before the triggering call returns.
//!   The snapshots it receives are taken before the trade's volume
//!   decrement.
//!
//! - **Checksummed snapshots**: aggregate depth exports with SHA-256
//!   integrity validation over the serialized payload.
//!
//! ## Design Goals
//!
//! 1. **Correctness**: every public call either mutates the book
//!    coherently, with all invariants holding on return, or is a no-op
//!    that surfaces a negative result.
//! 2. **Determinism**: trade emission is a pure function of the submitted
//!    operation sequence, making streams reproducible bit for bit.
//! 3. **Simplicity**: strictly single-threaded. The embedder serializes
//!    submissions; multiple instruments are multiple engines.
//!
//! ## Example
//!
//! ```rust
//! use matchbook_rs::prelude::*;
//! use std::sync::Arc;
//!
//! let mut book = OrderBook::new("BTC/USD");
//! book.set_trade_listener(Arc::new(|trade| println!("{trade}")));
//!
//! let bid = book.add_order(Side::Bid, 100.0, 10)?;
//! let _ask = book.add_order(Side::Ask, 100.0, 4)?; // trades 4 against the bid
//! assert_eq!(book.find_order(bid).map(|order| order.volume), Some(6));
//! # Ok::<(), matchbook_rs::OrderBookError>(())
//! ```

pub mod engine;
pub mod prelude;
mod utils;

pub use engine::{
    Id, LevelIndex, LevelSnapshot, Order, OrderBook, OrderBookError, OrderBookSnapshot,
    OrderBookSnapshotPackage, Price, PriceLevel, SNAPSHOT_FORMAT_VERSION, Side, SideLadder, Trade,
    TradeListener, Volume, price_cmp,
};
pub use utils::current_time_millis;
