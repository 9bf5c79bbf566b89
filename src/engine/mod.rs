//! Limit order book matching engine: orders, price levels, ladders and
//! the matching loop.

mod book;
mod error;
mod ladder;
mod level;
mod matching;
mod operations;
mod order;
mod snapshot;
mod trade;

mod tests;

pub use book::OrderBook;
pub use error::OrderBookError;
pub use ladder::SideLadder;
pub use level::PriceLevel;
pub use order::{Id, LevelIndex, Order, Price, Side, Volume, price_cmp};
pub use snapshot::{
    LevelSnapshot, OrderBookSnapshot, OrderBookSnapshotPackage, SNAPSHOT_FORMAT_VERSION,
};
pub use trade::{Trade, TradeListener};
