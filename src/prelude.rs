//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use matchbook_rs::prelude::*;
//! ```

// Core order book types
pub use crate::engine::{OrderBook, OrderBookError};

// Order record and scalar aliases
pub use crate::engine::{Id, LevelIndex, Order, Price, Side, Volume};

// Trade-related types
pub use crate::engine::{Trade, TradeListener};

// Snapshot types
pub use crate::engine::{
    LevelSnapshot, OrderBookSnapshot, OrderBookSnapshotPackage, SNAPSHOT_FORMAT_VERSION,
};

// Utility functions
pub use crate::utils::current_time_millis;
