//! Order book snapshot for market data export.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::OrderBookError;
use super::order::{Price, Volume};

/// Aggregate view of one price level at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// The level price.
    pub price: Price,
    /// Total volume of active orders at this level.
    pub volume: Volume,
    /// Number of active orders queued at this level.
    pub order_count: usize,
}

/// A snapshot of the order book state at a specific point in time.
///
/// Levels are ordered best-first on both sides and carry active volume
/// only; tombstoned slots never appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book.
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch).
    pub timestamp: u64,

    /// Snapshot of bid price levels, best bid first.
    pub bids: Vec<LevelSnapshot>,

    /// Snapshot of ask price levels, best ask first.
    pub asks: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and volume.
    #[must_use]
    pub fn best_bid(&self) -> Option<(Price, Volume)> {
        self.bids.first().map(|level| (level.price, level.volume))
    }

    /// Get the best ask price and volume.
    #[must_use]
    pub fn best_ask(&self) -> Option<(Price, Volume)> {
        self.asks.first().map(|level| (level.price, level.volume))
    }

    /// Get the mid price (average of best bid and best ask).
    #[must_use]
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some((bid_price + ask_price) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid).
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some(ask_price - bid_price),
            _ => None,
        }
    }

    /// Calculate the total volume on the bid side.
    #[must_use]
    pub fn total_bid_volume(&self) -> Volume {
        self.bids.iter().map(|level| level.volume).sum()
    }

    /// Calculate the total volume on the ask side.
    #[must_use]
    pub fn total_ask_volume(&self) -> Volume {
        self.asks.iter().map(|level| level.volume).sum()
    }
}

/// Format version used for checksum-enabled order book snapshots.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for [`OrderBookSnapshot`]
/// instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshotPackage {
    /// Version of the snapshot schema for forward compatibility.
    pub version: u32,
    /// Snapshot payload.
    pub snapshot: OrderBookSnapshot,
    /// Hex-encoded SHA-256 checksum of the serialized snapshot.
    pub checksum: String,
}

impl OrderBookSnapshotPackage {
    /// Creates a new package computing the checksum of the snapshot
    /// contents.
    ///
    /// # Errors
    /// Returns [`OrderBookError::SerializationError`] when the snapshot
    /// cannot be serialized for hashing.
    pub fn new(snapshot: OrderBookSnapshot) -> Result<Self, OrderBookError> {
        let checksum = Self::compute_checksum(&snapshot)?;
        Ok(Self {
            version: SNAPSHOT_FORMAT_VERSION,
            snapshot,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::SerializationError`] on serializer
    /// failure.
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        serde_json::to_string(self).map_err(|error| OrderBookError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes a package from JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::DeserializationError`] when `data` is not
    /// a valid package document.
    pub fn from_json(data: &str) -> Result<Self, OrderBookError> {
        serde_json::from_str(data).map_err(|error| OrderBookError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates the checksum and version.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidOperation`] for an unsupported
    /// version and [`OrderBookError::ChecksumMismatch`] when the payload
    /// does not hash to the recorded checksum.
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.version != SNAPSHOT_FORMAT_VERSION {
            return Err(OrderBookError::InvalidOperation {
                message: format!(
                    "unsupported snapshot version: {} (expected {})",
                    self.version, SNAPSHOT_FORMAT_VERSION
                ),
            });
        }

        let computed = Self::compute_checksum(&self.snapshot)?;
        if computed != self.checksum {
            return Err(OrderBookError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated snapshot.
    ///
    /// # Errors
    /// Propagates the errors of [`Self::validate`].
    pub fn into_snapshot(self) -> Result<OrderBookSnapshot, OrderBookError> {
        self.validate()?;
        Ok(self.snapshot)
    }

    fn compute_checksum(snapshot: &OrderBookSnapshot) -> Result<String, OrderBookError> {
        let payload =
            serde_json::to_vec(snapshot).map_err(|error| OrderBookError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum_bytes = hasher.finalize();
        Ok(checksum_bytes
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>())
    }
}
