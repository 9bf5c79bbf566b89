//! Order book error types

use super::order::{Id, Price, Volume};
use std::fmt;

/// Errors that can occur within the order book engine.
#[derive(Debug)]
#[non_exhaustive]
pub enum OrderBookError {
    /// The id counter produced an id that is already indexed. This is an
    /// engine invariant violation, not a caller mistake.
    DuplicateOrderId {
        /// The colliding order id.
        id: Id,
    },

    /// Order price is not a finite number and cannot serve as a ladder key.
    InvalidPrice {
        /// The rejected price.
        price: Price,
    },

    /// Order volume must be strictly positive.
    InvalidVolume {
        /// The rejected volume.
        volume: Volume,
    },

    /// Error while serializing snapshot data.
    SerializationError {
        /// Underlying error message.
        message: String,
    },

    /// Error while deserializing snapshot data.
    DeserializationError {
        /// Underlying error message.
        message: String,
    },

    /// Snapshot integrity check failed.
    ChecksumMismatch {
        /// Expected checksum value.
        expected: String,
        /// Actual checksum value.
        actual: String,
    },

    /// Operation not permitted in the current state.
    InvalidOperation {
        /// Description of the error.
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::DuplicateOrderId { id } => {
                write!(f, "duplicate order id: {id} is already indexed")
            }
            OrderBookError::InvalidPrice { price } => {
                write!(f, "invalid price: {price} is not a finite number")
            }
            OrderBookError::InvalidVolume { volume } => {
                write!(f, "invalid volume: {volume} must be strictly positive")
            }
            OrderBookError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            OrderBookError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            OrderBookError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, but computed {actual}")
            }
            OrderBookError::InvalidOperation { message } => {
                write!(f, "invalid operation: {message}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
