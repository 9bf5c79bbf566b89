//! Shared fixtures for engine tests.

use crate::engine::{Trade, TradeListener};
use std::sync::{Arc, Mutex};

/// A listener that records every trade it sees, plus a handle to the log.
pub fn collecting_listener() -> (TradeListener, Arc<Mutex<Vec<Trade>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let listener: TradeListener = Arc::new(move |trade: &Trade| {
        sink.lock().expect("trade log poisoned").push(trade.clone());
    });
    (listener, log)
}

/// Drains a copy of the recorded trades.
pub fn recorded(log: &Arc<Mutex<Vec<Trade>>>) -> Vec<Trade> {
    log.lock().expect("trade log poisoned").clone()
}
