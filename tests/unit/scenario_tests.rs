//! End-to-end order flow scenarios driven through the public surface,
//! with every emitted trade checked against the expected stream.

use matchbook_rs::prelude::*;
use std::sync::{Arc, Mutex};

fn listening_book(symbol: &str) -> (OrderBook, Arc<Mutex<Vec<Trade>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let mut book = OrderBook::new(symbol);
    book.set_trade_listener(Arc::new(move |trade: &Trade| {
        sink.lock().expect("trade log poisoned").push(trade.clone());
    }));
    (book, log)
}

fn trades(log: &Arc<Mutex<Vec<Trade>>>) -> Vec<Trade> {
    log.lock().expect("trade log poisoned").clone()
}

#[test]
fn test_resting_bid_rests_and_is_fetchable() {
    let (mut book, log) = listening_book("T");

    let id = book.add_order(Side::Bid, 10.7, 5).expect("add");
    assert_eq!(id, 0);

    let order = book.find_order(0).expect("resting");
    assert_eq!(
        (order.id, order.side, order.price, order.volume, order.active),
        (0, Side::Bid, 10.7, 5, true)
    );
    assert_eq!(book.best_bid(), Some(10.7));
    assert_eq!(book.best_ask(), None);
    assert!(trades(&log).is_empty());
}

#[test]
fn test_cancelled_order_is_gone_for_good() {
    let (mut book, log) = listening_book("T");

    assert_eq!(book.add_order(Side::Bid, 15.0, 50).expect("add"), 0);
    assert!(book.delete_order(0));
    assert!(book.find_order(0).is_none());
    assert_eq!(book.best_bid(), None);
    assert_eq!(book.modify_order(0, 10.0, 100), None);
    assert!(trades(&log).is_empty());
}

#[test]
fn test_sweep_crosses_at_each_makers_price() {
    let (mut book, log) = listening_book("T");

    book.add_order(Side::Bid, 10.7, 5).expect("add");
    book.add_order(Side::Bid, 11.0, 5).expect("add");
    book.add_order(Side::Ask, 7.0, 10).expect("add");

    let stream = trades(&log);
    assert_eq!(stream.len(), 2);

    assert_eq!(stream[0].bid.id, 1);
    assert_eq!(stream[0].bid.volume, 5);
    assert_eq!(stream[0].ask.id, 2);
    assert_eq!(stream[0].ask.volume, 10);
    assert_eq!(stream[0].volume, 5);
    assert_eq!(stream[0].price(), 11.0);

    assert_eq!(stream[1].bid.id, 0);
    assert_eq!(stream[1].bid.volume, 5);
    assert_eq!(stream[1].ask.id, 2);
    assert_eq!(stream[1].ask.volume, 5);
    assert_eq!(stream[1].volume, 5);
    assert_eq!(stream[1].price(), 10.7);

    assert_eq!(book.best_bid(), None);
    assert_eq!(book.best_ask(), None);
    assert_eq!(book.open_orders(), 0);
}

#[test]
fn test_amend_repriced_bid_then_cross() {
    let (mut book, log) = listening_book("T");

    assert_eq!(book.add_order(Side::Bid, 100.0, 10).expect("add"), 0);
    assert_eq!(book.modify_order(0, 50.0, 5), Some(1));
    assert_eq!(book.add_order(Side::Ask, 50.0, 5).expect("add"), 2);

    let stream = trades(&log);
    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].bid.id, 1);
    assert_eq!(stream[0].bid.volume, 5);
    assert_eq!(stream[0].ask.id, 2);
    assert_eq!(stream[0].ask.volume, 5);
    assert_eq!(stream[0].volume, 5);

    assert_eq!(book.best_bid(), None);
    assert_eq!(book.best_ask(), None);
    assert_eq!(book.open_orders(), 0);
}

#[test]
fn test_interleaved_partial_fills_across_levels() {
    let (mut book, log) = listening_book("T");

    book.add_order(Side::Ask, 96.0, 10).expect("add"); // 0
    book.add_order(Side::Bid, 90.0, 5).expect("add"); // 1
    book.add_order(Side::Bid, 90.0, 5).expect("add"); // 2
    book.add_order(Side::Bid, 90.0, 5).expect("add"); // 3
    book.add_order(Side::Bid, 93.0, 1).expect("add"); // 4
    book.add_order(Side::Bid, 92.0, 1).expect("add"); // 5
    book.add_order(Side::Bid, 91.0, 2).expect("add"); // 6

    // Ask 3 @ 91 walks bids 4, 5, then one unit of 6.
    book.add_order(Side::Ask, 91.0, 3).expect("add"); // 7
    {
        let stream = trades(&log);
        assert_eq!(stream.len(), 3);
        assert_eq!(
            stream
                .iter()
                .map(|t| (t.bid.id, t.ask.id, t.volume))
                .collect::<Vec<_>>(),
            vec![(4, 7, 1), (5, 7, 1), (6, 7, 1)]
        );
        assert_eq!(stream[0].price(), 93.0);
        assert_eq!(stream[1].price(), 92.0);
        assert_eq!(stream[2].price(), 91.0);
    }
    assert!(book.find_order(7).is_none()); // taker fully filled
    assert_eq!(book.find_order(6).map(|o| o.volume), Some(1));

    book.add_order(Side::Ask, 96.0, 10).expect("add"); // 8
    book.add_order(Side::Bid, 91.0, 10).expect("add"); // 9

    // Two full-size bids lift the two resting 96 asks in arrival order.
    book.add_order(Side::Bid, 96.0, 10).expect("add"); // 10
    book.add_order(Side::Bid, 96.0, 10).expect("add"); // 11
    {
        let stream = trades(&log);
        assert_eq!(stream.len(), 5);
        assert_eq!(
            (stream[3].bid.id, stream[3].ask.id, stream[3].volume),
            (10, 0, 10)
        );
        assert_eq!(stream[3].price(), 96.0);
        assert_eq!(
            (stream[4].bid.id, stream[4].ask.id, stream[4].volume),
            (11, 8, 10)
        );
        assert_eq!(stream[4].price(), 96.0);
    }

    // Ask 10 @ 91 takes the last unit of bid 6, then 9 units of bid 9.
    book.add_order(Side::Ask, 91.0, 10).expect("add"); // 12
    let stream = trades(&log);
    assert_eq!(stream.len(), 7);
    assert_eq!(
        (stream[5].bid.id, stream[5].ask.id, stream[5].volume),
        (6, 12, 1)
    );
    assert_eq!(
        (stream[6].bid.id, stream[6].ask.id, stream[6].volume),
        (9, 12, 9)
    );

    // Bid 9 keeps one unit at 91; everything else is filled or gone.
    let remainder = book.find_order(9).expect("resting");
    assert_eq!(remainder.volume, 1);
    assert_eq!(remainder.price, 91.0);
    assert_eq!(book.best_bid(), Some(91.0));
    assert_eq!(book.best_ask(), None);

    let total_traded: u64 = stream.iter().map(|t| t.volume).sum();
    assert_eq!(total_traded, 33);
}

#[test]
fn test_head_tombstone_is_skipped_by_the_match_loop() {
    let (mut book, log) = listening_book("T");

    assert_eq!(book.add_order(Side::Ask, 7.0, 10).expect("add"), 0);
    assert!(book.delete_order(0));
    assert_eq!(book.add_order(Side::Ask, 7.0, 5).expect("add"), 1);
    assert_eq!(book.add_order(Side::Bid, 8.0, 5).expect("add"), 2);

    let stream = trades(&log);
    assert_eq!(stream.len(), 1);
    assert_eq!(stream[0].bid.id, 2);
    assert_eq!(stream[0].bid.volume, 5);
    assert_eq!(stream[0].ask.id, 1);
    assert_eq!(stream[0].ask.volume, 5);
    assert_eq!(stream[0].volume, 5);
    assert!(stream.iter().all(|t| t.bid.id != 0 && t.ask.id != 0));
}

#[test]
fn test_remaining_bid_after_sweep_still_trades_later() {
    // The tail of a sweep leaves a partially filled maker; the next taker
    // must pick it up at FIFO head position, volume already decremented.
    let (mut book, log) = listening_book("T");

    book.add_order(Side::Bid, 91.0, 2).expect("add"); // 0
    book.add_order(Side::Bid, 91.0, 4).expect("add"); // 1
    book.add_order(Side::Ask, 91.0, 3).expect("add"); // 2: fills 0, half of 1

    book.add_order(Side::Ask, 91.0, 3).expect("add"); // 3: rest of 1
    let stream = trades(&log);
    assert_eq!(
        stream
            .iter()
            .map(|t| (t.bid.id, t.ask.id, t.volume))
            .collect::<Vec<_>>(),
        vec![(0, 2, 2), (1, 2, 1), (1, 3, 3)]
    );
    // Snapshot volumes are pre-decrement throughout.
    assert_eq!(stream[1].bid.volume, 4);
    assert_eq!(stream[2].bid.volume, 3);
    assert_eq!(book.open_orders(), 0);
}
