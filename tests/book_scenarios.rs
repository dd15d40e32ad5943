//! End-to-end scenarios driven only through the public API, plus the
//! CSV round trip through `ingest`.

use std::io::Write;

use limit_order_book::{ingest, OrderBookBuilder, OrderStatus, Side, Trade};

fn fresh() -> limit_order_book::OrderBook {
    OrderBookBuilder::new("BTC-USD").build()
}

#[test]
fn s1_rest_then_cancel() {
    let mut ob = fresh();
    assert!(ob.place_order(1, 0, Side::Buy, 100, 10).is_empty());
    assert_eq!(ob.best_buy(), 100);

    assert!(ob.place_order(2, 0, Side::Sell, 105, 5).is_empty());
    assert_eq!(ob.best_sell(), 105);
    assert_eq!(ob.spread(), Some(5));

    ob.delete_order(1);
    assert_eq!(ob.best_buy(), 0);
    assert!(ob.depth(Side::Buy).is_empty());
}

#[test]
fn s2_full_consume_at_one_level() {
    let mut ob = fresh();
    ob.place_order(1, 0, Side::Sell, 50, 10);
    let trades = ob.place_order(2, 0, Side::Buy, 50, 10);

    assert_eq!(trades, vec![Trade { aggressor_id: 2, matched_id: 1, price: 50, volume: 10 }]);
    assert_eq!(ob.best_buy(), 0);
    assert_eq!(ob.best_sell(), 0);
}

#[test]
fn s3_fifo_at_one_price() {
    let mut ob = fresh();
    ob.place_order(1, 0, Side::Sell, 50, 4);
    ob.place_order(2, 0, Side::Sell, 50, 6);
    let trades = ob.place_order(3, 0, Side::Buy, 50, 7);

    assert_eq!(
        trades,
        vec![
            Trade { aggressor_id: 3, matched_id: 1, price: 50, volume: 4 },
            Trade { aggressor_id: 3, matched_id: 2, price: 50, volume: 3 },
        ]
    );
    assert_eq!(ob.depth(Side::Sell), vec![(50, 3)]);
    assert!(ob.depth(Side::Buy).is_empty());
}

#[test]
fn s4_sweep_multiple_levels() {
    let mut ob = fresh();
    ob.place_order(1, 0, Side::Sell, 100, 2);
    ob.place_order(2, 0, Side::Sell, 101, 2);
    ob.place_order(3, 0, Side::Sell, 102, 2);
    let trades = ob.place_order(4, 0, Side::Buy, 101, 5);

    assert_eq!(
        trades,
        vec![
            Trade { aggressor_id: 4, matched_id: 1, price: 100, volume: 2 },
            Trade { aggressor_id: 4, matched_id: 2, price: 101, volume: 2 },
        ]
    );
    assert_eq!(ob.depth(Side::Buy), vec![(101, 1)]);
    assert_eq!(ob.best_buy(), 101);
    assert_eq!(ob.best_sell(), 102);
}

#[test]
fn s5_residual_rests() {
    let mut ob = fresh();
    ob.place_order(1, 0, Side::Sell, 200, 5);
    let trades = ob.place_order(2, 0, Side::Buy, 200, 8);

    assert_eq!(trades, vec![Trade { aggressor_id: 2, matched_id: 1, price: 200, volume: 5 }]);
    assert_eq!(ob.depth(Side::Buy), vec![(200, 3)]);
    assert_eq!(ob.best_buy(), 200);
    assert_eq!(ob.best_sell(), 0);
}

#[test]
fn s6_cancel_of_nonexistent_id() {
    let mut ob = fresh();
    ob.delete_order(999);
    assert_eq!(ob.best_buy(), 0);
    assert_eq!(ob.best_sell(), 0);
}

#[test]
fn determinism_across_independent_replays() {
    let commands: Vec<(u64, Side, u32, u64)> = vec![
        (1, Side::Sell, 100, 3),
        (2, Side::Sell, 101, 4),
        (3, Side::Buy, 101, 5),
        (4, Side::Buy, 99, 2),
        (5, Side::Sell, 98, 1),
    ];

    let replay = |commands: &[(u64, Side, u32, u64)]| {
        let mut ob = fresh();
        let mut all_trades = Vec::new();
        for &(id, side, price, volume) in commands {
            all_trades.extend(ob.place_order(id, 0, side, price, volume));
        }
        (all_trades, ob.best_buy(), ob.best_sell())
    };

    let (trades_a, best_buy_a, best_sell_a) = replay(&commands);
    let (trades_b, best_buy_b, best_sell_b) = replay(&commands);

    assert_eq!(trades_a, trades_b);
    assert_eq!(best_buy_a, best_buy_b);
    assert_eq!(best_sell_a, best_sell_b);
}

#[test]
fn order_status_conflates_deleted_and_unknown() {
    let mut ob = fresh();
    ob.place_order(1, 0, Side::Buy, 100, 10);
    ob.delete_order(1);
    assert_eq!(ob.order_status(1), OrderStatus::Deleted);
    assert_eq!(ob.order_status(404), OrderStatus::Deleted);
}

#[test]
fn csv_command_stream_round_trips_through_the_book() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "op,id,side,price,volume").unwrap();
    writeln!(input, "PLACE,1,1,50,10").unwrap();
    writeln!(input, "PLACE,2,0,50,10").unwrap();
    writeln!(input, "PLACE,3,0,40,5").unwrap();
    writeln!(input, "DELETE,3").unwrap();

    let commands = ingest::read_commands(input.path()).unwrap();
    let mut ob = fresh();
    for command in &commands {
        match *command {
            ingest::Command::Place { id, side, price, volume } => {
                ob.place_order(id, 0, side, price, volume);
            }
            ingest::Command::Delete { id } => ob.delete_order(id),
        }
    }

    assert_eq!(ob.best_buy(), 0);
    assert_eq!(ob.best_sell(), 0);

    let output = tempfile::NamedTempFile::new().unwrap();
    ingest::write_book_dump(output.path(), &ob).unwrap();
    let dump = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(dump.trim(), "Price Limit,Side,Volume");
}
