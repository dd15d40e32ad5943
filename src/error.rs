//! The one fatal condition reachable from the core: pool exhaustion.
//!
//! Everything else the book rejects (bad price, zero volume, duplicate id,
//! unknown id on delete) is handled locally and never reaches here — see
//! [`OrderBook::place_order`](crate::book::OrderBook::place_order) and
//! [`OrderBook::delete_order`](crate::book::OrderBook::delete_order).

use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("pool exhausted: capacity {capacity} reached")]
pub struct PoolError {
    pub capacity: usize,
}
