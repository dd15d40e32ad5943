//! A FIFO queue of resting orders at one price, realized as an intrusive
//! doubly-linked list over stable pool indices.
//!
//! The queue never touches the heap per insert/remove: linking is just
//! writing a couple of `Option<usize>` fields on the pooled orders.

use crate::order::Order;
use crate::pool::Pool;
use crate::trade::{Trade, Trades};
use crate::types::OrderStatus;

pub struct Limit {
    pub price: u32,
    pub length: u64,
    pub total_volume: u64,
    head: Option<usize>,
    tail: Option<usize>,
}

impl Limit {
    pub fn new(price: u32) -> Self {
        Self { price, length: 0, total_volume: 0, head: None, tail: None }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends the order at `idx` to the tail of the queue.
    ///
    /// The caller must ensure `idx` is not already linked anywhere
    /// (`prev == next == None`) and that the order is `Active`.
    pub fn insert_order(&mut self, orders: &mut Pool<Order>, idx: usize) {
        let volume = orders.get(idx).volume;
        match self.tail {
            None => {
                self.head = Some(idx);
                self.tail = Some(idx);
            }
            Some(tail_idx) => {
                orders.get_mut(tail_idx).next = Some(idx);
                orders.get_mut(idx).prev = Some(tail_idx);
                self.tail = Some(idx);
            }
        }
        self.length += 1;
        self.total_volume += volume;
    }

    /// Unlinks the order at `idx` from the queue. One of four cases: sole
    /// member, head, tail, or interior — each touches only the two
    /// neighboring pointers.
    ///
    /// The caller must ensure `idx` is currently linked in this queue.
    pub fn delete_order(&mut self, orders: &mut Pool<Order>, idx: usize) {
        let (prev, next) = {
            let o = orders.get(idx);
            (o.prev, o.next)
        };

        match (prev, next) {
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
            (None, Some(next_idx)) => {
                orders.get_mut(next_idx).prev = None;
                self.head = Some(next_idx);
            }
            (Some(prev_idx), None) => {
                orders.get_mut(prev_idx).next = None;
                self.tail = Some(prev_idx);
            }
            (Some(prev_idx), Some(next_idx)) => {
                orders.get_mut(prev_idx).next = Some(next_idx);
                orders.get_mut(next_idx).prev = Some(prev_idx);
            }
        }

        let o = orders.get_mut(idx);
        let residual = o.volume;
        o.prev = None;
        o.next = None;
        if o.status != OrderStatus::Fulfilled {
            o.status = OrderStatus::Deleted;
        }

        self.length -= 1;
        self.total_volume -= residual;
    }

    /// Consumes resting orders from the head while the queue is non-empty
    /// and `incoming` is not yet fulfilled, filling both sides on each
    /// iteration. Orders that become fulfilled are unlinked but not freed —
    /// the caller (the book) owns their pool slots.
    ///
    /// Returns the trades in the order the fills occurred.
    pub fn match_order(&mut self, orders: &mut Pool<Order>, incoming_idx: usize) -> Trades {
        let mut trades = Vec::new();

        while !self.is_empty() && !orders.get(incoming_idx).is_fulfilled() {
            let head_idx = self.head.expect("length > 0 implies a head");

            let fill = {
                let head_volume = orders.get(head_idx).volume;
                let incoming_volume = orders.get(incoming_idx).volume;
                head_volume.min(incoming_volume)
            };

            orders.get_mut(head_idx).fill(fill);
            orders.get_mut(incoming_idx).fill(fill);
            self.total_volume -= fill;

            trades.push(Trade {
                aggressor_id: orders.get(incoming_idx).id,
                matched_id: orders.get(head_idx).id,
                price: self.price,
                volume: fill,
            });

            if orders.get(head_idx).is_fulfilled() {
                self.delete_order(orders, head_idx);
            }
        }

        trades
    }
}
