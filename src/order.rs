//! A single order: immutable identity, mutable residual volume and status.
//!
//! An order carries no back-pointer to the [`Limit`](crate::limit::Limit)
//! it rests in; the book derives the limit from side + price when it needs
//! one. `prev`/`next` are only meaningful while the order is `Active` and
//! resting in a limit's intrusive queue.

use crate::types::{OrderStatus, Side};

#[derive(Debug, Clone)]
pub struct Order {
    pub id: u64,
    pub agent_id: u64,
    pub side: Side,
    pub price: u32,
    pub initial_volume: u64,
    pub volume: u64,
    pub status: OrderStatus,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl Order {
    pub fn new(id: u64, agent_id: u64, side: Side, price: u32, volume: u64) -> Self {
        Self {
            id,
            agent_id,
            side,
            price,
            initial_volume: volume,
            volume,
            status: OrderStatus::Active,
            prev: None,
            next: None,
        }
    }

    /// Reduces the residual volume by `amount`, marking the order
    /// `Fulfilled` once it reaches zero.
    ///
    /// Panics if `amount` is zero or exceeds the residual volume — this is
    /// a bug in the matching loop, not a condition callers recover from.
    pub fn fill(&mut self, amount: u64) {
        assert!(
            amount > 0 && amount <= self.volume,
            "fill({amount}) invalid for order {} with residual volume {}",
            self.id,
            self.volume
        );
        self.volume -= amount;
        if self.volume == 0 {
            self.status = OrderStatus::Fulfilled;
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        self.volume == 0
    }
}
