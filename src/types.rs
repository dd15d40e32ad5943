//! Shared small types used across the book, order and limit modules.

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

/// Lifecycle state of an [`Order`](crate::order::Order).
///
/// `Fulfilled` and `Deleted` are both terminal; an order never leaves either
/// state once it enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Active,
    Fulfilled,
    Deleted,
}
