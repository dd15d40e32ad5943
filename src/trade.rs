//! Value record of a single fill produced while matching an incoming order.

/// One match between an aggressor and a resting order.
///
/// `price` is always the resting side's price, never the aggressor's limit
/// price — the passive order sets the execution price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub aggressor_id: u64,
    pub matched_id: u64,
    pub price: u32,
    pub volume: u64,
}

/// Trades produced by a single `place_order` call, in fill order.
pub type Trades = Vec<Trade>;
