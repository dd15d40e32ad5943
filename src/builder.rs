//! Builder for configuring and constructing an [`OrderBook`].
//!
//! # Example
//! ```
//! use limit_order_book::OrderBookBuilder;
//!
//! let ob = OrderBookBuilder::new("BTC-USD").build();
//! assert_eq!(ob.symbol(), "BTC-USD");
//! ```
use crate::book::OrderBook;

/// Pool-capacity knobs. `None` (the default) means unbounded — pool
/// exhaustion is then unreachable. A `Some(n)` cap makes exhaustion
/// reachable and testable, matching the fatal `OutOfMemory` path.
#[derive(Debug, Clone, Default)]
pub struct OrderBookOptions {
    pub order_pool_capacity: Option<usize>,
    pub limit_pool_capacity: Option<usize>,
}

/// A builder for constructing an [`OrderBook`] with custom options.
pub struct OrderBookBuilder {
    symbol: String,
    options: OrderBookOptions,
}

impl OrderBookBuilder {
    /// Creates a new builder instance for the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), options: OrderBookOptions::default() }
    }

    /// Sets all options in bulk via an [`OrderBookOptions`] struct.
    pub fn with_options(mut self, options: OrderBookOptions) -> Self {
        self.options = options;
        self
    }

    /// Caps the order pool at `capacity` live orders.
    pub fn with_order_pool_capacity(mut self, capacity: usize) -> Self {
        self.options.order_pool_capacity = Some(capacity);
        self
    }

    /// Caps the limit pool at `capacity` live price levels.
    pub fn with_limit_pool_capacity(mut self, capacity: usize) -> Self {
        self.options.limit_pool_capacity = Some(capacity);
        self
    }

    /// Builds and returns a fully configured [`OrderBook`] instance.
    pub fn build(self) -> OrderBook {
        OrderBook::new(self.symbol, self.options)
    }
}
