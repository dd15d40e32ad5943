//! Owns both sides of the book, routes `place_order`/`delete_order`, and
//! keeps the best-price cache in sync with the price-indexed maps.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::builder::OrderBookOptions;
use crate::limit::Limit;
use crate::order::Order;
use crate::pool::Pool;
use crate::trade::Trades;
use crate::types::{OrderStatus, Side};

pub struct OrderBook {
    symbol: String,
    orders: Pool<Order>,
    limits: Pool<Limit>,
    buy_limits: BTreeMap<u32, usize>,
    sell_limits: BTreeMap<u32, usize>,
    id_to_order: HashMap<u64, usize>,
    best_buy: u32,
    best_sell: u32,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>, options: OrderBookOptions) -> Self {
        Self {
            symbol: symbol.into(),
            orders: Pool::new(options.order_pool_capacity),
            limits: Pool::new(options.limit_pool_capacity),
            buy_limits: BTreeMap::new(),
            sell_limits: BTreeMap::new(),
            id_to_order: HashMap::new(),
            best_buy: 0,
            best_sell: 0,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Places a new limit order, matching it against the opposite side
    /// first and resting any residual volume.
    ///
    /// Rejects (returns no trades, changes nothing) a non-positive price,
    /// zero volume, or an `id` already resting in the book. Rejection is
    /// never fatal — it is a normal, logged outcome.
    pub fn place_order(
        &mut self,
        id: u64,
        agent_id: u64,
        side: Side,
        price: u32,
        volume: u64,
    ) -> Trades {
        if price == 0 || volume == 0 || self.id_to_order.contains_key(&id) {
            tracing::warn!(
                id,
                price,
                volume,
                duplicate = self.id_to_order.contains_key(&id),
                "rejecting place_order"
            );
            return Trades::new();
        }

        let incoming_idx = match self.orders.alloc(Order::new(id, agent_id, side, price, volume))
        {
            Ok(idx) => idx,
            Err(err) => panic!("order pool exhausted while placing order {id}: {err}"),
        };

        let mut trades = Trades::new();

        match side {
            Side::Buy => {
                while self.best_sell != 0
                    && price >= self.best_sell
                    && !self.orders.get(incoming_idx).is_fulfilled()
                {
                    let sweep_price = self.best_sell;
                    let limit_idx = *self
                        .sell_limits
                        .get(&sweep_price)
                        .expect("best_sell missing from sell_limits");
                    let fills =
                        self.limits.get_mut(limit_idx).match_order(&mut self.orders, incoming_idx);
                    self.reclaim_fulfilled(&fills);
                    trades.extend(fills);
                    if self.limits.get(limit_idx).is_empty() {
                        self.remove_limit(Side::Sell, sweep_price);
                    }
                }
            }
            Side::Sell => {
                while self.best_buy != 0
                    && price <= self.best_buy
                    && !self.orders.get(incoming_idx).is_fulfilled()
                {
                    let sweep_price = self.best_buy;
                    let limit_idx = *self
                        .buy_limits
                        .get(&sweep_price)
                        .expect("best_buy missing from buy_limits");
                    let fills =
                        self.limits.get_mut(limit_idx).match_order(&mut self.orders, incoming_idx);
                    self.reclaim_fulfilled(&fills);
                    trades.extend(fills);
                    if self.limits.get(limit_idx).is_empty() {
                        self.remove_limit(Side::Buy, sweep_price);
                    }
                }
            }
        }

        if self.orders.get(incoming_idx).is_fulfilled() {
            self.orders.free(incoming_idx);
        } else {
            self.id_to_order.insert(id, incoming_idx);
            let limit_idx = self.get_or_create_limit(side, price);
            self.limits.get_mut(limit_idx).insert_order(&mut self.orders, incoming_idx);
            self.extend_best_on_insert(side, price);
        }

        trades
    }

    /// Cancels a resting order. A no-op, silently, if `id` is unknown or
    /// already reclaimed by a prior match or cancel.
    pub fn delete_order(&mut self, id: u64) {
        let Some(&idx) = self.id_to_order.get(&id) else {
            return;
        };

        let (side, price, status) = {
            let o = self.orders.get(idx);
            (o.side, o.price, o.status)
        };
        if status != OrderStatus::Active {
            return;
        }

        let limit_idx = match side {
            Side::Buy => {
                *self.buy_limits.get(&price).expect("active buy order missing its price level")
            }
            Side::Sell => {
                *self.sell_limits.get(&price).expect("active sell order missing its price level")
            }
        };
        self.limits.get_mut(limit_idx).delete_order(&mut self.orders, idx);
        if self.limits.get(limit_idx).is_empty() {
            self.remove_limit(side, price);
        }

        self.id_to_order.remove(&id);
        self.orders.free(idx);
    }

    pub fn best_buy(&self) -> u32 {
        self.best_buy
    }

    pub fn best_sell(&self) -> u32 {
        self.best_sell
    }

    /// `best_sell - best_buy`, or `None` while either side is empty.
    pub fn spread(&self) -> Option<u32> {
        (self.best_buy != 0 && self.best_sell != 0).then(|| self.best_sell - self.best_buy)
    }

    /// `(best_sell + best_buy) / 2`, integer-truncated, or `None` while
    /// either side is empty.
    pub fn mid_price(&self) -> Option<u32> {
        (self.best_buy != 0 && self.best_sell != 0).then(|| (self.best_sell + self.best_buy) / 2)
    }

    /// `Active` if `id` is currently resting, `Deleted` otherwise.
    ///
    /// This conflates "was cancelled" with "was never seen" by design,
    /// matching the source contract this book is built from.
    pub fn order_status(&self, id: u64) -> OrderStatus {
        self.id_to_order
            .get(&id)
            .map(|&idx| self.orders.get(idx).status)
            .unwrap_or(OrderStatus::Deleted)
    }

    /// `(price, total_volume)` for every non-empty limit on `side`, in
    /// ascending price order.
    pub fn depth(&self, side: Side) -> Vec<(u32, u64)> {
        let map = match side {
            Side::Buy => &self.buy_limits,
            Side::Sell => &self.sell_limits,
        };
        map.iter().map(|(&price, &idx)| (price, self.limits.get(idx).total_volume)).collect()
    }

    fn get_or_create_limit(&mut self, side: Side, price: u32) -> usize {
        let existing = match side {
            Side::Buy => self.buy_limits.get(&price).copied(),
            Side::Sell => self.sell_limits.get(&price).copied(),
        };
        if let Some(idx) = existing {
            return idx;
        }

        let idx = match self.limits.alloc(Limit::new(price)) {
            Ok(idx) => idx,
            Err(err) => panic!("limit pool exhausted while opening level {price}: {err}"),
        };
        match side {
            Side::Buy => {
                self.buy_limits.insert(price, idx);
            }
            Side::Sell => {
                self.sell_limits.insert(price, idx);
            }
        }
        idx
    }

    fn remove_limit(&mut self, side: Side, price: u32) {
        let idx = match side {
            Side::Buy => self.buy_limits.remove(&price),
            Side::Sell => self.sell_limits.remove(&price),
        }
        .expect("remove_limit called for a price absent from its side map");
        self.limits.free(idx);

        match side {
            Side::Buy => {
                self.best_buy = self.buy_limits.keys().next_back().copied().unwrap_or(0);
            }
            Side::Sell => {
                self.best_sell = self.sell_limits.keys().next().copied().unwrap_or(0);
            }
        }
    }

    fn extend_best_on_insert(&mut self, side: Side, price: u32) {
        match side {
            Side::Buy => {
                if price > self.best_buy {
                    self.best_buy = price;
                }
            }
            Side::Sell => {
                if self.best_sell == 0 || price < self.best_sell {
                    self.best_sell = price;
                }
            }
        }
    }

    /// Reclaims pool slots for resting orders that a sweep just fulfilled.
    fn reclaim_fulfilled(&mut self, fills: &Trades) {
        for trade in fills {
            if let Some(&idx) = self.id_to_order.get(&trade.matched_id) {
                if self.orders.get(idx).is_fulfilled() {
                    self.id_to_order.remove(&trade.matched_id);
                    self.orders.free(idx);
                }
            }
        }
    }
}

impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OrderBook({})", self.symbol)?;
        writeln!(f, "  best_buy={} best_sell={}", self.best_buy, self.best_sell)?;
        for (price, volume) in self.depth(Side::Sell).into_iter().rev() {
            writeln!(f, "  SELL {price} -> {volume}")?;
        }
        for (price, volume) in self.depth(Side::Buy).into_iter().rev() {
            writeln!(f, "  BUY  {price} -> {volume}")?;
        }
        Ok(())
    }
}
