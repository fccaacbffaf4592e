//! SimulatedTrade — one hypothetical breakout round trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which path resolved the sell date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellResolution {
    /// Buy date + holding period landed on a trading day.
    Exact,
    /// Target was not a trading day; shifted forward to the next one.
    ForwardShifted,
    /// Forward search ran off the end of the series; shifted backward instead.
    BackwardShifted,
}

/// A hypothetical round trip: buy at a breakout day's close, sell at the
/// close of the resolved sell date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedTrade {
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub return_pct: f64,
    pub resolution: SellResolution,
}

impl SimulatedTrade {
    /// Percentage return between buy and sell close prices.
    pub fn compute_return_pct(buy_price: f64, sell_price: f64) -> f64 {
        (sell_price - buy_price) / buy_price * 100.0
    }

    pub fn is_winner(&self) -> bool {
        self.return_pct > 0.0
    }
}
