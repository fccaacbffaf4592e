//! Trade simulation.
//!
//! For each breakout day: buy at that day's close, sell `holding_period`
//! calendar days later, resolving the target to the nearest trading day
//! (forward first, then backward). A breakout whose target cannot be
//! resolved to any trading day becomes an explicit unresolved entry rather
//! than a failure.

use crate::data::AlignedSeries;
use crate::detector::Breakout;
use crate::domain::{SellResolution, SimulatedTrade};
use chrono::{Duration, NaiveDate};

/// A breakout whose sell date could not be resolved to any trading day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTrade {
    pub buy_date: NaiveDate,
    pub target_sell_date: NaiveDate,
}

/// All simulated trades for one request, plus the breakouts that could not
/// be turned into trades.
#[derive(Debug, Default)]
pub struct SimulationOutcome {
    pub trades: Vec<SimulatedTrade>,
    pub unresolved: Vec<UnresolvedTrade>,
}

/// Simulate one trade per breakout, in chronological order.
pub fn simulate_trades(
    series: &AlignedSeries,
    breakouts: &[Breakout],
    holding_period_days: i64,
) -> SimulationOutcome {
    let mut outcome = SimulationOutcome::default();

    for breakout in breakouts {
        let target = breakout.date + Duration::days(holding_period_days);
        match resolve_sell_date(series, target) {
            Some((idx, resolution)) => {
                let sell_bar = &series.bars()[idx];
                let return_pct =
                    SimulatedTrade::compute_return_pct(breakout.close, sell_bar.close);
                outcome.trades.push(SimulatedTrade {
                    buy_date: breakout.date,
                    buy_price: breakout.close,
                    sell_date: sell_bar.date,
                    sell_price: sell_bar.close,
                    return_pct,
                    resolution,
                });
            }
            None => outcome.unresolved.push(UnresolvedTrade {
                buy_date: breakout.date,
                target_sell_date: target,
            }),
        }
    }

    outcome
}

/// Resolve a target calendar date to a trading day on the series axis.
///
/// Exact when the target itself traded; otherwise the first trading day
/// after it; otherwise the last trading day before it. The resolved day is
/// never a void bar.
pub fn resolve_sell_date(
    series: &AlignedSeries,
    target: NaiveDate,
) -> Option<(usize, SellResolution)> {
    let bars = series.bars();

    // First axis entry with date >= target
    let start = bars.partition_point(|bar| bar.date < target);

    if let Some((offset, bar)) = bars[start..]
        .iter()
        .enumerate()
        .find(|(_, bar)| !bar.is_void())
    {
        let resolution = if bar.date == target {
            SellResolution::Exact
        } else {
            SellResolution::ForwardShifted
        };
        return Some((start + offset, resolution));
    }

    // Forward search ran off the end: last trading day before the target
    bars[..start]
        .iter()
        .rposition(|bar| !bar.is_void())
        .map(|idx| (idx, SellResolution::BackwardShifted))
}
