//! Breakout detection.
//!
//! A breakout day is one where volume exceeds the configured percentage of
//! the trailing 20-day average volume AND the close-over-previous-close
//! change meets the price threshold. Both thresholds are percentages
//! (volume_threshold 150 means 150% of the rolling average).
//!
//! Rolling windows are NaN-propagating: a window that contains a void
//! (holiday) bar has an undefined mean, so no breakout can be flagged there.

use crate::data::AlignedSeries;
use crate::domain::PriceBar;
use chrono::NaiveDate;

/// Trailing window for the average-volume baseline, in business days.
pub const VOLUME_WINDOW: usize = 20;

/// One flagged day, with the values that triggered it.
#[derive(Debug, Clone)]
pub struct Breakout {
    /// Index on the aligned axis.
    pub index: usize,
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    pub avg_volume: f64,
    pub price_change_pct: f64,
}

/// Rolling mean of volume over `window` entries.
///
/// The first `window - 1` entries and any window containing a void bar
/// yield NaN.
pub fn rolling_volume_mean(bars: &[PriceBar], window: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    // Initial window
    let mut sum = 0.0;
    let mut void_count = 0usize;
    for bar in bars.iter().take(window) {
        if bar.is_void() {
            void_count += 1;
        }
        sum += bar.volume as f64;
    }
    if void_count == 0 {
        result[window - 1] = sum / window as f64;
    }

    // Roll the window forward, tracking how many voids are inside it
    for i in window..n {
        let leaving = &bars[i - window];
        let entering = &bars[i];
        sum += entering.volume as f64 - leaving.volume as f64;
        if leaving.is_void() {
            void_count -= 1;
        }
        if entering.is_void() {
            void_count += 1;
        }
        if void_count == 0 {
            result[i] = sum / window as f64;
        }
    }

    result
}

/// Close-over-previous-close percentage change per entry.
///
/// NaN at index 0 (no prior close) and wherever either close belongs to a
/// void bar.
pub fn price_change_pct(bars: &[PriceBar]) -> Vec<f64> {
    let mut result = vec![f64::NAN; bars.len()];
    for i in 1..bars.len() {
        result[i] = (bars[i].close / bars[i - 1].close - 1.0) * 100.0;
    }
    result
}

/// Scan the aligned series for breakout days, in chronological order.
///
/// Volume comparison is strict (`>`), price comparison is inclusive (`>=`).
pub fn detect_breakouts(
    series: &AlignedSeries,
    volume_threshold: f64,
    price_threshold: f64,
) -> Vec<Breakout> {
    let bars = series.bars();
    let avg_volume = rolling_volume_mean(bars, VOLUME_WINDOW);
    let change = price_change_pct(bars);

    bars.iter()
        .enumerate()
        .filter_map(|(i, bar)| {
            if bar.is_void() || avg_volume[i].is_nan() || change[i].is_nan() {
                return None;
            }
            let volume_breakout = (bar.volume as f64) > volume_threshold / 100.0 * avg_volume[i];
            let price_breakout = change[i] >= price_threshold;
            (volume_breakout && price_breakout).then(|| Breakout {
                index: i,
                date: bar.date,
                close: bar.close,
                volume: bar.volume,
                avg_volume: avg_volume[i],
                price_change_pct: change[i],
            })
        })
        .collect()
}
