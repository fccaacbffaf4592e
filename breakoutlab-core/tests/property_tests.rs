//! Property tests for the detection and simulation invariants.

use breakoutlab_core::data::{is_business_day, AlignedSeries};
use breakoutlab_core::detector::{
    detect_breakouts, price_change_pct, rolling_volume_mean, VOLUME_WINDOW,
};
use breakoutlab_core::domain::PriceBar;
use breakoutlab_core::simulator::simulate_trades;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn bars_from_series(closes: &[f64], volumes: &[u64]) -> Vec<PriceBar> {
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .zip(volumes)
        .map(|(&close, &volume)| {
            while !is_business_day(day) {
                day += Duration::days(1);
            }
            let bar = PriceBar {
                date: day,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume,
            };
            day += Duration::days(1);
            bar
        })
        .collect()
}

fn series_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<u64>)> {
    (25usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(50.0f64..150.0, n),
            prop::collection::vec(10u64..1000, n),
        )
    })
}

proptest! {
    /// Every emitted trade's buy day satisfies both breakout conditions.
    #[test]
    fn trades_only_on_breakout_days(
        (closes, volumes) in series_strategy(),
        volume_threshold in 50.0f64..300.0,
        price_threshold in 0.0f64..10.0,
        holding in 1i64..40,
    ) {
        let series = AlignedSeries::align("PROP", bars_from_series(&closes, &volumes));
        let breakouts = detect_breakouts(&series, volume_threshold, price_threshold);
        let outcome = simulate_trades(&series, &breakouts, holding);

        let bars = series.bars();
        let avg = rolling_volume_mean(bars, VOLUME_WINDOW);
        let change = price_change_pct(bars);

        for trade in &outcome.trades {
            let idx = series.position(trade.buy_date).expect("buy date on axis");
            prop_assert!(!bars[idx].is_void());
            prop_assert!((bars[idx].volume as f64) > volume_threshold / 100.0 * avg[idx]);
            prop_assert!(change[idx] >= price_threshold);
        }
    }

    /// The first 19 entries never flag, whatever the thresholds.
    #[test]
    fn warmup_window_never_flags(
        (closes, volumes) in series_strategy(),
        volume_threshold in 0.0f64..300.0,
    ) {
        let series = AlignedSeries::align("PROP", bars_from_series(&closes, &volumes));
        let breakouts = detect_breakouts(&series, volume_threshold, -100.0);
        prop_assert!(breakouts.iter().all(|b| b.index >= VOLUME_WINDOW - 1));
    }

    /// Sell dates are always trading days, and exact targets stay exact.
    #[test]
    fn sell_dates_are_trading_days(
        (closes, volumes) in series_strategy(),
        holding in 1i64..40,
    ) {
        let series = AlignedSeries::align("PROP", bars_from_series(&closes, &volumes));
        let breakouts = detect_breakouts(&series, 120.0, 1.0);
        let outcome = simulate_trades(&series, &breakouts, holding);

        for trade in &outcome.trades {
            prop_assert!(series.is_trading_day(trade.sell_date));

            let target = trade.buy_date + Duration::days(holding);
            if series.is_trading_day(target) {
                prop_assert_eq!(trade.sell_date, target);
            } else {
                prop_assert_ne!(trade.sell_date, target);
            }
        }
    }

    /// return_pct is exactly the close-to-close formula.
    #[test]
    fn return_formula_is_exact(
        (closes, volumes) in series_strategy(),
        holding in 1i64..40,
    ) {
        let series = AlignedSeries::align("PROP", bars_from_series(&closes, &volumes));
        let breakouts = detect_breakouts(&series, 120.0, 1.0);
        let outcome = simulate_trades(&series, &breakouts, holding);

        for trade in &outcome.trades {
            let expected = (trade.sell_price - trade.buy_price) / trade.buy_price * 100.0;
            prop_assert_eq!(trade.return_pct, expected);
        }
    }

    /// Every breakout becomes either a trade or an unresolved entry.
    #[test]
    fn no_breakout_is_silently_dropped(
        (closes, volumes) in series_strategy(),
        holding in 1i64..40,
    ) {
        let series = AlignedSeries::align("PROP", bars_from_series(&closes, &volumes));
        let breakouts = detect_breakouts(&series, 120.0, 1.0);
        let outcome = simulate_trades(&series, &breakouts, holding);
        prop_assert_eq!(outcome.trades.len() + outcome.unresolved.len(), breakouts.len());
    }
}
