//! End-to-end pipeline tests on synthetic bars:
//! align → detect → simulate → render.

use breakoutlab_core::data::{is_business_day, AlignedSeries};
use breakoutlab_core::detector::detect_breakouts;
use breakoutlab_core::domain::{PriceBar, SellResolution};
use breakoutlab_core::report::{render_trades_csv, report_filename};
use breakoutlab_core::simulator::simulate_trades;
use chrono::{Duration, NaiveDate};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Bars on consecutive business days from `start`. Each entry is
/// (close, volume); holidays are expressed by omitting the day from the
/// input and letting alignment fill the gap.
fn bars_from(start: &str, entries: &[(f64, u64)]) -> Vec<PriceBar> {
    let mut day = date(start);
    entries
        .iter()
        .map(|&(close, volume)| {
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

/// 40 business days of flat 100.0/100 with a +6%/5x-volume spike at index 27.
fn spiked_entries() -> Vec<(f64, u64)> {
    let mut entries = vec![(100.0, 100u64); 40];
    for entry in entries.iter_mut().skip(27) {
        entry.0 = 106.0;
    }
    entries[27].1 = 500;
    entries
}

#[test]
fn full_pipeline_produces_one_trade_and_csv() {
    let series = AlignedSeries::align("ACME", bars_from("2024-01-01", &spiked_entries()));

    let breakouts = detect_breakouts(&series, 150.0, 5.0);
    assert_eq!(breakouts.len(), 1);
    assert_eq!(breakouts[0].date, date("2024-02-07"));

    let outcome = simulate_trades(&series, &breakouts, 7);
    assert_eq!(outcome.trades.len(), 1);
    assert!(outcome.unresolved.is_empty());

    let trade = &outcome.trades[0];
    assert_eq!(trade.buy_date, date("2024-02-07"));
    assert_eq!(trade.sell_date, date("2024-02-14"));
    assert_eq!(trade.resolution, SellResolution::Exact);
    assert_eq!(trade.buy_price, 106.0);
    assert_eq!(trade.sell_price, 106.0);
    assert_eq!(trade.return_pct, 0.0);

    let csv_text = render_trades_csv(&outcome.trades).unwrap();
    let lines: Vec<&str> = csv_text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "Buy_Date,Buy_Price,Sell_Date,Sell_Price,Return_Percentage"
    );
    assert!(lines[1].starts_with("2024-02-07,106.000000,2024-02-14,106.000000,0.000000"));

    assert_eq!(report_filename(&series.symbol), "ACME_breakout_report.csv");
}

#[test]
fn flat_series_yields_no_trades() {
    let entries = vec![(100.0, 100u64); 40];
    let series = AlignedSeries::align("ACME", bars_from("2024-01-01", &entries));

    let breakouts = detect_breakouts(&series, 150.0, 5.0);
    assert!(breakouts.is_empty());

    let outcome = simulate_trades(&series, &breakouts, 10);
    assert!(outcome.trades.is_empty());
}

#[test]
fn holiday_gap_suppresses_nearby_windows_but_not_the_rest() {
    // A holiday at index 5 leaves the first 20-day windows that span it
    // undefined; a spike well past the gap still flags.
    let mut entries = vec![(100.0, 100u64); 45];
    entries[30] = (106.0, 500);
    for entry in entries.iter_mut().skip(31) {
        entry.0 = 106.0;
    }
    let mut bars = bars_from("2024-01-01", &entries);
    bars.remove(5); // becomes a void bar after alignment

    let series = AlignedSeries::align("ACME", bars);
    let breakouts = detect_breakouts(&series, 150.0, 5.0);

    assert_eq!(breakouts.len(), 1);
    // Index 30 keeps its position on the aligned axis: alignment
    // re-inserts the removed day as a void bar.
    assert_eq!(breakouts[0].index, 30);
}

#[test]
fn every_trade_sells_on_a_trading_day() {
    let series = AlignedSeries::align("ACME", bars_from("2024-01-01", &spiked_entries()));
    let breakouts = detect_breakouts(&series, 150.0, 5.0);

    for holding in [1, 3, 7, 10, 30, 60] {
        let outcome = simulate_trades(&series, &breakouts, holding);
        for trade in &outcome.trades {
            assert!(
                series.is_trading_day(trade.sell_date),
                "holding {holding}: sell date {} is not a trading day",
                trade.sell_date
            );
        }
    }
}
