//! Report rendering — the downloadable trade table.
//!
//! The emitter only renders; the "no data" / "no breakout days" branches are
//! the caller's responsibility, so an empty file can never reach a client.

use crate::domain::SimulatedTrade;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv flush error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render the trade table as CSV.
///
/// Columns: Buy_Date, Buy_Price, Sell_Date, Sell_Price, Return_Percentage.
/// Dates are `YYYY-MM-DD`; prices and returns carry six decimals.
pub fn render_trades_csv(trades: &[SimulatedTrade]) -> Result<String, ReportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "Buy_Date",
        "Buy_Price",
        "Sell_Date",
        "Sell_Price",
        "Return_Percentage",
    ])?;

    for trade in trades {
        wtr.write_record([
            trade.buy_date.to_string(),
            format!("{:.6}", trade.buy_price),
            trade.sell_date.to_string(),
            format!("{:.6}", trade.sell_price),
            format!("{:.6}", trade.return_pct),
        ])?;
    }

    let data = wtr.into_inner().map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

/// Download filename for a ticker's report.
pub fn report_filename(ticker: &str) -> String {
    format!("{ticker}_breakout_report.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SellResolution;
    use chrono::NaiveDate;

    fn trade(buy: &str, sell: &str, buy_price: f64, sell_price: f64) -> SimulatedTrade {
        SimulatedTrade {
            buy_date: NaiveDate::parse_from_str(buy, "%Y-%m-%d").unwrap(),
            buy_price,
            sell_date: NaiveDate::parse_from_str(sell, "%Y-%m-%d").unwrap(),
            sell_price,
            return_pct: SimulatedTrade::compute_return_pct(buy_price, sell_price),
            resolution: SellResolution::Exact,
        }
    }

    #[test]
    fn header_and_rows() {
        let trades = vec![
            trade("2024-02-07", "2024-02-14", 106.0, 112.36),
            trade("2024-03-04", "2024-03-14", 100.0, 95.0),
        ];
        let csv_text = render_trades_csv(&trades).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Buy_Date,Buy_Price,Sell_Date,Sell_Price,Return_Percentage"
        );
        assert!(lines[1].starts_with("2024-02-07,106.000000,2024-02-14,112.360000,"));
        assert!(lines[2].ends_with("-5.000000"));
    }

    #[test]
    fn empty_trades_render_header_only() {
        let csv_text = render_trades_csv(&[]).unwrap();
        assert_eq!(
            csv_text.trim_end(),
            "Buy_Date,Buy_Price,Sell_Date,Sell_Price,Return_Percentage"
        );
    }

    #[test]
    fn filename_is_ticker_derived() {
        assert_eq!(report_filename("AAPL"), "AAPL_breakout_report.csv");
    }
}
