//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the market-data source so the web
//! layer and tests can substitute an in-memory implementation.

use crate::domain::PriceBar;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for market-data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
///
/// Implementations handle the specifics of fetching daily bars from a
/// particular source. Fetching is blocking; async callers isolate it on a
/// blocking thread pool.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over a date range (inclusive).
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, DataError>;
}
