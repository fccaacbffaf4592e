//! Market data: provider trait, Yahoo Finance client, business-day alignment.

pub mod align;
pub mod provider;
pub mod yahoo;

pub use align::{business_days, is_business_day, AlignedSeries};
pub use provider::{DataError, DataProvider};
pub use yahoo::YahooProvider;
