//! Business-day alignment.
//!
//! Reindexes a sparse trading calendar onto a dense Mon–Fri axis. Exchange
//! holidays become void bars (all-NaN prices); nothing is forward- or
//! back-filled. Weekends are not part of the axis at all.

use crate::domain::PriceBar;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashMap;

/// Returns true for Mon–Fri.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every business day in `[start, end]`, ascending.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        if is_business_day(day) {
            days.push(day);
        }
        day += Duration::days(1);
    }
    days
}

/// One symbol's bars on a dense business-day axis.
///
/// Exactly one bar per business day between the first and last fetched
/// trading date; void bars fill the holiday gaps.
#[derive(Debug)]
pub struct AlignedSeries {
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl AlignedSeries {
    /// Reindex raw bars onto the business-day axis spanning their date range.
    ///
    /// Raw bars falling on weekends (Yahoo has shipped these) are dropped.
    /// An empty input produces an empty series.
    pub fn align(symbol: impl Into<String>, mut raw: Vec<PriceBar>) -> Self {
        let symbol = symbol.into();

        raw.retain(|bar| is_business_day(bar.date));
        raw.sort_by_key(|bar| bar.date);

        let Some((first, last)) = raw.first().zip(raw.last()).map(|(f, l)| (f.date, l.date))
        else {
            return Self {
                symbol,
                bars: Vec::new(),
            };
        };

        let by_date: HashMap<NaiveDate, PriceBar> =
            raw.into_iter().map(|bar| (bar.date, bar)).collect();

        let bars = business_days(first, last)
            .into_iter()
            .map(|date| {
                by_date
                    .get(&date)
                    .cloned()
                    .unwrap_or_else(|| PriceBar::void(date))
            })
            .collect();

        Self { symbol, bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Index of `date` on the axis, if it is part of the axis at all
    /// (weekends and out-of-range dates are not).
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |bar| bar.date).ok()
    }

    /// True when `date` is on the axis and the market traded that day.
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        self.position(date)
            .is_some_and(|idx| !self.bars[idx].is_void())
    }
}
