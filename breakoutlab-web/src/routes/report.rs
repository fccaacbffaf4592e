//! Report routes: the request form and the report generation endpoint.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use breakoutlab_core::data::AlignedSeries;
use breakoutlab_core::detector::detect_breakouts;
use breakoutlab_core::domain::SellResolution;
use breakoutlab_core::report::{render_trades_csv, report_filename};
use breakoutlab_core::simulator::simulate_trades;

use crate::error::ApiError;
use crate::state::AppState;

/// Form fields for POST /generate_report/.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
    /// Percent of the 20-day average volume (150 ⇒ 150%).
    pub volume_threshold: f64,
    /// Minimum close-over-previous-close change, in percent.
    pub price_threshold: f64,
    /// Calendar days between buy and sell.
    pub holding_period: i64,
}

/// Validated request parameters.
#[derive(Debug, Clone, PartialEq)]
struct ReportParams {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
    volume_threshold: f64,
    price_threshold: f64,
    holding_period: i64,
}

const MAX_TICKER_LEN: usize = 12;

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("{field} must be YYYY-MM-DD, got '{value}'")))
}

fn validate(req: &ReportRequest) -> Result<ReportParams, ApiError> {
    let ticker = req.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(ApiError::BadRequest("ticker must not be empty".into()));
    }
    if ticker.len() > MAX_TICKER_LEN {
        return Err(ApiError::BadRequest(format!(
            "ticker must be at most {MAX_TICKER_LEN} characters"
        )));
    }
    if !ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(ApiError::BadRequest(
            "ticker contains unsupported characters".into(),
        ));
    }

    let start = parse_date("start_date", &req.start_date)?;
    let end = parse_date("end_date", &req.end_date)?;
    if start >= end {
        return Err(ApiError::BadRequest(
            "start_date must be before end_date".into(),
        ));
    }

    for (name, value) in [
        ("volume_threshold", req.volume_threshold),
        ("price_threshold", req.price_threshold),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "{name} must be a non-negative number"
            )));
        }
    }

    if req.holding_period < 1 {
        return Err(ApiError::BadRequest(
            "holding_period must be at least 1 day".into(),
        ));
    }

    Ok(ReportParams {
        ticker,
        start,
        end,
        volume_threshold: req.volume_threshold,
        price_threshold: req.price_threshold,
        holding_period: req.holding_period,
    })
}

/// Build the report sub-router.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(form_page))
        .route("/generate_report/", post(generate_report))
}

/// GET / — the request form.
async fn form_page() -> Html<&'static str> {
    Html(include_str!("../../templates/form.html"))
}

/// POST /generate_report/ — run the pipeline and stream back the CSV.
async fn generate_report(
    State(state): State<Arc<AppState>>,
    Form(req): Form<ReportRequest>,
) -> Result<Response, ApiError> {
    let params = validate(&req)?;

    // The fetch is the only blocking step; keep it off the async runtime.
    let provider = Arc::clone(&state.provider);
    let (ticker, start, end) = (params.ticker.clone(), params.start, params.end);
    let raw = tokio::task::spawn_blocking(move || provider.fetch(&ticker, start, end))
        .await
        .map_err(|e| ApiError::Internal(format!("fetch task failed: {e}")))??;

    if raw.is_empty() {
        return Err(ApiError::NoData);
    }

    let series = AlignedSeries::align(params.ticker.clone(), raw);
    let breakouts = detect_breakouts(&series, params.volume_threshold, params.price_threshold);
    let outcome = simulate_trades(&series, &breakouts, params.holding_period);

    for trade in &outcome.trades {
        if trade.resolution != SellResolution::Exact {
            tracing::debug!(
                ticker = %series.symbol,
                buy_date = %trade.buy_date,
                sell_date = %trade.sell_date,
                resolution = ?trade.resolution,
                "sell date shifted to nearest trading day"
            );
        }
    }
    for miss in &outcome.unresolved {
        tracing::warn!(
            ticker = %series.symbol,
            buy_date = %miss.buy_date,
            target = %miss.target_sell_date,
            "trade skipped: no trading day near target sell date"
        );
    }

    if outcome.trades.is_empty() {
        return Err(ApiError::NoBreakouts);
    }

    let csv_text = render_trades_csv(&outcome.trades)?;
    let body = spool_and_read(&state.config.spool_dir, &csv_text)?;

    tracing::info!(
        ticker = %series.symbol,
        start = %params.start,
        end = %params.end,
        trades = outcome.trades.len(),
        unresolved = outcome.unresolved.len(),
        "breakout report generated"
    );

    let filename = report_filename(&params.ticker);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| ApiError::Internal(format!("invalid download filename: {e}")))?,
    );

    Ok((headers, body).into_response())
}

/// Write the rendered report to a per-request spool file and read it back
/// for the response body. The file is removed when the handle drops, so no
/// artifact outlives its request.
fn spool_and_read(spool_dir: &Path, contents: &str) -> Result<Vec<u8>, ApiError> {
    let mut file = tempfile::NamedTempFile::new_in(spool_dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    let bytes = std::fs::read(file.path())?;
    Ok(bytes)
}
