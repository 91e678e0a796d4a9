pub mod indicators;

use crate::domain::instrument::{Instrument, PerMetal};
use crate::domain::signal::{PriceSeries, TrendReport};
use crate::ingest::history::HistoryProvider;
use crate::ingest::shapes::{self, ExtractError};

/// Fetches ~1 month of daily closes for both futures proxies and derives
/// a trend signal per metal.
///
/// Never fails: any retrieval or shape problem degrades the whole report to
/// neutral signals with a warning attached.
pub async fn fetch_trends(provider: &dyn HistoryProvider) -> TrendReport {
    let symbols = Instrument::ALL.map(Instrument::futures_symbol);

    let body = match provider.fetch_daily_closes(&symbols).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(
                provider = provider.provider_name(),
                error = %err,
                "trend data fetch failed; using neutral signals"
            );
            return TrendReport::neutral_with_warning(format!("Trend data error: {err}"));
        }
    };

    match extract_both(&body) {
        Ok(series) => TrendReport {
            signals: series.map(|instrument, s| indicators::analyze_series(instrument, &s)),
            warning: None,
        },
        Err(err) => {
            tracing::warn!(
                provider = provider.provider_name(),
                error = %err,
                "trend data has unrecognised shape; using neutral signals"
            );
            TrendReport::neutral_with_warning(format!("Trend data error: {err}"))
        }
    }
}

fn extract_both(body: &serde_json::Value) -> Result<PerMetal<PriceSeries>, ExtractError> {
    Ok(PerMetal::new(
        shapes::extract_series(body, Instrument::Gold.futures_symbol())?,
        shapes::extract_series(body, Instrument::Silver.futures_symbol())?,
    ))
}
