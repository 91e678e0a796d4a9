//! Extraction of a per-symbol close series from the history provider.
//!
//! The provider answers batch queries in one of two layouts depending on
//! endpoint version and parameters. Each layout is a `SeriesShape`; they
//! are tried in order and the first that recognises the symbol wins.

use crate::domain::signal::PriceSeries;
use crate::ingest::types::{SparkEnvelope, SymbolKeyedSeries};
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no series for {symbol} (tried shapes: {})", .tried.join(", "))]
    NotFound {
        symbol: String,
        tried: Vec<&'static str>,
    },
}

pub trait SeriesShape: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when the body does not have this shape or lacks `symbol`.
    fn extract(&self, body: &Value, symbol: &str) -> Option<PriceSeries>;
}

/// `{ "GC=F": { "timestamp": [..], "close": [..] }, .. }`
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolKeyedShape;

impl SeriesShape for SymbolKeyedShape {
    fn name(&self) -> &'static str {
        "symbol_keyed"
    }

    fn extract(&self, body: &Value, symbol: &str) -> Option<PriceSeries> {
        let entry = body.get(symbol)?;
        let series = serde_json::from_value::<SymbolKeyedSeries>(entry.clone()).ok()?;
        Some(zip_points(&series.timestamp, &series.close))
    }
}

/// `{ "spark": { "result": [ { "symbol": "GC=F", "response": [ { "timestamp": [..],
/// "indicators": { "quote": [ { "close": [..] } ] } } ] } ] } }`
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkEnvelopeShape;

impl SeriesShape for SparkEnvelopeShape {
    fn name(&self) -> &'static str {
        "spark_envelope"
    }

    fn extract(&self, body: &Value, symbol: &str) -> Option<PriceSeries> {
        let envelope = serde_json::from_value::<SparkEnvelope>(body.clone()).ok()?;
        let result = envelope
            .spark
            .result
            .into_iter()
            .find(|r| r.symbol == symbol)?;
        let chart = result.response.into_iter().next()?;
        let quote = chart.indicators.quote.into_iter().next()?;
        Some(zip_points(&chart.timestamp, &quote.close))
    }
}

pub const DEFAULT_SHAPES: [&dyn SeriesShape; 2] = [&SymbolKeyedShape, &SparkEnvelopeShape];

pub fn extract_series(body: &Value, symbol: &str) -> Result<PriceSeries, ExtractError> {
    extract_series_with(&DEFAULT_SHAPES, body, symbol)
}

pub fn extract_series_with(
    shapes: &[&dyn SeriesShape],
    body: &Value,
    symbol: &str,
) -> Result<PriceSeries, ExtractError> {
    for shape in shapes {
        if let Some(series) = shape.extract(body, symbol) {
            tracing::debug!(
                symbol,
                shape = shape.name(),
                points = series.closes().len(),
                "series extracted"
            );
            return Ok(series);
        }
    }
    Err(ExtractError::NotFound {
        symbol: symbol.to_string(),
        tried: shapes.iter().map(|s| s.name()).collect(),
    })
}

fn zip_points(timestamps: &[i64], closes: &[Option<f64>]) -> PriceSeries {
    PriceSeries::from_points(timestamps.iter().zip(closes).filter_map(|(ts, close)| {
        let ts = DateTime::<Utc>::from_timestamp(*ts, 0)?;
        Some((ts, (*close)?))
    }))
}
