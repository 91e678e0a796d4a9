use crate::domain::instrument::{Instrument, PerMetal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NEUTRAL_RSI: f64 = 50.0;

/// Daily closes for one instrument, chronological with unique timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<(DateTime<Utc>, f64)>,
}

impl PriceSeries {
    /// Sorts by timestamp and collapses duplicates, keeping the last value seen.
    pub fn from_points(points: impl IntoIterator<Item = (DateTime<Utc>, f64)>) -> Self {
        let mut points: Vec<_> = points
            .into_iter()
            .filter(|(_, close)| close.is_finite() && *close > 0.0)
            .collect();
        // Stable sort keeps input order among equal timestamps.
        points.sort_by_key(|(ts, _)| *ts);

        let mut out: Vec<(DateTime<Utc>, f64)> = Vec::with_capacity(points.len());
        for (ts, close) in points {
            match out.last_mut() {
                Some(last) if last.0 == ts => last.1 = close,
                _ => out.push((ts, close)),
            }
        }
        Self { points: out }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|(_, c)| *c).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSignal {
    pub instrument: Instrument,
    /// In [0, 100]; `NEUTRAL_RSI` when there was not enough data.
    pub rsi: f64,
    pub direction: Direction,
    pub observations: usize,
}

impl TrendSignal {
    pub fn neutral(instrument: Instrument) -> Self {
        Self {
            instrument,
            rsi: NEUTRAL_RSI,
            direction: Direction::Neutral,
            observations: 0,
        }
    }
}

/// Output of one trend-analysis step. `warning` is set when the step
/// degraded to neutral defaults instead of aborting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub signals: PerMetal<TrendSignal>,
    pub warning: Option<String>,
}

impl TrendReport {
    pub fn neutral_with_warning(warning: impl Into<String>) -> Self {
        Self {
            signals: PerMetal::from_fn(TrendSignal::neutral),
            warning: Some(warning.into()),
        }
    }
}
