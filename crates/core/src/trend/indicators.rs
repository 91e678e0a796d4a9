use crate::domain::instrument::Instrument;
use crate::domain::signal::{Direction, PriceSeries, TrendSignal, NEUTRAL_RSI};
use crate::error::AdvisorError;

pub const SMA_PERIOD: usize = 5;
pub const RSI_PERIOD: usize = 14;
/// Below this many closes the whole signal is neutral.
pub const MIN_OBSERVATIONS: usize = SMA_PERIOD;

/// Mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Result<f64, AdvisorError> {
    if period == 0 || values.len() < period {
        return Err(AdvisorError::InsufficientData {
            needed: period.max(1),
            got: values.len(),
        });
    }
    let window = &values[values.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

/// RSI = 100 - 100 / (1 + avg_gain / avg_loss) over the last `period`
/// day-over-day changes, both averages simple means.
///
/// The first close has no previous day and counts as a zero change, so
/// `period` closes are enough. A window with no losses saturates at 100;
/// a flat window is neutral.
pub fn rsi(closes: &[f64], period: usize) -> Result<f64, AdvisorError> {
    if period == 0 || closes.len() < period {
        return Err(AdvisorError::InsufficientData {
            needed: period.max(1),
            got: closes.len(),
        });
    }

    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(closes.windows(2).map(|w| w[1] - w[0]))
        .collect();
    let (gains, losses) = changes[changes.len() - period..].iter().fold(
        (0.0_f64, 0.0_f64),
        |(g, l), &change| {
            if change > 0.0 {
                (g + change, l)
            } else {
                (g, l - change)
            }
        },
    );

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Ok(if avg_gain > 0.0 { 100.0 } else { NEUTRAL_RSI });
    }

    let relative_strength = avg_gain / avg_loss;
    let value = 100.0 - 100.0 / (1.0 + relative_strength);
    Ok(value.clamp(0.0, 100.0))
}

pub fn direction(closes: &[f64]) -> Result<Direction, AdvisorError> {
    let average = sma(closes, SMA_PERIOD)?;
    let latest = closes[closes.len() - 1];
    Ok(if latest > average {
        Direction::Up
    } else {
        Direction::Down
    })
}

pub fn analyze_series(instrument: Instrument, series: &PriceSeries) -> TrendSignal {
    let closes = series.closes();
    if closes.len() < MIN_OBSERVATIONS {
        tracing::debug!(%instrument, observations = closes.len(), "too few closes; neutral signal");
        return TrendSignal {
            observations: closes.len(),
            ..TrendSignal::neutral(instrument)
        };
    }

    let direction = direction(&closes).unwrap_or(Direction::Neutral);
    let rsi = rsi(&closes, RSI_PERIOD).unwrap_or_else(|err| {
        tracing::debug!(%instrument, error = %err, "RSI unavailable; using neutral value");
        NEUTRAL_RSI
    });

    TrendSignal {
        instrument,
        rsi,
        direction,
        observations: closes.len(),
    }
}
