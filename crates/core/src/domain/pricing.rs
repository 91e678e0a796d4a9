use crate::domain::instrument::{Instrument, PerMetal};
use crate::error::AdvisorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PREMIUM_MIN_PERCENT: f64 = 0.0;
pub const PREMIUM_MAX_PERCENT: f64 = 5.0;
pub const PREMIUM_STEP_PERCENT: f64 = 0.5;

/// Spot price adjusted by tax, then by dealer premium. No rounding happens here.
pub fn landed_cost(spot_price_per_unit: f64, tax_rate_percent: f64, premium_percent: f64) -> f64 {
    let taxed = spot_price_per_unit * (1.0 + tax_rate_percent / 100.0);
    taxed * (1.0 + premium_percent / 100.0)
}

/// Dealer premium selected by the user: [0, 5] in 0.5 steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Premium(f64);

impl Premium {
    pub const ZERO: Premium = Premium(0.0);

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Premium {
    type Error = AdvisorError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(PREMIUM_MIN_PERCENT..=PREMIUM_MAX_PERCENT).contains(&value) {
            return Err(AdvisorError::Parse {
                what: "premium",
                detail: format!(
                    "{value} is outside [{PREMIUM_MIN_PERCENT}, {PREMIUM_MAX_PERCENT}]"
                ),
            });
        }
        let steps = value / PREMIUM_STEP_PERCENT;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(AdvisorError::Parse {
                what: "premium",
                detail: format!("{value} is not a multiple of {PREMIUM_STEP_PERCENT}"),
            });
        }
        Ok(Premium(steps.round() * PREMIUM_STEP_PERCENT))
    }
}

impl From<Premium> for f64 {
    fn from(p: Premium) -> f64 {
        p.0
    }
}

impl FromStr for Premium {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().trim_end_matches('%');
        let value = raw.parse::<f64>().map_err(|e| AdvisorError::Parse {
            what: "premium",
            detail: format!("{s:?}: {e}"),
        })?;
        Premium::try_from(value)
    }
}

impl fmt::Display for Premium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotQuote {
    pub instrument: Instrument,
    pub price_per_gram: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandedPrice {
    pub instrument: Instrument,
    pub unit_quantity: f64,
    pub tax_rate_percent: f64,
    pub premium_percent: f64,
    pub currency: String,
    pub value: f64,
}

impl LandedPrice {
    /// Scales the quote to the instrument's retail unit and applies tax and premium.
    pub fn from_quote(quote: &SpotQuote, tax_rate_percent: f64, premium: Premium) -> Self {
        let unit_quantity = quote.instrument.retail_unit_grams();
        let spot_per_unit = quote.price_per_gram * unit_quantity;
        Self {
            instrument: quote.instrument,
            unit_quantity,
            tax_rate_percent,
            premium_percent: premium.percent(),
            currency: quote.currency.clone(),
            value: landed_cost(spot_per_unit, tax_rate_percent, premium.percent()),
        }
    }
}

/// Result of one successful market-data fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetalPrices {
    pub spot: PerMetal<SpotQuote>,
    pub landed: PerMetal<LandedPrice>,
}

impl MetalPrices {
    pub fn from_quotes(spot: PerMetal<SpotQuote>, tax_rate_percent: f64, premium: Premium) -> Self {
        let landed = PerMetal::from_fn(|i| {
            LandedPrice::from_quote(spot.get(i), tax_rate_percent, premium)
        });
        Self { spot, landed }
    }
}
