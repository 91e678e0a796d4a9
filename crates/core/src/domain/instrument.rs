use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instrument {
    Gold,
    Silver,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Gold, Instrument::Silver];

    /// ISO 4217-style metal code used by the spot-quote provider.
    pub fn spot_code(self) -> &'static str {
        match self {
            Instrument::Gold => "XAU",
            Instrument::Silver => "XAG",
        }
    }

    /// Front-month futures contract used as the history proxy.
    pub fn futures_symbol(self) -> &'static str {
        match self {
            Instrument::Gold => "GC=F",
            Instrument::Silver => "SI=F",
        }
    }

    /// Standard retail trading unit, in grams.
    pub fn retail_unit_grams(self) -> f64 {
        match self {
            Instrument::Gold => 10.0,
            Instrument::Silver => 1000.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Gold => "Gold",
            Instrument::Silver => "Silver",
        }
    }

    pub fn unit_label(self) -> &'static str {
        match self {
            Instrument::Gold => "10g",
            Instrument::Silver => "1kg",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per metal. Used wherever the pipeline produces a
/// gold/silver pair so that neither side can be forgotten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerMetal<T> {
    pub gold: T,
    pub silver: T,
}

impl<T> PerMetal<T> {
    pub fn new(gold: T, silver: T) -> Self {
        Self { gold, silver }
    }

    pub fn from_fn(mut f: impl FnMut(Instrument) -> T) -> Self {
        Self {
            gold: f(Instrument::Gold),
            silver: f(Instrument::Silver),
        }
    }

    pub fn get(&self, instrument: Instrument) -> &T {
        match instrument {
            Instrument::Gold => &self.gold,
            Instrument::Silver => &self.silver,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Instrument, T) -> U) -> PerMetal<U> {
        PerMetal {
            gold: f(Instrument::Gold, self.gold),
            silver: f(Instrument::Silver, self.silver),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Instrument, &T)> {
        [(Instrument::Gold, &self.gold), (Instrument::Silver, &self.silver)].into_iter()
    }
}
