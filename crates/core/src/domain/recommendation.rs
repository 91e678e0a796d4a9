use crate::domain::instrument::{Instrument, PerMetal};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_VERDICT: Verdict = Verdict::Wait;
pub const DEFAULT_REASON: &str = "Market Uncertain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Buy,
    Sell,
    Wait,
}

impl Verdict {
    /// Interprets model text by the earliest verdict word it contains, so
    /// decorated answers ("[BUY]", "BUY.") and hedged ones ("WAIT - no clear
    /// BUY signal") both resolve to what the model led with.
    pub fn from_reply_text(text: &str) -> Option<Verdict> {
        let upper = text.to_ascii_uppercase();
        [Verdict::Buy, Verdict::Sell, Verdict::Wait]
            .into_iter()
            .filter_map(|verdict| upper.find(verdict.as_str()).map(|at| (at, verdict)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, verdict)| verdict)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Buy => "BUY",
            Verdict::Sell => "SELL",
            Verdict::Wait => "WAIT",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub instrument: Instrument,
    pub verdict: Verdict,
    pub reason: String,
    /// True when either field came from the defaults rather than the model.
    pub defaulted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: PerMetal<Recommendation>,
    pub model: String,
    pub raw_reply: String,
}

impl RecommendationSet {
    pub fn get(&self, instrument: Instrument) -> &Recommendation {
        self.recommendations.get(instrument)
    }
}
