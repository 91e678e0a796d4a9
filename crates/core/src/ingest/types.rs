use serde::Deserialize;

/// Spot-quote payload. Only `price_gram_24k` is relied on.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldApiQuote {
    #[serde(default)]
    pub price_gram_24k: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// `{ "GC=F": { "timestamp": [...], "close": [...] } }`
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolKeyedSeries {
    pub timestamp: Vec<i64>,
    pub close: Vec<Option<f64>>,
}

/// `{ "spark": { "result": [ { "symbol", "response": [chart] } ] } }`
#[derive(Debug, Clone, Deserialize)]
pub struct SparkEnvelope {
    pub spark: SparkBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparkBody {
    #[serde(default)]
    pub result: Vec<SparkResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SparkResult {
    pub symbol: String,
    #[serde(default)]
    pub response: Vec<ChartResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuote {
    pub close: Vec<Option<f64>>,
}
