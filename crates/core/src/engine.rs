use crate::domain::instrument::Instrument;
use crate::domain::pricing::MetalPrices;
use crate::domain::recommendation::RecommendationSet;
use crate::domain::signal::TrendReport;
use crate::error::AdvisorError;
use crate::llm::reply::{self, reason_key, verdict_key};
use crate::llm::LlmClient;

pub fn build_prompt(prices: &MetalPrices, trends: &TrendReport) -> String {
    let mut market = String::new();
    for instrument in Instrument::ALL {
        let landed = prices.landed.get(instrument);
        let signal = trends.signals.get(instrument);
        market.push_str(&format!(
            "- {}: {:.0} (Trend: {}, RSI: {:.0})\n",
            instrument, landed.value, signal.direction, signal.rsi
        ));
    }

    let mut template = String::new();
    for instrument in Instrument::ALL {
        template.push_str(&format!("{} [BUY/WAIT/SELL]\n", verdict_key(instrument)));
        template.push_str(&format!("{} [Reason here]\n", reason_key(instrument)));
    }

    format!(
        "Market Data:\n{market}\n\
Task: Give a 1-word recommendation (BUY, SELL, or WAIT) and a 1-sentence reason.\n\n\
Reply exactly like this:\n{template}"
    )
}

/// Asks the model for a verdict per metal.
///
/// `Err` only for transport/API failures. Malformed replies never fail;
/// unparsed fields fall back to WAIT / "Market Uncertain".
pub async fn recommend(
    client: &dyn LlmClient,
    prices: &MetalPrices,
    trends: &TrendReport,
) -> Result<RecommendationSet, AdvisorError> {
    let prompt = build_prompt(prices, trends);
    let raw_reply = client.complete(&prompt).await?;

    let parsed = reply::scan_reply(&raw_reply);
    let recommendations = reply::fill_defaults(&parsed);

    for (instrument, rec) in recommendations.iter() {
        if rec.defaulted {
            tracing::warn!(
                %instrument,
                verdict = %rec.verdict,
                model = client.model(),
                "recommendation reply incomplete; defaults applied"
            );
        }
    }

    Ok(RecommendationSet {
        recommendations,
        model: client.model().to_string(),
        raw_reply,
    })
}
