use crate::config::Settings;
use crate::domain::pricing::{MetalPrices, Premium};
use crate::domain::recommendation::RecommendationSet;
use crate::domain::signal::TrendReport;
use crate::engine;
use crate::error::AdvisorError;
use crate::ingest::history::{HistoryProvider, YahooSparkClient};
use crate::ingest::quotes::{self, GoldApiClient, SpotQuoteProvider};
use crate::llm::openrouter::OpenRouterClient;
use crate::llm::LlmClient;
use crate::trend;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything one trigger produces.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub generated_at: DateTime<Utc>,
    pub premium_percent: f64,
    pub prices: MetalPrices,
    pub trends: TrendReport,
    pub recommendation: RecommendationOutcome,
}

impl AdvisoryReport {
    pub fn warnings(&self) -> Vec<String> {
        self.trends.warning.iter().cloned().collect()
    }
}

/// Renderers must branch on this before reading verdicts.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Ready(RecommendationSet),
    Failed {
        error: String,
        raw_output: Option<String>,
    },
}

pub struct Advisor {
    quotes: Box<dyn SpotQuoteProvider>,
    history: Box<dyn HistoryProvider>,
    llm: Box<dyn LlmClient>,
    tax_rate_percent: f64,
}

impl Advisor {
    pub fn new(
        quotes: Box<dyn SpotQuoteProvider>,
        history: Box<dyn HistoryProvider>,
        llm: Box<dyn LlmClient>,
        tax_rate_percent: f64,
    ) -> Self {
        Self {
            quotes,
            history,
            llm,
            tax_rate_percent,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(GoldApiClient::from_settings(settings)?),
            Box::new(YahooSparkClient::from_settings(settings)?),
            Box::new(OpenRouterClient::from_settings(settings)?),
            settings.tax_rate_percent,
        ))
    }

    /// Prices abort the run on failure; trends degrade to neutral;
    /// a failed recommendation call is reported inside the report.
    pub async fn run(&self, premium: Premium) -> Result<AdvisoryReport, AdvisorError> {
        let prices = quotes::fetch_prices(&*self.quotes, self.tax_rate_percent, premium)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "price fetch failed; aborting run"))?;

        let trends = trend::fetch_trends(&*self.history).await;

        let recommendation = match engine::recommend(&*self.llm, &prices, &trends).await {
            Ok(set) => RecommendationOutcome::Ready(set),
            Err(err) => {
                tracing::error!(
                    provider = self.llm.provider_name(),
                    error = %err,
                    "recommendation request failed"
                );
                RecommendationOutcome::Failed {
                    raw_output: err.raw_body().map(str::to_string),
                    error: err.to_string(),
                }
            }
        };

        Ok(AdvisoryReport {
            generated_at: Utc::now(),
            premium_percent: premium.percent(),
            prices,
            trends,
            recommendation,
        })
    }
}
