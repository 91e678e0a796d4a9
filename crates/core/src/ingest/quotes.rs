use crate::config::Settings;
use crate::domain::instrument::{Instrument, PerMetal};
use crate::domain::pricing::{MetalPrices, Premium, SpotQuote};
use crate::error::AdvisorError;
use crate::ingest::types::GoldApiQuote;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

const PROVIDER: &str = "goldapi";

#[async_trait::async_trait]
pub trait SpotQuoteProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Current 24k price per gram in the provider's configured currency.
    async fn fetch_quote(&self, instrument: Instrument) -> Result<SpotQuote, AdvisorError>;
}

#[derive(Debug, Clone)]
pub struct GoldApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    currency: String,
}

impl GoldApiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_gold_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .context("failed to build spot-quote http client")?;

        Ok(Self {
            http,
            base_url: settings.gold_api_base_url.clone(),
            api_key,
            currency: settings.quote_currency.clone(),
        })
    }

    fn url(&self, instrument: Instrument) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            instrument.spot_code(),
            self.currency
        )
    }

    fn headers(&self) -> Result<HeaderMap, AdvisorError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&self.api_key).map_err(|e| AdvisorError::Provider {
            provider: PROVIDER,
            stage: "request",
            status: None,
            detail: format!("access token is not a valid header value: {e}"),
            raw_body: None,
        })?;
        headers.insert("x-access-token", token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl SpotQuoteProvider for GoldApiClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_quote(&self, instrument: Instrument) -> Result<SpotQuote, AdvisorError> {
        let res = self
            .http
            .get(self.url(instrument))
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| AdvisorError::from_reqwest(PROVIDER, "http", e))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AdvisorError::from_reqwest(PROVIDER, "body", e))?;
        if !status.is_success() {
            return Err(AdvisorError::http_status(PROVIDER, "http", status, text));
        }

        let quote = serde_json::from_str::<GoldApiQuote>(&text).map_err(|e| {
            AdvisorError::Provider {
                provider: PROVIDER,
                stage: "decode",
                status: Some(status.as_u16()),
                detail: format!("response is not a quote object: {e}"),
                raw_body: Some(text.clone()),
            }
        })?;

        let price_per_gram = quote
            .price_gram_24k
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| AdvisorError::Provider {
                provider: PROVIDER,
                stage: "decode",
                status: Some(status.as_u16()),
                detail: "missing or non-positive price_gram_24k".to_string(),
                raw_body: Some(text.clone()),
            })?;

        Ok(SpotQuote {
            instrument,
            price_per_gram,
            currency: quote.currency.unwrap_or_else(|| self.currency.clone()),
        })
    }
}

/// Fetches both spot quotes concurrently and converts them to landed retail prices.
///
/// Either quote failing fails the whole fetch; the returned error names the
/// metal(s) that failed.
pub async fn fetch_prices(
    provider: &dyn SpotQuoteProvider,
    tax_rate_percent: f64,
    premium: Premium,
) -> Result<MetalPrices, AdvisorError> {
    let (gold, silver) = tokio::join!(
        provider.fetch_quote(Instrument::Gold),
        provider.fetch_quote(Instrument::Silver)
    );

    let spot = match (gold, silver) {
        (Ok(gold), Ok(silver)) => PerMetal::new(gold, silver),
        (Err(err), Ok(_)) => return Err(err.for_instrument(Instrument::Gold)),
        (Ok(_), Err(err)) => return Err(err.for_instrument(Instrument::Silver)),
        (Err(gold_err), Err(silver_err)) => {
            tracing::warn!(error = %silver_err, "silver quote failed alongside gold");
            return Err(gold_err.for_instrument(Instrument::Gold).also_failed(Instrument::Silver));
        }
    };

    let prices = MetalPrices::from_quotes(spot, tax_rate_percent, premium);
    for (instrument, landed) in prices.landed.iter() {
        tracing::info!(
            provider = provider.provider_name(),
            %instrument,
            unit_grams = landed.unit_quantity,
            landed = landed.value,
            premium = landed.premium_percent,
            "landed price computed"
        );
    }
    Ok(prices)
}
