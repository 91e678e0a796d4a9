use crate::config::Settings;
use crate::error::AdvisorError;
use anyhow::Context;
use serde_json::Value;
use std::time::Duration;

const PROVIDER: &str = "yahoo_spark";
const SPARK_PATH: &str = "/v7/finance/spark";
const RANGE: &str = "1mo";
const INTERVAL: &str = "1d";
const USER_AGENT: &str = concat!("goldluck/", env!("CARGO_PKG_VERSION"));

#[async_trait::async_trait]
pub trait HistoryProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// One batch query for all `symbols` over ~1 month of daily bars.
    ///
    /// Returns the raw body; its shape varies, see `ingest::shapes`.
    async fn fetch_daily_closes(&self, symbols: &[&str]) -> Result<Value, AdvisorError>;
}

#[derive(Debug, Clone)]
pub struct YahooSparkClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooSparkClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build history http client")?;

        Ok(Self {
            http,
            base_url: settings.history_base_url.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SPARK_PATH)
    }
}

#[async_trait::async_trait]
impl HistoryProvider for YahooSparkClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_daily_closes(&self, symbols: &[&str]) -> Result<Value, AdvisorError> {
        let joined = symbols.join(",");
        let res = self
            .http
            .get(self.url())
            .query(&[
                ("symbols", joined.as_str()),
                ("range", RANGE),
                ("interval", INTERVAL),
            ])
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

        serde_json::from_str::<Value>(&text).map_err(|e| AdvisorError::Provider {
            provider: PROVIDER,
            stage: "decode",
            status: Some(status.as_u16()),
            detail: format!("response is not valid JSON: {e}"),
            raw_body: Some(text),
        })
    }
}
