pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod pipeline;
pub mod trend;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_GOLD_API_BASE_URL: &str = "https://www.goldapi.io/api";
    pub const DEFAULT_HISTORY_BASE_URL: &str = "https://query1.finance.yahoo.com";
    pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
    pub const DEFAULT_LLM_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
    pub const DEFAULT_LLM_MAX_TOKENS: u32 = 80;
    pub const DEFAULT_QUOTE_CURRENCY: &str = "INR";
    pub const DEFAULT_TAX_RATE_PERCENT: f64 = 9.2;
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
    pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub gold_api_key: Option<String>,
        pub gold_api_base_url: String,
        pub quote_currency: String,
        pub tax_rate_percent: f64,
        pub history_base_url: String,
        pub http_timeout_secs: u64,
        pub openrouter_api_key: Option<String>,
        pub llm_base_url: String,
        pub llm_model: String,
        pub llm_max_tokens: u32,
        pub llm_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                gold_api_key: None,
                gold_api_base_url: DEFAULT_GOLD_API_BASE_URL.to_string(),
                quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
                tax_rate_percent: DEFAULT_TAX_RATE_PERCENT,
                history_base_url: DEFAULT_HISTORY_BASE_URL.to_string(),
                http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                openrouter_api_key: None,
                llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
                llm_model: DEFAULT_LLM_MODEL.to_string(),
                llm_max_tokens: DEFAULT_LLM_MAX_TOKENS,
                llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from `lookup`. Blank values are treated as unset and
        /// unparseable numbers fall back to the defaults.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let defaults = Self::default();
            let var = |key: &str| {
                lookup(key)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            };

            Ok(Self {
                gold_api_key: var("GOLD_API_KEY"),
                gold_api_base_url: var("GOLD_API_BASE_URL").unwrap_or(defaults.gold_api_base_url),
                quote_currency: var("QUOTE_CURRENCY")
                    .map(|s| s.to_ascii_uppercase())
                    .unwrap_or(defaults.quote_currency),
                tax_rate_percent: parsed(var("TAX_RATE_PERCENT"))
                    .filter(|v: &f64| v.is_finite() && *v >= 0.0)
                    .unwrap_or(defaults.tax_rate_percent),
                history_base_url: var("HISTORY_BASE_URL").unwrap_or(defaults.history_base_url),
                http_timeout_secs: parsed(var("HTTP_TIMEOUT_SECS"))
                    .unwrap_or(defaults.http_timeout_secs),
                openrouter_api_key: var("OPENROUTER_API_KEY"),
                llm_base_url: var("LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
                llm_model: var("LLM_MODEL").unwrap_or(defaults.llm_model),
                llm_max_tokens: parsed(var("LLM_MAX_TOKENS")).unwrap_or(defaults.llm_max_tokens),
                llm_timeout_secs: parsed(var("LLM_TIMEOUT_SECS"))
                    .unwrap_or(defaults.llm_timeout_secs),
                sentry_dsn: var("SENTRY_DSN"),
            })
        }

        pub fn require_gold_api_key(&self) -> anyhow::Result<&str> {
            self.gold_api_key
                .as_deref()
                .context("GOLD_API_KEY is required")
        }

        pub fn require_openrouter_api_key(&self) -> anyhow::Result<&str> {
            self.openrouter_api_key
                .as_deref()
                .context("OPENROUTER_API_KEY is required")
        }
    }

    fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
        value.and_then(|s| s.parse::<T>().ok())
    }

}
