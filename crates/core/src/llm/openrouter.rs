use crate::config::Settings;
use crate::error::AdvisorError;
use crate::llm::LlmClient;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "openrouter";

/// Chat-completions client for OpenRouter and other OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenRouterClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openrouter_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.llm_timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings.llm_base_url.clone(),
            model: settings.llm_model.clone(),
            max_tokens: settings.llm_max_tokens,
        })
    }

    async fn create_completion(
        &self,
        req: &ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse, AdvisorError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(req)
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

        serde_json::from_str::<ChatCompletionResponse>(&text).map_err(|e| {
            AdvisorError::Provider {
                provider: PROVIDER,
                stage: "decode",
                status: Some(status.as_u16()),
                detail: format!("failed to decode chat completion: {e}"),
                raw_body: Some(text),
            }
        })
    }

    fn response_text(res: ChatCompletionResponse) -> Result<String, AdvisorError> {
        // Some gateways report upstream failures as HTTP 200 with an error object.
        if let Some(err) = res.error {
            return Err(AdvisorError::Provider {
                provider: PROVIDER,
                stage: "upstream",
                status: err.code,
                detail: err.message,
                raw_body: None,
            });
        }

        let choice = res
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AdvisorError::Provider {
                provider: PROVIDER,
                stage: "decode",
                status: None,
                detail: "completion has no choices".to_string(),
                raw_body: None,
            })?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenRouterClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let res = self.create_completion(&req).await?;
        let text = Self::response_text(res)?;
        tracing::debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,

    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,

    #[serde(default)]
    code: Option<u16>,
}
