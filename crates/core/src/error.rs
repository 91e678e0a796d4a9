use crate::domain::instrument::Instrument;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AdvisorError {
    /// Transport-level failure: DNS, TLS, refused connection, timeout.
    #[error("{provider} connectivity error: {detail}")]
    Connectivity {
        provider: &'static str,
        detail: String,
    },

    /// The provider answered, but not with something usable.
    #[error("{provider} error (stage={stage}{}): {detail}", status_suffix(.status))]
    Provider {
        provider: &'static str,
        stage: &'static str,
        status: Option<u16>,
        detail: String,
        raw_body: Option<String>,
    },

    #[error("insufficient data: need {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("could not interpret {what}: {detail}")]
    Parse { what: &'static str, detail: String },
}

impl AdvisorError {
    pub fn from_reqwest(provider: &'static str, stage: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Self::Connectivity {
                provider,
                detail: err.to_string(),
            };
        }
        Self::Provider {
            provider,
            stage,
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
            raw_body: None,
        }
    }

    pub fn http_status(
        provider: &'static str,
        stage: &'static str,
        status: reqwest::StatusCode,
        body: String,
    ) -> Self {
        Self::Provider {
            provider,
            stage,
            status: Some(status.as_u16()),
            detail: format!("HTTP {status}"),
            raw_body: Some(body),
        }
    }

    /// Prefixes the detail with the metal the failing call was for.
    pub fn for_instrument(self, instrument: Instrument) -> Self {
        self.map_detail(|detail| format!("{instrument}: {detail}"))
    }

    pub fn also_failed(self, instrument: Instrument) -> Self {
        self.map_detail(|detail| format!("{detail} ({instrument} also failed)"))
    }

    fn map_detail(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Self::Connectivity { provider, detail } => Self::Connectivity {
                provider,
                detail: f(detail),
            },
            Self::Provider {
                provider,
                stage,
                status,
                detail,
                raw_body,
            } => Self::Provider {
                provider,
                stage,
                status,
                detail: f(detail),
                raw_body,
            },
            Self::Parse { what, detail } => Self::Parse {
                what,
                detail: f(detail),
            },
            other @ Self::InsufficientData { .. } => other,
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Provider { raw_body, .. } => raw_body.as_deref(),
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(", status={s}")).unwrap_or_default()
}
