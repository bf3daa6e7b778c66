pub mod models;
pub mod openai;

use openai::OpenAiProvider;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use models::ChatCall;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection, TLS or timeout failure; no status was received.
    #[error("Network Error: {0}")]
    Network(String),
    #[error("API Error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Malformed Response: {0}")]
    MalformedResponse(String),
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// Failures of the request/response cycle itself, as opposed to a
    /// successful exchange with an unusable body.
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Api { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Runs one system+user exchange and returns the assistant text.
    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError>;
}

pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_default(config: &AppConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let provider = OpenAiProvider::from_config(&config.llm)?;
        Ok(Arc::new(provider))
    }
}
