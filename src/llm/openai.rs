use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use crate::config::LlmConfig;
use crate::llm::{
    models::{ChatCall, ChatRequest, SamplingOptions},
    LlmError, LlmProvider,
};

/// Longest slice of an error body carried in `LlmError::Api`.
const BODY_SNIPPET_CHARS: usize = 500;
const PREVIEW_CHARS: usize = 200;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    sampling: SamplingOptions,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        sampling: SamplingOptions,
        verify_tls: bool,
    ) -> Result<Self, LlmError> {
        if !verify_tls {
            warn!(
                "TLS certificate verification is DISABLED for {}; responses can be intercepted",
                base_url
            );
        }

        let client = Client::builder()
            .user_agent(concat!("solcopilot/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            sampling,
        })
    }

    pub fn from_config(cfg: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(
            cfg.api_key.clone(),
            cfg.base_url.clone(),
            SamplingOptions {
                model: cfg.model.clone(),
                temperature: cfg.temperature,
                max_tokens: cfg.max_tokens,
            },
            cfg.verify_tls,
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, call: &ChatCall) -> Result<String, LlmError> {
        if call.user_prompt.trim().is_empty() {
            return Err(LlmError::InvalidRequest("user prompt is empty".to_string()));
        }

        let endpoint = self.endpoint();
        info!(
            endpoint = %endpoint,
            model = %self.sampling.model,
            system_len = call.system_prompt.len(),
            user_len = call.user_prompt.len(),
            timeout_secs = call.timeout.as_secs(),
            "Sending chat completion request"
        );

        let body = ChatRequest::from_call(call, &self.sampling);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .timeout(call.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                if e.is_timeout() {
                    LlmError::Network(format!("request timed out after {}s", call.timeout.as_secs()))
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            error!("Chat completion returned {}: {}", status, snippet(&text));
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: snippet(&text),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("undecodable body: {}", e)))?;

        let content = extract_content(&json)?;
        info!(response_len = content.len(), "Chat completion succeeded");
        debug!("Response preview: {}", preview(&content));

        Ok(content)
    }
}

/// Pulls `choices[0].message.content` out of a completion body.
pub fn extract_content(json: &serde_json::Value) -> Result<String, LlmError> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            LlmError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

fn snippet(text: &str) -> String {
    text.chars().take(BODY_SNIPPET_CHARS).collect()
}

fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head
    }
}
