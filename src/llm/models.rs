use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// One prompt pair handed to a provider.
#[derive(Debug, Clone)]
pub struct ChatCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub timeout: Duration,
}

impl ChatCall {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            timeout,
        }
    }
}

/// Sampling parameters fixed per provider instance.
#[derive(Debug, Clone)]
pub struct SamplingOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Wire body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl ChatRequest {
    pub fn from_call(call: &ChatCall, sampling: &SamplingOptions) -> Self {
        Self {
            model: sampling.model.clone(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: call.system_prompt.clone(),
                },
                Message {
                    role: Role::User,
                    content: call.user_prompt.clone(),
                },
            ],
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
            stream: false,
        }
    }
}
