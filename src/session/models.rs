use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::pipeline::{PipelineTrace, TurnOutcome};

const RECENT_WINDOW: usize = 5;
const TOPIC_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
    pub recent_topics: Vec<String>,
}

/// One user's conversation. History only grows, one user/assistant pair per
/// turn, until [`ChatSession::clear`] empties it.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    messages: Vec<ChatMessage>,
    last_trace: Option<PipelineTrace>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            messages: Vec::new(),
            last_trace: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_trace(&self) -> Option<&PipelineTrace> {
        self.last_trace.as_ref()
    }

    pub fn record_turn(&mut self, user_input: &str, outcome: TurnOutcome) {
        self.messages.push(ChatMessage::new(ChatRole::User, user_input));
        self.messages
            .push(ChatMessage::new(ChatRole::Assistant, outcome.reply));
        self.last_trace = outcome.trace;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_trace = None;
    }

    pub fn summary(&self) -> SessionSummary {
        let start = self.messages.len().saturating_sub(RECENT_WINDOW);
        let recent_topics = self.messages[start..]
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| topic(&m.content))
            .collect();

        SessionSummary {
            id: self.id,
            created_at: self.created_at,
            message_count: self.messages.len(),
            recent_topics,
        }
    }

    /// Plain-text transcript for download.
    pub fn transcript(&self) -> String {
        let mut export = String::new();
        export.push_str(&format!("Session: {}\n", self.id));
        export.push_str(&format!("Created At: {}\n", self.created_at));
        export.push_str("---\n");

        for m in &self.messages {
            export.push_str(&format!(
                "[{}]: {}\n",
                m.role.to_string().to_uppercase(),
                m.content
            ));
            export.push_str("---\n");
        }
        export
    }
}

fn topic(content: &str) -> String {
    if content.chars().count() > TOPIC_CHARS {
        let head: String = content.chars().take(TOPIC_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}
