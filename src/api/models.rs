use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineTrace;
use crate::session::ChatRole;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub role: ChatRole,
    pub content: String,
    /// Absent for single-call mode and for failed turns.
    pub steps: Option<PipelineTrace>,
}
