//! The generate → improve → analyze-assumptions sequence.
//!
//! Steps run strictly in order, each on the previous step's output. A failure
//! in the first two steps replaces the whole reply with [`APOLOGY`]; a failure
//! in the analysis step only degrades the assumptions section.

pub mod report;

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{PipelineConfig, PipelineMode};
use crate::llm::{models::ChatCall, LlmError, LlmProvider};
use crate::prompts::{self, AssumptionsRecord};

pub use report::{assumptions_block, compose_reply, APOLOGY, COMPLETION_BANNER};

/// Intermediate artifacts of one three-call turn, for step-by-step display.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineTrace {
    pub user_input: String,
    pub primary_output: String,
    pub improved_output: String,
    pub assumptions: AssumptionsRecord,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub trace: Option<PipelineTrace>,
}

impl TurnOutcome {
    fn apology() -> Self {
        Self {
            reply: APOLOGY.to_string(),
            trace: None,
        }
    }
}

pub struct ResponseOrchestrator {
    provider: Arc<dyn LlmProvider>,
    settings: PipelineConfig,
}

impl ResponseOrchestrator {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: PipelineConfig) -> Self {
        Self { provider, settings }
    }

    pub fn mode(&self) -> PipelineMode {
        self.settings.mode
    }

    pub async fn respond(&self, user_input: &str) -> String {
        self.run_turn(user_input).await.reply
    }

    pub async fn run_turn(&self, user_input: &str) -> TurnOutcome {
        info!(
            provider = self.provider.name(),
            mode = ?self.settings.mode,
            input_len = user_input.len(),
            "Starting response generation"
        );

        let result = match self.settings.mode {
            PipelineMode::ThreeCall => self.three_call(user_input).await,
            PipelineMode::Single => self.single_call(user_input).await,
        };

        match result {
            Ok(outcome) => {
                info!(reply_len = outcome.reply.len(), "Response generation complete");
                outcome
            }
            Err(e) => {
                error!(transport = e.is_transport(), "Response generation failed: {}", e);
                TurnOutcome::apology()
            }
        }
    }

    async fn single_call(&self, user_input: &str) -> Result<TurnOutcome, LlmError> {
        let reply = self.generate(user_input).await?;
        Ok(TurnOutcome { reply, trace: None })
    }

    async fn three_call(&self, user_input: &str) -> Result<TurnOutcome, LlmError> {
        info!("Step 1: generating primary response");
        let primary_output = self.generate(user_input).await?;

        info!("Step 2: improving response with comprehensive review");
        let improved_output = self.improve(user_input, &primary_output).await?;

        info!("Step 3: extracting assumptions");
        let assumptions = match self.analyze(user_input, &improved_output).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Error extracting assumptions: {}", e);
                AssumptionsRecord::extraction_failure()
            }
        };

        let reply = compose_reply(&improved_output, &assumptions);
        Ok(TurnOutcome {
            reply,
            trace: Some(PipelineTrace {
                user_input: user_input.to_string(),
                primary_output,
                improved_output,
                assumptions,
            }),
        })
    }

    async fn generate(&self, user_input: &str) -> Result<String, LlmError> {
        let call = ChatCall::new(
            prompts::expert_system_prompt(),
            user_input,
            self.settings.generate_timeout(),
        );
        self.provider.complete(&call).await
    }

    async fn improve(&self, user_input: &str, primary_output: &str) -> Result<String, LlmError> {
        let call = ChatCall::new(
            prompts::REVIEWER_SYSTEM_PROMPT,
            prompts::improvement_prompt(user_input, primary_output),
            self.settings.improve_timeout(),
        );
        self.provider.complete(&call).await
    }

    async fn analyze(
        &self,
        user_input: &str,
        improved_output: &str,
    ) -> Result<AssumptionsRecord, LlmError> {
        let call = ChatCall::new(
            prompts::ANALYST_SYSTEM_PROMPT,
            prompts::assumptions_prompt(user_input, improved_output),
            self.settings.analyze_timeout(),
        );
        let reply = self.provider.complete(&call).await?;
        Ok(prompts::parse_assumptions(&reply))
    }
}
