use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const PARSE_FAILURE_MARKER: &str = "Failed to parse assumptions as JSON";
pub const TECHNICAL_EXTRACTION_FAILURE_MARKER: &str =
    "Error extracting technical assumptions from code analysis";
pub const SECURITY_EXTRACTION_FAILURE_MARKER: &str =
    "Error extracting security assumptions from code analysis";

const IMPLEMENTATION_HEADING: &str = "Implementation Assumptions:";

#[derive(Debug, Error)]
#[error("assumptions reply is not the expected JSON object: {0}")]
pub struct AssumptionsParseError(#[from] serde_json::Error);

/// Assumptions the analyst pass reported, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssumptionsRecord {
    pub technical: Vec<String>,
    pub security: Vec<String>,
    pub implementation: Vec<String>,
}

#[derive(Deserialize)]
struct AssumptionsReply {
    #[serde(default)]
    technical_assumptions: Vec<String>,
    #[serde(default)]
    security_assumptions: Vec<String>,
    #[serde(default)]
    implementation_assumptions: Vec<String>,
}

impl AssumptionsRecord {
    fn marked(technical: &str, security: &str) -> Self {
        Self {
            technical: vec![technical.to_string()],
            security: vec![security.to_string()],
            implementation: Vec::new(),
        }
    }

    /// Stand-in used when the reply could not be decoded.
    pub fn parse_failure() -> Self {
        Self::marked(PARSE_FAILURE_MARKER, PARSE_FAILURE_MARKER)
    }

    /// Stand-in used when the analysis call itself failed.
    pub fn extraction_failure() -> Self {
        Self::marked(TECHNICAL_EXTRACTION_FAILURE_MARKER, SECURITY_EXTRACTION_FAILURE_MARKER)
    }

    /// Technical lines with implementation lines folded in as a labelled
    /// trailing block.
    pub fn technical_block(&self) -> String {
        let technical = self.technical.join("\n");
        let implementation = self.implementation.join("\n");
        if implementation.is_empty() {
            technical
        } else {
            format!("{technical}\n\n{IMPLEMENTATION_HEADING}\n{implementation}")
        }
    }

    pub fn security_block(&self) -> String {
        self.security.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.security.is_empty() && self.implementation.is_empty()
    }
}

pub fn try_parse_assumptions(reply: &str) -> Result<AssumptionsRecord, AssumptionsParseError> {
    let parsed: AssumptionsReply = serde_json::from_str(reply)?;
    Ok(AssumptionsRecord {
        technical: parsed.technical_assumptions,
        security: parsed.security_assumptions,
        implementation: parsed.implementation_assumptions,
    })
}

/// Like [`try_parse_assumptions`], but an undecodable reply degrades to
/// [`AssumptionsRecord::parse_failure`].
pub fn parse_assumptions(reply: &str) -> AssumptionsRecord {
    match try_parse_assumptions(reply) {
        Ok(record) => record,
        Err(e) => {
            warn!("{}", e);
            AssumptionsRecord::parse_failure()
        }
    }
}
