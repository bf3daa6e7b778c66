//! Prompt text for each pipeline step and the parser for the analyst's reply.
//! Nothing in here performs I/O.

pub mod assumptions;
pub mod templates;

pub use assumptions::{
    parse_assumptions, try_parse_assumptions, AssumptionsParseError, AssumptionsRecord,
    PARSE_FAILURE_MARKER, SECURITY_EXTRACTION_FAILURE_MARKER, TECHNICAL_EXTRACTION_FAILURE_MARKER,
};
pub use templates::{
    assumptions_prompt, expert_system_prompt, improvement_prompt, presets, QuickStart,
    ANALYST_SYSTEM_PROMPT, REVIEWER_SYSTEM_PROMPT,
};
