use crate::prompts::AssumptionsRecord;

pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

pub const COMPLETION_BANNER: &str = "*Three-Call Architecture Complete* - This response has been improved with comprehensive review covering technical accuracy, security, gas optimization, and best practices. All assumptions made in the final code that weren't explicitly specified by the user are documented above.";

pub fn assumptions_block(assumptions: &AssumptionsRecord) -> String {
    format!(
        "## All Assumptions Made in Final Code\n\n\
         ### Technical Assumptions in Code\n{}\n\n\
         ### Security Assumptions in Code\n{}",
        assumptions.technical_block(),
        assumptions.security_block()
    )
}

/// Final text shown for a completed three-call turn.
pub fn compose_reply(improved_output: &str, assumptions: &AssumptionsRecord) -> String {
    format!(
        "{}\n\n{}\n\n---\n{}",
        improved_output,
        assumptions_block(assumptions),
        COMPLETION_BANNER
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_starts_with_improved_output_and_ends_with_banner() {
        let record = AssumptionsRecord {
            technical: vec!["uses uint256".into()],
            security: vec!["owner is trusted".into()],
            implementation: vec![],
        };
        let reply = compose_reply("contract Vault {}", &record);

        assert!(reply.starts_with("contract Vault {}\n\n## All Assumptions"));
        assert!(reply.contains("### Technical Assumptions in Code\nuses uint256"));
        assert!(reply.contains("### Security Assumptions in Code\nowner is trusted"));
        assert!(reply.ends_with(COMPLETION_BANNER));
    }
}
