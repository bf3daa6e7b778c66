use serde::Serialize;

const SOLIDITY_EXPERT_PROMPT: &str = include_str!("solidity_expert.md");

pub const REVIEWER_SYSTEM_PROMPT: &str =
    "You are a senior Solidity expert specializing in security, gas optimization, and best practices.";

pub const ANALYST_SYSTEM_PROMPT: &str = "You are a Solidity code analyst who identifies assumptions and design decisions in smart contract code.";

/// System prompt for the generation step.
pub fn expert_system_prompt() -> &'static str {
    SOLIDITY_EXPERT_PROMPT
}

/// Second-pass prompt asking a reviewer to rework `draft_output`.
pub fn improvement_prompt(original_request: &str, draft_output: &str) -> String {
    format!(
        r#"Please review and improve the following Solidity code. Focus on:

1. **Technical Accuracy**: Ensure the code is correct, complete, and follows best practices
2. **Security**: Identify and fix any security vulnerabilities
3. **Gas Optimization**: Optimize for gas efficiency where possible
4. **Code Quality**: Improve readability, documentation, and structure

Original Request: {original_request}

Generated Code:
{draft_output}

Please provide an improved version of the code that addresses any issues you find. If the code is already excellent, provide it with minor improvements or additional comments."#
    )
}

/// Third-pass prompt demanding a strict JSON list of unstated assumptions.
pub fn assumptions_prompt(original_request: &str, final_output: &str) -> String {
    format!(
        r#"Analyze the following Solidity code and identify all assumptions made that weren't explicitly specified by the user.

Original User Request: {original_request}

Generated Code:
{final_output}

**IMPORTANT: Respond with valid JSON only in this exact format:**

{{
  "technical_assumptions": [
    "Assumption 1: Description of what was assumed",
    "Assumption 2: Description of what was assumed"
  ],
  "security_assumptions": [
    "Assumption 1: Description of what was assumed",
    "Assumption 2: Description of what was assumed"
  ],
  "implementation_assumptions": [
    "Assumption 1: Description of what was assumed",
    "Assumption 2: Description of what was assumed"
  ]
}}

Be specific about what was assumed and why it wasn't explicitly requested by the user. Return only the JSON, no other text."#
    )
}

/// A canned request offered as a one-click starting point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickStart {
    pub label: &'static str,
    pub prompt: &'static str,
}

const PRESETS: [QuickStart; 6] = [
    QuickStart {
        label: "Registry Contract",
        prompt: "Create a Registry Style contract for managing Artifacts",
    },
    QuickStart {
        label: "Vault Contract",
        prompt: "Create a Vault Contract",
    },
    QuickStart {
        label: "Staking Contract",
        prompt: "Create a Staking Contract with yield",
    },
    QuickStart {
        label: "Marketplace",
        prompt: "Create a Marketplace Contract to allow buying, selling, and trading of in-game assets (NFTs or tokens)",
    },
    QuickStart {
        label: "Escrow Contract",
        prompt: "Create a Escrow / Prize Pool Contracts to hold funds for tournaments, wagers, or bets until game outcomes are verified",
    },
    QuickStart {
        label: "Rewards Contract",
        prompt: "Create Reward Distribution Contracts for play-to-earn reward payouts",
    },
];

pub fn presets() -> &'static [QuickStart] {
    &PRESETS
}
