#[cfg(test)]
mod tests {
    use solcopilot::prompts::{
        assumptions_prompt, expert_system_prompt, improvement_prompt, parse_assumptions, presets,
        try_parse_assumptions, AssumptionsRecord, PARSE_FAILURE_MARKER,
    };

    #[test]
    fn test_parse_folds_implementation_into_technical() {
        let record = parse_assumptions(
            r#"{"technical_assumptions":["a"],"security_assumptions":["b"],"implementation_assumptions":["c"]}"#,
        );

        assert_eq!(record.technical_block(), "a\n\nImplementation Assumptions:\nc");
        assert_eq!(record.security_block(), "b");
    }

    #[test]
    fn test_parse_non_json_degrades_to_marker() {
        let record = parse_assumptions("not json");

        assert_eq!(record.technical_block(), PARSE_FAILURE_MARKER);
        assert_eq!(record.security_block(), PARSE_FAILURE_MARKER);
        assert_eq!(record, AssumptionsRecord::parse_failure());
        assert!(try_parse_assumptions("not json").is_err());
    }

    #[test]
    fn test_parse_missing_keys_default_to_empty() {
        let record = parse_assumptions(r#"{"security_assumptions":["Owner key is secured offline"]}"#);

        assert!(record.technical.is_empty());
        assert!(record.implementation.is_empty());
        assert_eq!(record.technical_block(), "");
        assert_eq!(record.security_block(), "Owner key is secured offline");

        let empty = parse_assumptions("{}");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_joins_multiple_lines() {
        let record = parse_assumptions(
            r#"{"technical_assumptions":["t1","t2"],"security_assumptions":["s1","s2"],"implementation_assumptions":[]}"#,
        );

        assert_eq!(record.technical_block(), "t1\nt2");
        assert_eq!(record.security_block(), "s1\ns2");
    }

    #[test]
    fn test_parse_implementation_without_technical() {
        let record = parse_assumptions(r#"{"implementation_assumptions":["Foundry is used"]}"#);
        assert_eq!(
            record.technical_block(),
            "\n\nImplementation Assumptions:\nFoundry is used"
        );
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        for reply in [
            "[]",
            "\"just a string\"",
            r#"{"technical_assumptions": "not a list"}"#,
            r#"{"security_assumptions": [1, 2]}"#,
            "```json\n{}\n```",
        ] {
            assert_eq!(parse_assumptions(reply), AssumptionsRecord::parse_failure(), "{}", reply);
        }
    }

    #[test]
    fn test_improvement_prompt_embeds_request_and_draft() {
        let prompt = improvement_prompt("Create a Vault Contract", "contract Vault {}");

        assert!(prompt.contains("Original Request: Create a Vault Contract"));
        assert!(prompt.contains("Generated Code:\ncontract Vault {}"));
        assert!(prompt.contains("Gas Optimization"));
    }

    #[test]
    fn test_assumptions_prompt_demands_json_keys() {
        let prompt = assumptions_prompt("Create a Vault Contract", "contract Vault {}");

        assert!(prompt.contains("Original User Request: Create a Vault Contract"));
        assert!(prompt.contains("contract Vault {}"));
        for key in [
            "\"technical_assumptions\"",
            "\"security_assumptions\"",
            "\"implementation_assumptions\"",
        ] {
            assert!(prompt.contains(key));
        }
        assert!(prompt.contains("Return only the JSON"));
    }

    #[test]
    fn test_expert_prompt_and_presets() {
        let expert = expert_system_prompt();
        assert!(expert.starts_with("You are a Solidity expert"));
        assert!(expert.contains("Checks-Effects-Interactions"));

        let presets = presets();
        assert_eq!(presets.len(), 6);
        assert!(presets.iter().all(|p| !p.prompt.trim().is_empty()));
        assert_eq!(presets[1].prompt, "Create a Vault Contract");
    }
}
