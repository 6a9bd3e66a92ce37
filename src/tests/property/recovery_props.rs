//! Property-based tests for JSON recovery and request validation

use proptest::prelude::*;
use serde_json::json;

use crate::core::codegen::recover::brace_block;
use crate::core::codegen::{recover_json, CodeBundle, RecoveryError};
use crate::core::server::validate_request;

// ============================================================================
// Strategies
// ============================================================================

/// Prose without braces that can never parse as JSON on its own.
fn arb_prose() -> impl Strategy<Value = String> {
    "[A-Z][a-z ,]{0,40}[.:!]"
}

fn arb_bundle() -> impl Strategy<Value = CodeBundle> {
    (".{0,80}", ".{0,80}", ".{0,80}").prop_map(|(html, css, js)| CodeBundle::new(html, css, js))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn bundle_in_prose_is_recovered(
        prefix in arb_prose(),
        suffix in arb_prose(),
        bundle in arb_bundle(),
    ) {
        let encoded = serde_json::to_string(&bundle).unwrap();
        let text = format!("{} {} {}", prefix, encoded, suffix);

        let value = recover_json(&text).unwrap();
        prop_assert_eq!(CodeBundle::from_model_output(&value), bundle);
    }

    #[test]
    fn exact_bundle_json_parses_directly(bundle in arb_bundle()) {
        let encoded = serde_json::to_string(&bundle).unwrap();
        prop_assert_eq!(recover_json(&encoded).unwrap(), serde_json::to_value(&bundle).unwrap());
    }

    #[test]
    fn recovery_never_panics(text in ".*") {
        if let Err(e) = recover_json(&text) {
            prop_assert_eq!(e.raw(), text.as_str());
        }
    }

    #[test]
    fn prose_without_braces_is_no_json(text in arb_prose()) {
        let err = recover_json(&text).unwrap_err();
        prop_assert!(matches!(err, RecoveryError::NoJson { .. }), "unexpected: {:?}", err);
    }

    #[test]
    fn brace_block_is_delimited(text in ".*") {
        if let Some(block) = brace_block(&text) {
            prop_assert!(block.starts_with('{'), "block does not open with a brace: {:?}", block);
            prop_assert!(block.ends_with('}'), "block does not close with a brace: {:?}", block);
            prop_assert!(text.contains(block), "block {:?} not found in {:?}", block, text);
        }
    }

    #[test]
    fn non_empty_prompt_is_accepted_verbatim(prompt in ".{1,200}") {
        let body = json!({ "prompt": &prompt }).to_string();
        let request = validate_request(body.as_bytes()).unwrap();
        prop_assert_eq!(request.prompt, prompt);
    }
}
