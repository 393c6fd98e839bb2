//! I implement the Grant Evaluator (C4, §4.4): a small state machine
//! deciding whether one grant applies to one request.

use authzee_model::{
    error::{ContextError, JmesPathError},
    grant::ContextValidation,
    json_eq, ErrorEntry, Grant, Request,
};
use serde_json::json;

use crate::collab::{JmesPathSearch, SchemaValidator};

/// The result of evaluating a single grant against a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    /// Whether the grant is applicable to the request.
    pub applicable: bool,
    /// Errors observed while evaluating this grant, in observation order.
    pub errors: Vec<ErrorEntry>,
    /// Whether a critical error requires the calling workflow to halt.
    pub halt: bool,
}

impl EvaluationOutcome {
    fn not_applicable(errors: Vec<ErrorEntry>, halt: bool) -> Self {
        Self {
            applicable: false,
            errors,
            halt,
        }
    }

    fn applicable(applicable: bool) -> Self {
        Self {
            applicable,
            errors: Vec::new(),
            halt: false,
        }
    }
}

/// Resolve the effective context-validation mode (§4.4 step 2): the
/// request's mode wins unless it defers to the grant.
fn effective_context_validation(request: &Request, grant: &Grant) -> ContextValidation {
    use authzee_model::request::RequestContextValidation as Rcv;
    match request.context_validation {
        Rcv::Grant => grant.context_validation,
        Rcv::None => ContextValidation::None,
        Rcv::Validate => ContextValidation::Validate,
        Rcv::Error => ContextValidation::Error,
        Rcv::Critical => ContextValidation::Critical,
    }
}

/// Resolve the effective query-validation mode (§4.4 step 5), mirroring
/// [`effective_context_validation`].
fn effective_query_validation(request: &Request, grant: &Grant) -> authzee_model::grant::QueryValidation {
    use authzee_model::grant::QueryValidation as Qv;
    use authzee_model::request::RequestQueryValidation as Rqv;
    match request.query_validation {
        Rqv::Grant => grant.query_validation,
        Rqv::Validate => Qv::Validate,
        Rqv::Error => Qv::Error,
        Rqv::Critical => Qv::Critical,
    }
}

/// Run the full C4 algorithm for one (grant, request) pair.
pub fn evaluate_grant(
    grant: &Grant,
    request: &Request,
    schema_validator: &dyn SchemaValidator,
    search: &dyn JmesPathSearch,
) -> EvaluationOutcome {
    // 1. Action gate.
    if !grant.action_gate_passes(&request.action) {
        return EvaluationOutcome::applicable(false);
    }

    // 2-4. Context-validation mode and check.
    let cv = effective_context_validation(request, grant);
    if cv != ContextValidation::None {
        if let Err(message) = schema_validator.validate(&grant.context_schema, &request.context) {
            return match cv {
                ContextValidation::None => unreachable!(),
                ContextValidation::Validate => EvaluationOutcome::not_applicable(Vec::new(), false),
                ContextValidation::Error => EvaluationOutcome::not_applicable(
                    vec![ErrorEntry::Context(ContextError {
                        message,
                        critical: false,
                        grant: grant.clone(),
                    })],
                    false,
                ),
                ContextValidation::Critical => EvaluationOutcome::not_applicable(
                    vec![ErrorEntry::Context(ContextError {
                        message,
                        critical: true,
                        grant: grant.clone(),
                    })],
                    true,
                ),
            };
        }
    }

    // 5. Query-validation mode.
    let qv = effective_query_validation(request, grant);

    // 6. Query.
    let query_input = json!({
        "grant": serde_json::to_value(grant).unwrap_or(json!(null)),
        "request": serde_json::to_value(request).unwrap_or(json!(null)),
    });
    let search_result = search.search(&grant.query, &query_input);
    let value = match search_result {
        Ok(value) => value,
        Err(message) => {
            use authzee_model::grant::QueryValidation as Qv;
            return match qv {
                Qv::Validate => EvaluationOutcome::not_applicable(Vec::new(), false),
                Qv::Error => EvaluationOutcome::not_applicable(
                    vec![ErrorEntry::JMESPath(JmesPathError {
                        message,
                        critical: false,
                        grant: grant.clone(),
                    })],
                    false,
                ),
                Qv::Critical => EvaluationOutcome::not_applicable(
                    vec![ErrorEntry::JMESPath(JmesPathError {
                        message,
                        critical: true,
                        grant: grant.clone(),
                    })],
                    true,
                ),
            };
        }
    };

    // 7. Equality.
    EvaluationOutcome::applicable(json_eq(&value, &grant.equality))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use authzee_model::{
        grant::{ContextValidation, Effect, QueryValidation},
        request::{RequestContextValidation, RequestQueryValidation},
    };
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    struct AlwaysValid;
    impl SchemaValidator for AlwaysValid {
        fn validate(&self, _schema: &serde_json::Value, _instance: &serde_json::Value) -> Result<(), String> {
            Ok(())
        }
    }

    struct AlwaysInvalid;
    impl SchemaValidator for AlwaysInvalid {
        fn validate(&self, _schema: &serde_json::Value, _instance: &serde_json::Value) -> Result<(), String> {
            Err("context does not match".to_string())
        }
    }

    struct ReturnsTrue;
    impl JmesPathSearch for ReturnsTrue {
        fn search(&self, _expression: &str, _data: &serde_json::Value) -> Result<serde_json::Value, String> {
            Ok(json!(true))
        }
    }

    struct SearchFails;
    impl JmesPathSearch for SearchFails {
        fn search(&self, _expression: &str, _data: &serde_json::Value) -> Result<serde_json::Value, String> {
            Err("unknown function".to_string())
        }
    }

    fn grant(actions: &[&str]) -> Grant {
        Grant {
            effect: Effect::Allow,
            actions: actions.iter().map(|a| a.to_string()).collect(),
            query: "request.identities.User[0].role == 'admin'".to_string(),
            query_validation: QueryValidation::Error,
            equality: json!(true),
            data: json!({}),
            context_schema: json!({"type": "object"}),
            context_validation: ContextValidation::None,
        }
    }

    fn request(action: &str) -> Request {
        Request {
            identities: BTreeMap::new(),
            resource_type: "Balloon".to_string(),
            action: action.to_string(),
            resource: json!({}),
            parents: BTreeMap::new(),
            children: BTreeMap::new(),
            query_validation: RequestQueryValidation::Grant,
            context: json!({}),
            context_validation: RequestContextValidation::Grant,
        }
    }

    #[test]
    fn action_mismatch_is_not_applicable_with_no_errors() {
        let outcome = evaluate_grant(&grant(&["pop"]), &request("inflate"), &AlwaysValid, &ReturnsTrue);
        assert!(!outcome.applicable);
        assert!(outcome.errors.is_empty());
        assert!(!outcome.halt);
    }

    #[test]
    fn empty_actions_is_vacuous_gate() {
        let outcome = evaluate_grant(&grant(&[]), &request("anything"), &AlwaysValid, &ReturnsTrue);
        assert!(outcome.applicable);
    }

    #[test]
    fn query_true_and_equality_true_is_applicable() {
        let outcome = evaluate_grant(&grant(&["pop"]), &request("pop"), &AlwaysValid, &ReturnsTrue);
        assert!(outcome.applicable);
        assert!(outcome.errors.is_empty());
    }

    #[rstest]
    #[case::validate(ContextValidation::Validate, 0, false)]
    #[case::error(ContextValidation::Error, 1, false)]
    #[case::critical(ContextValidation::Critical, 1, true)]
    fn context_failure_branches_on_mode(
        #[case] mode: ContextValidation,
        #[case] expected_errors: usize,
        #[case] expected_halt: bool,
    ) {
        let mut g = grant(&["pop"]);
        g.context_validation = mode;
        let mut r = request("pop");
        r.context_validation = RequestContextValidation::Grant;
        let outcome = evaluate_grant(&g, &r, &AlwaysInvalid, &ReturnsTrue);
        assert!(!outcome.applicable);
        assert_eq!(outcome.errors.len(), expected_errors);
        assert_eq!(outcome.halt, expected_halt);
    }

    #[test]
    fn jmespath_failure_critical_halts() {
        let mut g = grant(&["pop"]);
        g.query_validation = QueryValidation::Critical;
        let outcome = evaluate_grant(&g, &request("pop"), &AlwaysValid, &SearchFails);
        assert!(!outcome.applicable);
        assert!(outcome.halt);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn context_validation_none_skips_schema_check_entirely() {
        let mut g = grant(&["pop"]);
        g.context_validation = ContextValidation::Critical;
        let mut r = request("pop");
        r.context_validation = RequestContextValidation::None;
        let outcome = evaluate_grant(&g, &r, &AlwaysInvalid, &ReturnsTrue);
        assert!(outcome.applicable);
        assert!(outcome.errors.is_empty());
    }
}
