//! I define the Audit and Authorize response types (§3, §4.5).
//!

use serde::{Deserialize, Serialize};

use crate::{error::ErrorBundle, grant::Grant};

/// The response of the Audit workflow: which grants were applicable, and
/// any errors observed along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResponse {
    /// `false` iff the workflow halted early on a critical error (§3, §8
    /// P4).
    pub completed: bool,

    /// Applicable grants, in grant-input order (§3, §8 P2).
    pub grants: Vec<Grant>,

    /// Errors accumulated during this call.
    pub errors: ErrorBundle,
}

impl AuditResponse {
    /// A halted response: `completed=false`, with whatever grants and
    /// errors had already been accumulated (§4.5: "return (`grants`=
    /// applicable-so-far)").
    #[must_use]
    pub fn halted(grants: Vec<Grant>, errors: ErrorBundle) -> Self {
        Self {
            completed: false,
            grants,
            errors,
        }
    }

    /// A completed response.
    #[must_use]
    pub fn completed(grants: Vec<Grant>, errors: ErrorBundle) -> Self {
        Self {
            completed: true,
            grants,
            errors,
        }
    }
}

/// The response of the Authorize workflow: a single allow/deny decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    /// Whether the request is authorized.
    pub authorized: bool,

    /// `false` iff the workflow halted early on a critical error.
    pub completed: bool,

    /// The grant that determined the decision, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant: Option<Grant>,

    /// A human-readable explanation of the decision.
    pub message: String,

    /// Errors accumulated during this call.
    pub errors: ErrorBundle,
}

impl AuthorizeResponse {
    /// A halted response (§4.5: "`completed=false`, `authorized=false`,
    /// `grant=absent`, `message="Workflow halted on critical error."`").
    #[must_use]
    pub fn halted(errors: ErrorBundle) -> Self {
        Self {
            authorized: false,
            completed: false,
            grant: None,
            message: "Workflow halted on critical error.".to_string(),
            errors,
        }
    }

    /// A `deny` decision: a deny grant was applicable.
    #[must_use]
    pub fn denied(grant: Grant, errors: ErrorBundle) -> Self {
        Self {
            authorized: false,
            completed: true,
            grant: Some(grant),
            message: "A deny grant is applicable; the request is not authorized.".to_string(),
            errors,
        }
    }

    /// An `allow` decision: an allow grant was applicable and no deny grant
    /// was.
    #[must_use]
    pub fn allowed(grant: Grant, errors: ErrorBundle) -> Self {
        Self {
            authorized: true,
            completed: true,
            grant: Some(grant),
            message:
                "An allow grant is applicable to the request, and no deny grants are applicable; \
                 the request is authorized."
                    .to_string(),
            errors,
        }
    }

    /// The implicit-deny decision: no grant was applicable.
    #[must_use]
    pub fn implicit_deny(errors: ErrorBundle) -> Self {
        Self {
            authorized: false,
            completed: true,
            grant: None,
            message: "No applicable grants; implicit deny.".to_string(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use claims::assert_none;

    use super::*;

    #[test]
    fn halted_authorize_response_has_no_grant() {
        let response = AuthorizeResponse::halted(ErrorBundle::new());
        assert!(!response.completed);
        assert!(!response.authorized);
        assert_none!(response.grant);
    }

    #[test]
    fn implicit_deny_is_completed_and_unauthorized() {
        let response = AuthorizeResponse::implicit_deny(ErrorBundle::new());
        assert!(response.completed);
        assert!(!response.authorized);
        assert_none!(response.grant);
        assert!(response.message.contains("implicit deny"));
    }
}
