//! I implement the Workflow Engine (C5, §4.5): the `Engine` value type and
//! the Audit/Authorize workflows it runs.
//!
//! An [`Engine`] holds its two collaborators across calls, the way
//! [`acp::engine::AcpEngine`] holds its attribute-match services — it is
//! constructed once per host and reused for every `audit`/`authorize` call.

use authzee_model::{
    AuditResponse, AuthorizeResponse, Effect, ErrorBundle, Grant, IdentityDef, Request, ResourceDef,
};

use crate::{
    collab::{JmesPathSearch, SchemaValidator},
    definitions::validate_definitions,
    evaluate::evaluate_grant,
    validate::{validate_grants, validate_request},
};

/// The entry point for running Audit and Authorize workflows.
///
/// `Engine` is cheap to construct and holds no per-call state: definitions,
/// grants, and the request are all passed in at call time, matching §5's
/// single-threaded-per-invocation model.
pub struct Engine {
    schema_validator: Box<dyn SchemaValidator>,
    search: Box<dyn JmesPathSearch>,
}

/// Definition errors, prior to a request even being evaluated, that halted
/// the common prelude before any grants could be considered.
struct PreludeHalt {
    errors: ErrorBundle,
}

impl Engine {
    /// Build an engine from its two collaborators.
    pub fn new(
        schema_validator: impl SchemaValidator + 'static,
        search: impl JmesPathSearch + 'static,
    ) -> Self {
        Self {
            schema_validator: Box::new(schema_validator),
            search: Box::new(search),
        }
    }

    /// The common prelude shared by both workflows (§4.5): C1, then C2
    /// unconditionally, then C3's grant and request checks.
    ///
    /// §4.3 is explicit that the grant check and the request check "must
    /// run regardless of whether earlier validation succeeded, unless C1
    /// already halted the workflow" — so once C1 passes, both checks run
    /// unconditionally and their errors are merged before halting is
    /// decided, rather than returning as soon as the grant check alone
    /// fails (see DESIGN.md's Open Question on this).
    ///
    /// Returns `Err(PreludeHalt)` carrying the errors accumulated up to the
    /// point of the halt, or `Ok(())` once grants and request are both
    /// confirmed well-formed.
    fn run_prelude(
        &self,
        identity_defs: &[IdentityDef],
        resource_defs: &[ResourceDef],
        grants: &[Grant],
        request: &Request,
    ) -> Result<(), PreludeHalt> {
        let definition_errors = validate_definitions(identity_defs, resource_defs, &*self.schema_validator);
        if !definition_errors.is_empty() {
            return Err(PreludeHalt {
                errors: definition_errors,
            });
        }

        // C2 always runs, even though its output schemas are consumed
        // immediately below rather than returned to the caller.
        let grant_schema = authzee_schema::grant_schema(resource_defs);
        let request_schema = authzee_schema::request_schema(identity_defs, resource_defs);

        let mut errors = validate_grants(grants, &grant_schema, &*self.schema_validator);
        errors.merge(validate_request(request, &request_schema, &*self.schema_validator));

        if !errors.is_empty() {
            return Err(PreludeHalt { errors });
        }

        Ok(())
    }

    /// Run the Audit workflow (§4.5): every applicable grant, in input
    /// order, alongside every error observed along the way.
    #[tracing::instrument(skip_all, fields(grant_count = grants.len()))]
    pub fn audit(
        &self,
        identity_defs: &[IdentityDef],
        resource_defs: &[ResourceDef],
        grants: &[Grant],
        request: &Request,
    ) -> AuditResponse {
        if let Err(halt) = self.run_prelude(identity_defs, resource_defs, grants, request) {
            tracing::debug!("audit halted in the common prelude");
            return AuditResponse::halted(Vec::new(), halt.errors);
        }

        let mut applicable = Vec::new();
        let mut errors = ErrorBundle::new();

        for grant in grants {
            let outcome = evaluate_grant(grant, request, &*self.schema_validator, &*self.search);
            for error in outcome.errors {
                errors.push(error);
            }
            if outcome.halt {
                tracing::debug!("audit halted on a critical per-grant error");
                return AuditResponse::halted(applicable, errors);
            }
            if outcome.applicable {
                applicable.push(grant.clone());
            }
        }

        AuditResponse::completed(applicable, errors)
    }

    /// Run the Authorize workflow (§4.5): denies checked exhaustively before
    /// allows, so that a swapped grant order never changes a deny-driven
    /// decision (§8 P6).
    #[tracing::instrument(skip_all, fields(grant_count = grants.len()))]
    pub fn authorize(
        &self,
        identity_defs: &[IdentityDef],
        resource_defs: &[ResourceDef],
        grants: &[Grant],
        request: &Request,
    ) -> AuthorizeResponse {
        if let Err(halt) = self.run_prelude(identity_defs, resource_defs, grants, request) {
            tracing::debug!("authorize halted in the common prelude");
            return AuthorizeResponse::halted(halt.errors);
        }

        let mut errors = ErrorBundle::new();

        for grant in grants.iter().filter(|g| g.effect == Effect::Deny) {
            let outcome = evaluate_grant(grant, request, &*self.schema_validator, &*self.search);
            for error in outcome.errors {
                errors.push(error);
            }
            if outcome.halt {
                tracing::debug!("authorize halted evaluating a deny grant");
                return AuthorizeResponse::halted(errors);
            }
            if outcome.applicable {
                tracing::debug!("deny grant applicable; request not authorized");
                return AuthorizeResponse::denied(grant.clone(), errors);
            }
        }

        for grant in grants.iter().filter(|g| g.effect == Effect::Allow) {
            let outcome = evaluate_grant(grant, request, &*self.schema_validator, &*self.search);
            for error in outcome.errors {
                errors.push(error);
            }
            if outcome.halt {
                tracing::debug!("authorize halted evaluating an allow grant");
                return AuthorizeResponse::halted(errors);
            }
            if outcome.applicable {
                tracing::debug!("allow grant applicable; request authorized");
                return AuthorizeResponse::allowed(grant.clone(), errors);
            }
        }

        AuthorizeResponse::implicit_deny(errors)
    }
}
