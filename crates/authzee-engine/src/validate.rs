//! I implement the Input Validators (C3, §4.3).
//!

use authzee_model::{error::{GrantError, RequestError}, ErrorBundle, ErrorEntry, Grant, Request};
use serde_json::json;

use crate::collab::SchemaValidator;

/// Validate every grant against the generated Grant schema (§4.2). Every
/// grant is checked, regardless of whether an earlier one failed;
/// failures are filed as critical [`authzee_model::error::GrantError`]s.
pub fn validate_grants(
    grants: &[Grant],
    grant_schema: &serde_json::Value,
    schema_validator: &dyn SchemaValidator,
) -> ErrorBundle {
    let mut errors = ErrorBundle::new();
    for grant in grants {
        let raw = serde_json::to_value(grant).unwrap_or(json!(null));
        if let Err(message) = schema_validator.validate(grant_schema, &raw) {
            errors.push(ErrorEntry::Grant(GrantError {
                message,
                critical: true,
                grant: raw,
            }));
        }
    }
    errors
}

/// Validate the request against the generated Request schema (§4.2).
/// Implementations may coalesce multiple structural violations into one
/// [`authzee_model::error::RequestError`]; this one records exactly one.
pub fn validate_request(
    request: &Request,
    request_schema: &serde_json::Value,
    schema_validator: &dyn SchemaValidator,
) -> ErrorBundle {
    let mut errors = ErrorBundle::new();
    let raw = serde_json::to_value(request).unwrap_or(json!(null));
    if let Err(message) = schema_validator.validate(request_schema, &raw) {
        errors.push(ErrorEntry::Request(RequestError {
            message,
            critical: true,
        }));
    }
    errors
}
