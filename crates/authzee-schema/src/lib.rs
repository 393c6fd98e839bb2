//! I generate the grant, error, request, and response JSON Schemas from
//! validated Authzee identity and resource definitions (C2, §4.2, §6).
//!
//! Generation is pure: the same definitions, in the same order, always
//! produce byte-equal `serde_json::Value` trees (§8 P1). This crate does
//! not validate anything against the schemas it builds — that is C3's job,
//! in `authzee-engine`, via an injected schema-validator collaborator.

#![warn(missing_docs)]
#![deny(unused_qualifications)]

mod actions;
mod error_schema;
mod grant_schema;
mod request_schema;
mod response_schema;

pub use actions::action_union;
pub use error_schema::error_schema;
pub use grant_schema::grant_schema;
pub use request_schema::request_schema;
pub use response_schema::{audit_response_schema, authorize_response_schema};
