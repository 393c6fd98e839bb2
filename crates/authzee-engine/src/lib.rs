//! I sequence the Authzee components — definition validation, schema
//! generation, grant/request validation, per-grant evaluation — into the
//! Audit and Authorize workflows (C1 through C5).
//!
//! Two collaborators are injected rather than implemented here: a JSON
//! Schema (Draft 2020-12) validator and a JMESPath search function. See
//! [`collab`] for their trait contracts, and the `builtin-validator` /
//! `builtin-jmespath` features for reference implementations over real
//! crates.

#![warn(missing_docs)]
#![deny(unused_qualifications)]

pub mod collab;
mod definitions;
mod evaluate;
mod validate;
mod workflow;

pub use collab::{JmesPathSearch, SchemaValidator};
pub use definitions::validate_definitions;
pub use evaluate::{evaluate_grant, EvaluationOutcome};
pub use validate::{validate_grants, validate_request};
pub use workflow::Engine;
