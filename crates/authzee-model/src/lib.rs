//! I define the data model shared by every Authzee component: identity and
//! resource definitions, grants, requests, and the error/response types the
//! workflow engine returns.
//!
//! Every field that carries user-supplied data is kept as an opaque
//! [`serde_json::Value`] rather than a typed struct, since the shape of
//! identities, resources, and context is defined entirely by the JSON
//! Schemas supplied in [`IdentityDef::schema`] / [`ResourceDef::schema`] and
//! is therefore unknown at compile time.

#![warn(missing_docs)]
#![deny(unused_qualifications)]

pub mod error;
pub mod grant;
pub mod identity;
pub mod json_eq;
pub mod request;
pub mod resource;
pub mod response;

pub use error::{DefinitionKind, ErrorBundle, ErrorEntry};
pub use grant::{ContextValidation, Effect, Grant, QueryValidation};
pub use identity::{IdentityDef, MalformedIdentityType};
pub use json_eq::json_eq;
pub use request::{Request, RequestContextValidation, RequestQueryValidation};
pub use resource::{MalformedResourceDef, ResourceDef};
pub use response::{AuditResponse, AuthorizeResponse};
