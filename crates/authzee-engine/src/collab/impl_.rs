//! I provide reference implementations of the collaborator traits over real
//! crates, the way `acp::attribute_match_svc::impl_` provides
//! `AgentMatchService`/`ClientMatchService`/etc. as concrete, swappable
//! default services.
//!

#[cfg(feature = "builtin-validator")]
mod jsonschema_validator {
    use serde_json::Value;
    use thiserror::Error;

    use crate::collab::SchemaValidator;

    /// A [`SchemaValidator`] backed by the `jsonschema` crate, compiling
    /// against JSON Schema Draft 2020-12.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct JsonschemaValidator;

    /// A schema failed to compile, or an instance failed to validate.
    ///
    /// Compilation failures indicate a malformed schema handed to the
    /// engine (a bug in the caller, not a property of the request); the
    /// `SchemaValidator` contract flattens both into the same `Err(String)`
    /// since callers never need to tell them apart.
    #[derive(Debug, Error)]
    enum JsonschemaValidatorError {
        #[error("invalid schema: {0}")]
        InvalidSchema(String),
        #[error("{0}")]
        ValidationFailed(String),
    }

    impl SchemaValidator for JsonschemaValidator {
        fn validate(&self, schema: &Value, instance: &Value) -> Result<(), String> {
            let compiled = jsonschema::options()
                .with_draft(jsonschema::Draft::Draft202012)
                .build(schema)
                .map_err(|error| JsonschemaValidatorError::InvalidSchema(error.to_string()).to_string())?;

            compiled.validate(instance).map_err(|errors| {
                let message = errors.map(|error| error.to_string()).collect::<Vec<_>>().join("; ");
                JsonschemaValidatorError::ValidationFailed(message).to_string()
            })
        }
    }
}

#[cfg(feature = "builtin-validator")]
pub use jsonschema_validator::JsonschemaValidator;

#[cfg(feature = "builtin-jmespath")]
mod jmespath_search {
    use jmespath::Variable;
    use serde_json::Value;
    use thiserror::Error;

    use crate::collab::JmesPathSearch;

    /// A [`JmesPathSearch`] backed by the `jmespath` crate.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct JmespathSearch;

    /// An expression failed to compile or to evaluate against the supplied
    /// data.
    #[derive(Debug, Error)]
    enum JmespathSearchError {
        #[error("invalid expression: {0}")]
        InvalidExpression(String),
        #[error("search failed: {0}")]
        SearchFailed(String),
        #[error("could not convert search input/output: {0}")]
        Conversion(String),
    }

    impl JmesPathSearch for JmespathSearch {
        fn search(&self, expression: &str, data: &Value) -> Result<Value, String> {
            let compiled = jmespath::compile(expression)
                .map_err(|error| JmespathSearchError::InvalidExpression(error.to_string()).to_string())?;
            let variable: Variable = serde_json::from_value(data.clone())
                .map_err(|error| JmespathSearchError::Conversion(error.to_string()).to_string())?;
            let result = compiled
                .search(variable)
                .map_err(|error| JmespathSearchError::SearchFailed(error.to_string()).to_string())?;
            serde_json::to_value(&*result)
                .map_err(|error| JmespathSearchError::Conversion(error.to_string()).to_string())
        }
    }
}

#[cfg(feature = "builtin-jmespath")]
pub use jmespath_search::JmespathSearch;
