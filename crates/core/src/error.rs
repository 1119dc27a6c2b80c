use std::fmt;

use serde::Serialize;

/// A configuration reference that did not resolve against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRef {
    /// Request field the value came from (`gpuId`, `resolution`, ...).
    pub field: &'static str,
    pub value: String,
}

impl UnresolvedRef {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

impl fmt::Display for UnresolvedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.field, self.value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: unresolved {}", join_display(.unresolved))]
    InvalidConfiguration { unresolved: Vec<UnresolvedRef> },

    #[error("Missing required field(s): {}", .fields.join(", "))]
    MissingField { fields: Vec<&'static str> },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CoreError {
    /// Stable machine-readable kind, surfaced to callers next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

fn join_display(refs: &[UnresolvedRef]) -> String {
    refs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
