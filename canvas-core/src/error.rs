//! Error type for the crate boundaries.
//!
//! Geometry itself never fails; these errors only come from decoding input,
//! validating configuration, or starting a gesture on a section that cannot
//! be moved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("no section with id `{0}`")]
    UnknownSection(String),

    #[error("section `{0}` is locked")]
    SectionLocked(String),

    #[error("no gesture in progress")]
    GestureInactive,

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidConfig { field, reason: reason.into() }
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
