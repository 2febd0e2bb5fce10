// Error types for the crate.
//
// Template lookup and decoding get dedicated variants so callers can
// distinguish "no such template" (often recoverable: prompt the user, list
// what exists) from "the file is there but unusable" (not recoverable without
// human attention). Everything IO- or JSON-shaped folds into the conversion
// variants via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No template stored under the requested key.
    #[error("template not found: {key}")]
    TemplateNotFound { key: String },

    /// A template document failed structural validation.
    #[error("malformed template: {reason}")]
    MalformedTemplate { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedTemplate {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
