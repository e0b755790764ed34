use std::path::PathBuf;

use thiserror::Error;

/// Reasons a raw init data string could not be decoded into fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    /// A `%` not followed by two hex digits.
    #[error("invalid percent escape at byte {position}")]
    InvalidEscape { position: usize },

    /// A key or value whose decoded bytes are not UTF-8. `position` is where
    /// that key or value starts.
    #[error("invalid UTF-8 in component at byte {position}")]
    InvalidUtf8 { position: usize },

    /// `;` is not accepted as a pair separator.
    #[error("semicolon in query string")]
    SemicolonSeparator,
}

/// Returned by [`crate::Verifier::verify`] when init data can not be trusted.
///
/// Every variant means "not authenticated" to the outside world. They are kept
/// apart so callers can log or alert on them differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed init data: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("init data carries no hash")]
    MissingSignature,

    #[error("init data hash does not match")]
    SignatureMismatch,
}

impl ValidationError {
    /// True for failures caused by the shape of the payload rather than its
    /// signature.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ValidationError::MalformedInput(_) | ValidationError::MissingSignature
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    #[error("could not read bot token from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bot token is empty")]
    EmptyToken,
}

/// Why an embedded `user` profile was discarded.
///
/// Never fails a verification; the profile is reported as absent instead.
#[derive(Debug, Error)]
pub enum MalformedProfile {
    #[error("user field is not valid percent-encoded UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("user field is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("user field is not a JSON object")]
    NotAnObject,
}
