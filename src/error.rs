//! Error types for URL normalization, parsing and resolution.

use thiserror::Error;

/// Errors that can occur while turning a string into a [`Url`](crate::Url).
///
/// Decomposition itself never fails; every error originates in the
/// normalizer, the syntax parser, or a resolution precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The input cannot be safely normalized (bad escape, bad scheme, control character...).
    #[error("URL normalization failed for {input:?}: {reason}")]
    Normalization { input: String, reason: String },

    /// The normalized string is not a well-formed URL reference.
    #[error("malformed URL {input:?}: {reason}")]
    Syntax { input: String, reason: String },

    /// Reference resolution was attempted against a base that is not absolute.
    #[error("cannot resolve a reference against relative base {base:?}")]
    RelativeBase { base: String },
}

impl UrlError {
    pub(crate) fn normalization(input: &str, reason: impl Into<String>) -> Self {
        UrlError::Normalization {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn syntax(input: &str, reason: impl Into<String>) -> Self {
        UrlError::Syntax {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The offending input string carried by this error.
    pub fn input(&self) -> &str {
        match self {
            UrlError::Normalization { input, .. } | UrlError::Syntax { input, .. } => input,
            UrlError::RelativeBase { base } => base,
        }
    }
}
