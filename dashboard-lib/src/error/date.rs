//! Date variable error types

/// Errors raised while resolving a date variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The token is not part of the date variable grammar.
    #[error("Invalid date variable '{0}'")]
    InvalidDateVariable(String),

    /// The token is well-formed but the resulting date is not representable.
    #[error("Date variable '{token}' resolves outside the supported calendar range")]
    OutOfRange { token: String },
}

impl DateError {
    /// Creates an invalid date variable error.
    pub fn invalid(token: impl Into<String>) -> Self {
        Self::InvalidDateVariable(token.into())
    }

    /// Creates an out-of-range error.
    pub fn out_of_range(token: impl Into<String>) -> Self {
        Self::OutOfRange {
            token: token.into(),
        }
    }

    /// Returns the offending token.
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidDateVariable(token) => token,
            Self::OutOfRange { token } => token,
        }
    }
}
