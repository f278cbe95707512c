//! Error types for the hooksig core library.

use thiserror::Error;

/// Core error type for signature handling.
///
/// The header variants describe a structurally invalid `X-Signature` value.
/// A well-formed header whose signature does not match is not an error; it
/// is reported as `Ok(false)` by the verifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookSigError {
    #[error("Invalid signature, expected time and verification but got: '{header}'!")]
    MalformedHeader { header: String },

    #[error("Signature time (t=<timestamp>) missing!")]
    MissingTimestamp { header: String },

    #[error("Signature time (t=<timestamp>) invalid: '{field}'!")]
    InvalidTimestamp { field: String },

    #[error("Signature verification (v=<verification>) missing!")]
    MissingVerification { header: String },

    #[error("Signature old verification (v0=<verification>) missing!")]
    MissingOldVerification { header: String },

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl HookSigError {
    /// Returns true if the error was caused by the caller-supplied header.
    ///
    /// HTTP front ends should answer these with a 400-class status.
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. }
                | Self::MissingTimestamp { .. }
                | Self::InvalidTimestamp { .. }
                | Self::MissingVerification { .. }
                | Self::MissingOldVerification { .. }
        )
    }
}

/// Result type alias for hooksig operations.
pub type Result<T> = std::result::Result<T, HookSigError>;
