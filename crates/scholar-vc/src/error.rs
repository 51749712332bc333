//! Errors from credential issuance.

use thiserror::Error;

/// Errors from credential construction and signing.
///
/// Verification does not use this type: "does not verify" is reported
/// through [`VerificationReport`](crate::credential::VerificationReport),
/// not as an error.
#[derive(Error, Debug)]
pub enum VcError {
    /// Canonicalization of the credential body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] scholar_core::CanonicalizationError),

    /// The signing key was unusable.
    #[error("signing failed: {0}")]
    Signing(#[from] scholar_crypto::CryptoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_error_converts() {
        let err: VcError =
            scholar_crypto::CryptoError::KeyUnavailable("no key".to_string()).into();
        assert!(format!("{err}").contains("no key"));
    }
}
