//! Structured errors for cryptographic operations.

use thiserror::Error;

/// Errors from cryptographic operations in the Scholar stack.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),

    /// Invalid Ed25519 signature length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Invalid Ed25519 public key.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// Invalid commitment opening length.
    #[error("invalid nonce length: expected 32 hex chars, got {0}")]
    InvalidNonceLength(usize),

    /// No signing key is available for the requested operation.
    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),
}
