use scholar_core::ValidationError;
use scholar_crypto::CryptoError;

/// Errors from wallet and store operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// A record submitted to a store has no string `id` field.
    #[error("record has no string 'id' field")]
    MissingRecordId,

    /// The wallet holds no identity with this DID.
    #[error("unknown identity: {0}")]
    UnknownIdentity(String),

    /// A derived or stored identifier failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Key material could not be generated or reconstructed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A stored record could not be decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
