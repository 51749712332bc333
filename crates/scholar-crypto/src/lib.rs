//! # scholar-crypto — Cryptographic Primitives for the Scholar Stack
//!
//! Provides the cryptographic building blocks used throughout the
//! workspace:
//!
//! - **Ed25519** signing and verification for credential and
//!   presentation proofs, accepting only canonicalized input.
//! - **Commitment nonces** drawn from the OS CSPRNG.
//! - **Key provider abstraction** so issuance code never touches raw
//!   key material.
//!
//! Digest computation lives in `scholar-core` ([`scholar_core::sha256_digest`])
//! alongside the canonical encoder it is bound to.

pub mod ed25519;
pub mod error;
pub mod key_provider;
pub mod nonce;

// Re-export primary types.
pub use ed25519::{bytes_to_hex, hex_to_bytes, Ed25519Signature, SigningKey, VerifyingKey};
pub use error::CryptoError;
pub use key_provider::{KeyProvider, LocalKeyProvider};
pub use nonce::{Nonce, NONCE_LEN};
