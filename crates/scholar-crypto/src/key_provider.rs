//! # Key Provider Abstraction
//!
//! Abstracts Ed25519 key custody behind a trait so the issuance path
//! never handles raw key material directly. The credential core asks a
//! provider to sign; where the key lives (memory, encrypted storage,
//! hardware) is the provider's concern.
//!
//! ## Security Invariants
//!
//! - Signing input is `&CanonicalBytes` — never raw bytes.
//! - `KeyProvider` is `Send + Sync` for use in multi-threaded hosts.

use scholar_core::CanonicalBytes;

use crate::ed25519::{Ed25519Signature, SigningKey, VerifyingKey};
use crate::error::CryptoError;

/// Trait for Ed25519 key custody and signing backends.
pub trait KeyProvider: Send + Sync {
    /// Sign canonicalized data with the managed key.
    fn sign(&self, data: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError>;

    /// Return the verifying (public) key.
    fn verifying_key(&self) -> Result<VerifyingKey, CryptoError>;

    /// Human-readable name for diagnostics.
    fn provider_name(&self) -> &str;
}

/// In-memory key provider backed by a [`SigningKey`].
///
/// Key material lives in process memory and is zeroized on drop.
pub struct LocalKeyProvider {
    key: SigningKey,
}

impl LocalKeyProvider {
    /// Create from an existing signing key.
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Generate a new random key using the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            key: SigningKey::generate(&mut rand_core::OsRng),
        }
    }

    /// Create from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(seed),
        }
    }
}

impl KeyProvider for LocalKeyProvider {
    fn sign(&self, data: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError> {
        Ok(self.key.sign(data))
    }

    fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        Ok(self.key.verifying_key())
    }

    fn provider_name(&self) -> &str {
        "LocalKeyProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn local_provider_sign_and_verify() {
        let provider = LocalKeyProvider::generate();
        let data = CanonicalBytes::new(&json!({"action": "issue"})).expect("canonical");
        let sig = provider.sign(&data).expect("sign");
        let vk = provider.verifying_key().expect("vk");
        assert!(vk.verify(&data, &sig).is_ok());
    }

    #[test]
    fn local_provider_from_seed_deterministic() {
        let seed = [7u8; 32];
        let p1 = LocalKeyProvider::from_seed(&seed);
        let p2 = LocalKeyProvider::from_seed(&seed);
        assert_eq!(
            p1.verifying_key().expect("vk1"),
            p2.verifying_key().expect("vk2"),
        );
    }

    #[test]
    fn local_provider_name() {
        assert_eq!(
            LocalKeyProvider::generate().provider_name(),
            "LocalKeyProvider"
        );
    }

    #[test]
    fn key_provider_trait_object_safe() {
        let provider = LocalKeyProvider::generate();
        let _boxed: Box<dyn KeyProvider> = Box::new(provider);
    }

    #[test]
    fn local_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocalKeyProvider>();
    }
}
