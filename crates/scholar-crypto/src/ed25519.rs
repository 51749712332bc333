//! # Ed25519 Signing and Verification
//!
//! Thin wrappers over `ed25519-dalek` that pin the canonicalization
//! invariant at the type level: [`SigningKey::sign`] and
//! [`VerifyingKey::verify`] accept only [`CanonicalBytes`], so a payload
//! that bypassed the canonical encoder cannot reach a signature.
//!
//! Signatures are fixed-length (64 bytes) and travel as 128 lowercase
//! hex characters. Malformed hex or wrong-length input surfaces as a
//! [`CryptoError`], which verification callers map to a failed check —
//! never a panic.

use ed25519_dalek::{Signer, Verifier};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use scholar_core::CanonicalBytes;

use crate::error::CryptoError;

/// Encode bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        hex.push_str(&format!("{b:02x}"));
    }
    hex
}

/// Decode a hex string to bytes.
///
/// # Errors
///
/// Returns [`CryptoError::HexDecode`] on odd length or non-hex characters.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CryptoError> {
    if hex.len() % 2 != 0 {
        return Err(CryptoError::HexDecode(format!(
            "odd-length hex string ({} chars)",
            hex.len()
        )));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CryptoError::HexDecode(format!("invalid hex at offset {i}")))
        })
        .collect()
}

/// An Ed25519 signing (private) key.
///
/// Key material is zeroized on drop by `ed25519-dalek`.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

impl SigningKey {
    /// Generate a new key from a cryptographically secure RNG.
    pub fn generate<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::generate(rng),
        }
    }

    /// Reconstruct a key from its 32-byte seed.
    pub fn from_bytes(seed: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The 32-byte seed, for storage by a wallet. Returned in a
    /// self-zeroizing wrapper so the copy is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.inner.to_bytes())
    }

    /// Sign canonical bytes.
    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature {
            inner: self.inner.sign(data.as_bytes()),
        }
    }

    /// The corresponding verifying (public) key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// An Ed25519 verifying (public) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl VerifyingKey {
    /// Reconstruct a key from its 32-byte compressed form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes are not a
    /// valid curve point.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let inner = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Reconstruct a key from 64 hex characters.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| CryptoError::InvalidPublicKey(format!(
                "expected 32 bytes, got {}",
                b.len()
            )))?;
        Self::from_bytes(&arr)
    }

    /// The 32-byte compressed form.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }

    /// The lowercase hex form, as embedded in `did:key:z<hex>` identifiers.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.to_bytes())
    }

    /// Verify a signature over canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::VerificationFailed`] if the signature does
    /// not verify. Callers treat this as a failed check, not a fault.
    pub fn verify(
        &self,
        data: &CanonicalBytes,
        signature: &Ed25519Signature,
    ) -> Result<(), CryptoError> {
        self.inner
            .verify(data.as_bytes(), &signature.inner)
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519Signature {
    inner: ed25519_dalek::Signature,
}

impl Ed25519Signature {
    /// Reconstruct a signature from 128 hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HexDecode`] on malformed hex and
    /// [`CryptoError::InvalidSignatureLength`] on wrong-length input.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| CryptoError::InvalidSignatureLength(b.len()))?;
        Ok(Self {
            inner: ed25519_dalek::Signature::from_bytes(&arr),
        })
    }

    /// The lowercase hex transport form.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.inner.to_bytes())
    }

    /// The raw 64 signature bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.inner.to_bytes()
    }
}
