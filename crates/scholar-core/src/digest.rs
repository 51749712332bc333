//! # SHA-256 Content Digests
//!
//! Digest computation from [`CanonicalBytes`]. The function signature
//! requires canonical input — raw byte slices are not accepted — so every
//! digest in the stack was computed from properly canonicalized data.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A 32-byte SHA-256 digest, transported as 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let mut hex = String::with_capacity(64);
        for b in bytes {
            hex.push_str(&format!("{b:02x}"));
        }
        Self(hex)
    }

    /// The lowercase hex representation.
    pub fn to_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    ContentDigest::from_bytes(hasher.finalize().into())
}

/// Incremental SHA-256 for digests over composite input, where one part
/// is canonical JSON and the rest is raw bytes (commitment openings,
/// predicate bindings).
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Start a fresh accumulator.
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Feed bytes into the digest.
    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Finish and return the digest.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest::from_bytes(self.hasher.finalize().into())
    }
}

impl Default for Sha256Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
