//! # Canonical JSON Serialization
//!
//! Deterministic byte encoding for everything that gets signed or hashed.
//! Object keys are sorted lexicographically, separators are compact, and
//! strings use standard JSON escaping. Two structurally equal values
//! always canonicalize to identical bytes regardless of insertion order.
//!
//! ## Security Invariants
//!
//! - [`CanonicalBytes`] is the *only* input type accepted by the signing,
//!   verification, and digest functions in `scholar-crypto`. Raw
//!   `serde_json::to_vec()` output must never reach a signature.
//! - Non-integer JSON numbers are rejected. Float formatting differs
//!   between encoders, which would split the canonical encoding between
//!   independent implementations; fractional quantities travel as
//!   fixed-point decimal strings instead.
//!
//! ## Wire Format
//!
//! The canonical encoding is part of the interchange format: a signer and
//! a verifier that disagree on it will fail verification even for an
//! honestly signed credential.

use serde::Serialize;
use thiserror::Error;

/// Errors from canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value contains a non-integer number, which has no canonical
    /// byte encoding.
    #[error("non-integer number {0} cannot be canonicalized; encode it as a string")]
    NonIntegerNumber(String),

    /// Serde serialization of the input value failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A deterministic, canonical byte encoding of a JSON value.
///
/// Construction is the only way to obtain one, so holding a
/// `CanonicalBytes` is proof that the bytes came through the canonical
/// encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    pub fn new<T: Serialize>(value: &T) -> Result<Self, CanonicalizationError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Canonicalize an already-built [`serde_json::Value`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, CanonicalizationError> {
        let mut out = Vec::new();
        write_canonical(&value, &mut out)?;
        Ok(Self(out))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical encoding in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the encoding is empty (never the case for a
    /// canonicalized JSON value, but required for a well-behaved API).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn write_canonical(
    value: &serde_json::Value,
    out: &mut Vec<u8>,
) -> Result<(), CanonicalizationError> {
    use serde_json::Value;

    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                out.extend_from_slice(i.to_string().as_bytes());
            } else if let Some(u) = n.as_u64() {
                out.extend_from_slice(u.to_string().as_bytes());
            } else {
                return Err(CanonicalizationError::NonIntegerNumber(n.to_string()));
            }
        }
        Value::String(s) => {
            // serde_json's string encoding is deterministic.
            let encoded = serde_json::to_string(s)
                .expect("string serialization is infallible");
            out.extend_from_slice(encoded.as_bytes());
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(item, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // Sort keys so insertion order never reaches the signature.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();

            out.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                let encoded = serde_json::to_string(key.as_str())
                    .expect("string serialization is infallible");
                out.extend_from_slice(encoded.as_bytes());
                out.push(b':');
                write_canonical(&map[key.as_str()], out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}
