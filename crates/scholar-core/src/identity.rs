//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for the identifiers that flow through the
//! credential stack. Each identifier is a distinct type — a
//! [`CredentialId`] cannot be passed where a [`Did`] is expected.
//!
//! String-based identifiers validate format at construction time.
//! UUID-backed identifiers are valid by construction and generated from
//! the `uuid` crate's CSPRNG, not a weak pseudo-random source.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Implements `Deserialize` for string newtypes that must validate their
/// contents: deserialize as a plain `String`, then route through the
/// type's `new()` constructor so invalid values are rejected at
/// deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// W3C-style Decentralized Identifier.
///
/// Format: `did:<method>:<method-specific-id>` with a lowercase
/// alphanumeric method and a non-empty identifier part. The stack's own
/// identities use the simplified `did:key:z<hex>` form, where the hex
/// part is the raw Ed25519 public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl_validating_deserialize!(Did);

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let Some(rest) = s.strip_prefix("did:") else {
            return Err(ValidationError::InvalidDid(s.to_string()));
        };
        let Some(pos) = rest.find(':') else {
            return Err(ValidationError::InvalidDid(s.to_string()));
        };

        let method = &rest[..pos];
        let identifier = &rest[pos + 1..];

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        if identifier.is_empty() {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method (between the first and second colons).
    pub fn method(&self) -> &str {
        let rest = &self.0[4..];
        let colon_pos = rest.find(':').expect("validated at construction");
        &rest[..colon_pos]
    }

    /// The method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        let rest = &self.0[4..];
        let colon_pos = rest.find(':').expect("validated at construction");
        &rest[colon_pos + 1..]
    }

    /// The verification-method reference for this identity's signing key.
    ///
    /// Credentials carry `<did>#owner` in their proof, identifying which
    /// key of the issuer produced the signature.
    pub fn verification_method(&self) -> String {
        format!("{}#owner", self.0)
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A credential identifier in `urn:uuid:` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(String);

impl CredentialId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("urn:uuid:{}", Uuid::new_v4()))
    }

    /// Wrap an existing identifier string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A presentation identifier in `urn:uuid:` form.
///
/// Distinct from [`CredentialId`]: a presentation references a credential
/// but has an identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresentationId(String);

impl PresentationId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("urn:uuid:{}", Uuid::new_v4()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PresentationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn did_valid_examples() {
        assert!(Did::new("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK").is_ok());
        assert!(Did::new("did:web:example.edu").is_ok());
        assert!(Did::new(format!("did:key:z{}", "ab".repeat(32))).is_ok());
    }

    #[test]
    fn did_rejects_invalid() {
        assert!(Did::new("").is_err());
        assert!(Did::new("notadid").is_err());
        assert!(Did::new("did:").is_err());
        assert!(Did::new("did::something").is_err());
        assert!(Did::new("did:Key:id").is_err());
        assert!(Did::new("did:method:").is_err());
    }

    #[test]
    fn did_method_extraction() {
        let did = Did::new("did:key:zabc123").unwrap();
        assert_eq!(did.method(), "key");
        assert_eq!(did.method_specific_id(), "zabc123");
    }

    #[test]
    fn did_verification_method_suffix() {
        let did = Did::new("did:key:zabc123").unwrap();
        assert_eq!(did.verification_method(), "did:key:zabc123#owner");
    }

    #[test]
    fn did_deserialization_validates() {
        let ok: Result<Did, _> = serde_json::from_str("\"did:key:zabc\"");
        assert!(ok.is_ok());
        let bad: Result<Did, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }

    #[test]
    fn credential_ids_are_unique() {
        assert_ne!(CredentialId::generate(), CredentialId::generate());
    }

    #[test]
    fn credential_id_has_urn_uuid_form() {
        let id = CredentialId::generate();
        assert!(id.as_str().starts_with("urn:uuid:"));
        assert_eq!(id.as_str().len(), "urn:uuid:".len() + 36);
    }

    #[test]
    fn presentation_ids_are_unique() {
        assert_ne!(
            PresentationId::generate().as_str(),
            PresentationId::generate().as_str()
        );
    }

    #[test]
    fn credential_id_serde_is_transparent() {
        let id = CredentialId::from_string("urn:uuid:test");
        let encoded = serde_json::to_string(&id).unwrap();
        assert_eq!(encoded, "\"urn:uuid:test\"");
        let back: CredentialId = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back, id);
    }
}
