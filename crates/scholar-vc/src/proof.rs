//! # Credential Proofs
//!
//! The integrity proof attached to a signed credential. The structure is
//! rigid — unknown fields are rejected on deserialization — and the
//! signature inside covers the canonicalized credential body with the
//! `proof` field removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scholar_core::Timestamp;

/// The signature scheme of a credential proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    /// Ed25519 digital signature over the canonical credential body.
    Ed25519Signature2020,
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofType::Ed25519Signature2020 => write!(f, "Ed25519Signature2020"),
        }
    }
}

/// The purpose of a proof, per the W3C data-integrity vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
    /// Authentication of the credential holder.
    Authentication,
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofPurpose::AssertionMethod => write!(f, "assertionMethod"),
            ProofPurpose::Authentication => write!(f, "authentication"),
        }
    }
}

/// An integrity proof bound to exactly one credential or presentation.
///
/// Recomputed on issuance, never mutated afterwards. The
/// `signature_value` field carries the hex-encoded 64-byte Ed25519
/// signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Proof {
    /// The signature scheme.
    #[serde(rename = "type")]
    pub proof_type: ProofType,

    /// When the proof was created (UTC, whole seconds).
    pub created: DateTime<Utc>,

    /// Reference to the signing key: `<issuer-did>#owner`.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Why the proof exists.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: ProofPurpose,

    /// Hex-encoded signature bytes (128 hex characters for Ed25519).
    #[serde(rename = "signatureValue")]
    pub signature_value: String,
}

impl Proof {
    /// Create an assertion proof with the current timestamp.
    pub fn new_assertion(verification_method: String, signature_value: String) -> Self {
        Self {
            proof_type: ProofType::Ed25519Signature2020,
            created: *Timestamp::now().as_datetime(),
            verification_method,
            proof_purpose: ProofPurpose::AssertionMethod,
            signature_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_wire_field_names() {
        let proof = Proof::new_assertion("did:key:zabc#owner".to_string(), "00".repeat(64));
        let val = serde_json::to_value(&proof).unwrap();

        assert_eq!(val["type"], "Ed25519Signature2020");
        assert_eq!(val["verificationMethod"], "did:key:zabc#owner");
        assert_eq!(val["proofPurpose"], "assertionMethod");
        assert!(val.get("signatureValue").is_some());
        assert!(val.get("created").is_some());
        // No snake_case leakage.
        assert!(val.get("proof_type").is_none());
        assert!(val.get("verification_method").is_none());
        assert!(val.get("signature_value").is_none());
    }

    #[test]
    fn proof_serde_roundtrip() {
        let proof = Proof::new_assertion("did:key:zabc#owner".to_string(), "ab".repeat(64));
        let encoded = serde_json::to_string(&proof).unwrap();
        let back: Proof = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back, proof);
    }

    #[test]
    fn proof_rejects_unknown_fields() {
        let json_str = r#"{
            "type": "Ed25519Signature2020",
            "created": "2026-01-15T12:00:00Z",
            "verificationMethod": "did:key:zabc#owner",
            "proofPurpose": "assertionMethod",
            "signatureValue": "deadbeef",
            "extra": "injected"
        }"#;
        assert!(serde_json::from_str::<Proof>(json_str).is_err());
    }

    #[test]
    fn proof_deserializes_from_wire_json() {
        let json_str = r#"{
            "type": "Ed25519Signature2020",
            "created": "2026-01-15T12:00:00Z",
            "verificationMethod": "did:key:zuni#owner",
            "proofPurpose": "assertionMethod",
            "signatureValue": "deadbeef"
        }"#;
        let proof: Proof = serde_json::from_str(json_str).unwrap();
        assert_eq!(proof.proof_type, ProofType::Ed25519Signature2020);
        assert_eq!(proof.proof_purpose, ProofPurpose::AssertionMethod);
        assert_eq!(proof.signature_value, "deadbeef");
    }

    #[test]
    fn purpose_display() {
        assert_eq!(
            format!("{}", ProofPurpose::AssertionMethod),
            "assertionMethod"
        );
        assert_eq!(format!("{}", ProofPurpose::Authentication), "authentication");
    }

    #[test]
    fn created_has_no_subseconds() {
        let proof = Proof::new_assertion("did:key:zabc#owner".to_string(), String::new());
        assert_eq!(proof.created.timestamp_subsec_nanos(), 0);
    }
}
