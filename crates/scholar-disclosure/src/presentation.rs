//! # Selective Disclosure Presentations
//!
//! A presentation is derived from a signed credential: it reveals a
//! chosen subset of subject attributes (with their openings, so the
//! verifier can recompute the commitments) and carries only commitment
//! digests for the rest.
//!
//! The presentation references its source credential by id — it does not
//! own or embed the full credential.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use scholar_core::{ContentDigest, CredentialId, Did, PresentationId, Timestamp};
use scholar_crypto::Nonce;
use scholar_vc::{AcademicCredential, Proof};

use crate::commitment::{CachePolicy, CommitmentCache, CommitmentRecord};
use crate::error::DisclosureError;

/// JSON-LD context attached to every presentation.
const CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Type tags attached to every presentation.
const TYPES: [&str; 2] = ["VerifiablePresentation", "SelectiveDisclosurePresentation"];

/// The reveal data for one disclosed attribute: the value, the opening,
/// and the commitment they must hash to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealedProof {
    /// The disclosed attribute value.
    pub value: serde_json::Value,
    /// The opening drawn at commitment time.
    pub nonce: Nonce,
    /// The commitment digest the verifier recomputes.
    pub commitment: ContentDigest,
}

/// A selective disclosure presentation.
///
/// Invariants, maintained by [`DisclosureEngine::create_presentation`]:
///
/// - `disclosed_attributes` and `proofs` have identical key sets;
/// - `commitments` keys are exactly the subject's keys minus the
///   revealed set;
/// - `hidden_attribute_count + revealed_attribute_count` equals the
///   subject's attribute count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectivePresentation {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Presentation type tags.
    #[serde(rename = "type")]
    pub presentation_type: Vec<String>,

    /// Fresh presentation identifier.
    pub id: PresentationId,

    /// Reference to the source credential.
    #[serde(rename = "credentialId")]
    pub credential_id: CredentialId,

    /// Issuer of the source credential.
    pub issuer: Did,

    /// Issuance date of the source credential.
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,

    /// Copy of the source credential's integrity proof.
    #[serde(rename = "originalProof")]
    pub original_proof: Proof,

    /// Revealed attribute values.
    #[serde(rename = "disclosedAttributes")]
    pub disclosed_attributes: BTreeMap<String, serde_json::Value>,

    /// Commitment digests for hidden attributes only.
    pub commitments: BTreeMap<String, ContentDigest>,

    /// Openings for revealed attributes only.
    pub proofs: BTreeMap<String, RevealedProof>,

    /// Number of hidden attributes.
    #[serde(rename = "hiddenAttributeCount")]
    pub hidden_attribute_count: usize,

    /// Number of revealed attributes.
    #[serde(rename = "revealedAttributeCount")]
    pub revealed_attribute_count: usize,
}

/// The selective disclosure engine.
///
/// Owns the commitment cache (see [`CachePolicy`] for the linkability
/// trade-off) and builds presentations from signed credentials.
pub struct DisclosureEngine {
    cache: CommitmentCache,
}

impl DisclosureEngine {
    /// Create an engine with the given cache policy.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            cache: CommitmentCache::new(policy),
        }
    }

    /// Create an engine with the reference behavior: commitments reused
    /// per credential for the engine's lifetime.
    pub fn session_scoped() -> Self {
        Self::new(CachePolicy::PerSession)
    }

    /// The commitment record for a credential, created lazily.
    ///
    /// Exposed for holders that want to inspect or pre-generate
    /// commitments; `create_presentation` calls this internally.
    pub fn commitments_for(
        &self,
        credential: &AcademicCredential,
    ) -> Result<std::sync::Arc<CommitmentRecord>, DisclosureError> {
        self.cache.record_for(credential)
    }

    /// Build a presentation revealing exactly `reveal` attributes.
    ///
    /// `reveal` may be empty (nothing disclosed, everything committed)
    /// or cover every attribute (fully transparent). A name not present
    /// in the credential subject is an error — silently ignoring it
    /// would let a typo leak an attribute the holder meant to reveal.
    pub fn create_presentation(
        &self,
        credential: &AcademicCredential,
        reveal: &BTreeSet<String>,
    ) -> Result<SelectivePresentation, DisclosureError> {
        for name in reveal {
            if !credential.credential_subject.contains(name) {
                return Err(DisclosureError::UnknownAttribute(name.clone()));
            }
        }

        let record = self.cache.record_for(credential)?;

        let mut disclosed_attributes = BTreeMap::new();
        let mut commitments = BTreeMap::new();
        let mut proofs = BTreeMap::new();

        for (name, value) in credential.credential_subject.iter() {
            let commitment = record
                .commitment(name)
                .expect("record covers every subject attribute")
                .clone();

            if reveal.contains(name) {
                let nonce = record
                    .nonce(name)
                    .expect("record covers every subject attribute")
                    .clone();
                disclosed_attributes.insert(name.clone(), value.clone());
                proofs.insert(
                    name.clone(),
                    RevealedProof {
                        value: value.clone(),
                        nonce,
                        commitment,
                    },
                );
            } else {
                commitments.insert(name.clone(), commitment);
            }
        }

        let hidden_attribute_count = commitments.len();
        let revealed_attribute_count = disclosed_attributes.len();

        tracing::debug!(
            credential_id = %credential.id,
            revealed = revealed_attribute_count,
            hidden = hidden_attribute_count,
            "created selective presentation"
        );

        Ok(SelectivePresentation {
            context: vec![CONTEXT.to_string()],
            presentation_type: TYPES.iter().map(|s| s.to_string()).collect(),
            id: PresentationId::generate(),
            credential_id: credential.id.clone(),
            issuer: credential.issuer.clone(),
            issuance_date: credential.issuance_date.clone(),
            original_proof: credential
                .proof
                .clone()
                .ok_or(DisclosureError::UnsignedCredential)?,
            disclosed_attributes,
            commitments,
            proofs,
            hidden_attribute_count,
            revealed_attribute_count,
        })
    }
}
