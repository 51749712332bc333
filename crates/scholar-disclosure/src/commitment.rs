//! # Attribute Commitments
//!
//! A commitment binds an attribute value to a fresh random opening:
//! `SHA256(canonical(value) || nonce)`. Revealing the value and the
//! opening later proves the value matches what was committed, without
//! exposing it upfront.
//!
//! **NOT ZERO-KNOWLEDGE.** Commitments hide attribute *values*, not the
//! attribute names, their count, or correlation between presentations
//! that reuse a cached record. BBS+-class schemes fix this; this stack
//! deliberately does not implement them.
//!
//! ## Cache Policy
//!
//! Commitment records are ephemeral, keyed by credential id, and held in
//! memory only. The engine owns an explicit cache with a configurable
//! policy rather than a process-global map:
//!
//! - [`CachePolicy::PerSession`]: one record per credential for the
//!   engine's lifetime. Repeated presentations reuse identical digests,
//!   which makes them linkable to each other — acceptable for a holder
//!   presenting to one verifier, observable otherwise.
//! - [`CachePolicy::AlwaysFresh`]: new openings per presentation;
//!   presentations of the same credential are unlinkable through their
//!   commitments.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use scholar_core::{sha256_digest, CanonicalBytes, ContentDigest, Sha256Accumulator};
use scholar_crypto::Nonce;
use scholar_vc::AcademicCredential;

use crate::error::DisclosureError;

/// Compute the commitment digest for one attribute value and opening.
pub fn commit_value(
    value: &serde_json::Value,
    nonce: &Nonce,
) -> Result<ContentDigest, DisclosureError> {
    let canonical = CanonicalBytes::from_value(value.clone())?;
    let mut acc = Sha256Accumulator::new();
    acc.update(canonical.as_bytes());
    acc.update(nonce.as_hex().as_bytes());
    Ok(acc.finalize())
}

/// The commitments and openings for every attribute of one credential.
///
/// One entry per top-level subject attribute, including `id`. Never
/// persisted; a fresh process regenerates openings, so commitments are
/// not stable across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    /// Attribute name → commitment digest.
    pub attributes: BTreeMap<String, ContentDigest>,
    /// Attribute name → random opening.
    pub nonces: BTreeMap<String, Nonce>,
}

impl CommitmentRecord {
    /// Build a record over every subject attribute of `credential`,
    /// drawing a fresh opening per attribute.
    pub fn create(credential: &AcademicCredential) -> Result<Self, DisclosureError> {
        let mut attributes = BTreeMap::new();
        let mut nonces = BTreeMap::new();

        for (name, value) in credential.credential_subject.iter() {
            let nonce = Nonce::generate();
            let digest = commit_value(value, &nonce)?;
            attributes.insert(name.clone(), digest);
            nonces.insert(name.clone(), nonce);
        }

        Ok(Self { attributes, nonces })
    }

    /// The commitment digest for an attribute.
    pub fn commitment(&self, attribute: &str) -> Option<&ContentDigest> {
        self.attributes.get(attribute)
    }

    /// The opening for an attribute.
    pub fn nonce(&self, attribute: &str) -> Option<&Nonce> {
        self.nonces.get(attribute)
    }

    /// Number of committed attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Whether commitment records are reused within an engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Reuse one record per credential for the engine's lifetime.
    /// Presentations of the same credential are linkable.
    PerSession,
    /// Fresh openings for every presentation. Unlinkable, at the cost
    /// of recomputing commitments each time.
    AlwaysFresh,
}

/// A cached record plus the digest of the subject it was built from.
/// Credential ids arrive off the wire, so two different credentials can
/// claim the same id; the digest detects that and forces a rebuild
/// instead of handing out another credential's openings.
struct CachedRecord {
    subject_digest: ContentDigest,
    record: Arc<CommitmentRecord>,
}

/// Engine-owned commitment cache, keyed by credential id.
///
/// Mutex-protected so a multi-threaded host can share one engine. No
/// eviction: the cache lives as long as the engine, which is expected
/// to be session-scoped.
pub struct CommitmentCache {
    policy: CachePolicy,
    records: Mutex<HashMap<String, CachedRecord>>,
}

impl CommitmentCache {
    /// Create a cache with the given policy.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// The configured policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The commitment record for a credential, created lazily on first
    /// request. Under [`CachePolicy::AlwaysFresh`] every call builds a
    /// new record. A cached record is reused only while the credential's
    /// subject is byte-identical to the one it was built from.
    pub fn record_for(
        &self,
        credential: &AcademicCredential,
    ) -> Result<Arc<CommitmentRecord>, DisclosureError> {
        match self.policy {
            CachePolicy::AlwaysFresh => Ok(Arc::new(CommitmentRecord::create(credential)?)),
            CachePolicy::PerSession => {
                let subject_digest =
                    sha256_digest(&CanonicalBytes::new(&credential.credential_subject)?);

                let mut records = self.records.lock();
                if let Some(cached) = records.get(credential.id.as_str()) {
                    if cached.subject_digest == subject_digest {
                        return Ok(Arc::clone(&cached.record));
                    }
                }
                let record = Arc::new(CommitmentRecord::create(credential)?);
                records.insert(
                    credential.id.as_str().to_string(),
                    CachedRecord {
                        subject_digest,
                        record: Arc::clone(&record),
                    },
                );
                Ok(record)
            }
        }
    }

    /// Drop the cached record for one credential.
    pub fn forget(&self, credential_id: &str) {
        self.records.lock().remove(credential_id);
    }
}
