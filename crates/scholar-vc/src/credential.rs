//! # Academic Credential: structure, issuance, verification
//!
//! Defines [`AcademicCredential`], the signed artifact a university
//! hands to a student.
//!
//! ## Security Invariants
//!
//! - **Issuance** canonicalizes the credential body with the `proof`
//!   field removed via [`CanonicalBytes`], signs the bytes with the
//!   issuer's Ed25519 key, and attaches the proof. Raw
//!   `serde_json::to_vec()` never reaches the signing path.
//! - **Verification** recomputes the identical signing input and checks
//!   the signature against the issuer's resolved public key. Signer and
//!   verifier share one `signing_input()`; there is no second encoder to
//!   drift out of sync.
//! - Credentials are immutable after issuance. There is no update
//!   operation; deletion is the storage collaborator's concern.

use serde::{Deserialize, Serialize};

use scholar_core::{CanonicalBytes, CredentialId, Did, Timestamp};
use scholar_crypto::{Ed25519Signature, KeyProvider, VerifyingKey};

use crate::proof::Proof;
use crate::subject::{Course, CredentialSubject};
use crate::error::VcError;

/// JSON-LD contexts attached to every academic credential.
const CONTEXTS: [&str; 2] = [
    "https://www.w3.org/2018/credentials/v1",
    "https://www.w3.org/2018/credentials/examples/v1",
];

/// Type tags attached to every academic credential.
const TYPES: [&str; 2] = ["VerifiableCredential", "AcademicCredential"];

/// A signed academic credential.
///
/// Wire shape follows the W3C VC envelope: `@context`, `id`, `type`,
/// `issuer`, `issuanceDate`, `credentialSubject`, `proof`. The `proof`
/// field is absent while the signing input is computed and present on
/// every issued credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Credential identifier (`urn:uuid:` form, CSPRNG-generated).
    pub id: CredentialId,

    /// Credential type tags.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// DID of the issuing institution.
    pub issuer: Did,

    /// When the credential was issued (UTC, whole seconds).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,

    /// The holder's attributes, including the derived GPA.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: CredentialSubject,

    /// The issuer's integrity proof. `None` only for the transient
    /// pre-signature state inside [`AcademicCredential::issue`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

/// The per-check outcomes of credential verification.
///
/// `expiration` and `revocation` are placeholders: no expiry or
/// revocation data model exists in this stack, so they are always true.
/// A real revocation registry belongs in a separate collaborator, not
/// inside the signature check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialChecks {
    /// Required fields present.
    pub structure: bool,
    /// Signature verifies against the issuer's resolved key.
    pub signature: bool,
    /// Placeholder, always true.
    pub expiration: bool,
    /// Placeholder, always true.
    pub revocation: bool,
}

impl Default for CredentialChecks {
    fn default() -> Self {
        Self {
            structure: false,
            signature: false,
            expiration: true,
            revocation: true,
        }
    }
}

/// The result of verifying a credential.
///
/// Verification never fails with an `Err` for "this does not verify" —
/// it reports `verified: false` with human-readable reasons. Errors are
/// reserved for precondition violations in the calling code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Logical AND of all checks.
    pub verified: bool,
    /// Individual check outcomes.
    pub checks: CredentialChecks,
    /// The claimed issuer, once structure validation has passed.
    pub issuer: Option<Did>,
    /// Human-readable failure reasons.
    pub errors: Vec<String>,
}

impl VerificationReport {
    fn unverified() -> Self {
        Self {
            verified: false,
            checks: CredentialChecks::default(),
            issuer: None,
            errors: Vec::new(),
        }
    }

    fn finalize(mut self) -> Self {
        self.verified = self.checks.structure
            && self.checks.signature
            && self.checks.expiration
            && self.checks.revocation;
        self
    }
}

impl AcademicCredential {
    /// Issue a new signed academic credential.
    ///
    /// Builds the subject (deriving the GPA from `courses`), generates a
    /// fresh credential id, signs the canonical body, and attaches the
    /// proof. Fails rather than returning a partial object: an unsigned
    /// credential must never reach a caller as if valid.
    ///
    /// Persistence is the caller's responsibility.
    pub fn issue(
        issuer: &Did,
        key: &dyn KeyProvider,
        holder: &Did,
        student_name: &str,
        institution: &str,
        degree: &str,
        courses: &[Course],
    ) -> Result<Self, VcError> {
        let subject =
            CredentialSubject::academic(holder, student_name, institution, degree, courses)?;

        let mut credential = Self {
            context: CONTEXTS.iter().map(|s| s.to_string()).collect(),
            id: CredentialId::generate(),
            credential_type: TYPES.iter().map(|s| s.to_string()).collect(),
            issuer: issuer.clone(),
            issuance_date: Timestamp::now(),
            credential_subject: subject,
            proof: None,
        };

        let canonical = credential.signing_input()?;
        let signature = key.sign(&canonical)?;

        credential.proof = Some(Proof::new_assertion(
            issuer.verification_method(),
            signature.to_hex(),
        ));

        tracing::debug!(
            credential_id = %credential.id,
            issuer = %credential.issuer,
            "issued academic credential"
        );

        Ok(credential)
    }

    /// Compute the canonical signing input: the credential body with the
    /// `proof` field removed.
    ///
    /// Both issuance and verification call this; the removal-then-encode
    /// steps must match exactly or honest signatures fail to verify.
    pub fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("proof");
        }
        Ok(CanonicalBytes::from_value(val)?)
    }

    /// Verify this credential.
    ///
    /// `resolve_key` maps an issuer DID to its Ed25519 public key; a
    /// resolution failure is reported as "issuer not found" and no
    /// signature check is attempted.
    pub fn verify<F>(&self, resolve_key: F) -> VerificationReport
    where
        F: Fn(&Did) -> Result<VerifyingKey, String>,
    {
        let mut report = VerificationReport::unverified();

        // Structure: proof and a non-empty subject must be present.
        // On failure, verification halts; remaining checks keep their
        // defaults.
        if self.proof.is_none() || self.credential_subject.is_empty() {
            report.errors.push("invalid credential structure".to_string());
            return report;
        }
        report.checks.structure = true;
        report.issuer = Some(self.issuer.clone());

        let issuer_key = match resolve_key(&self.issuer) {
            Ok(vk) => vk,
            Err(reason) => {
                report
                    .errors
                    .push(format!("issuer not found: {reason}"));
                return report.finalize();
            }
        };

        let canonical = match self.signing_input() {
            Ok(c) => c,
            Err(e) => {
                report
                    .errors
                    .push(format!("canonicalization failed: {e}"));
                return report.finalize();
            }
        };

        let proof = self.proof.as_ref().expect("checked above");
        match Ed25519Signature::from_hex(&proof.signature_value) {
            Ok(sig) => {
                if issuer_key.verify(&canonical, &sig).is_ok() {
                    report.checks.signature = true;
                } else {
                    report
                        .errors
                        .push("signature verification failed".to_string());
                }
            }
            Err(e) => {
                report
                    .errors
                    .push(format!("malformed signature value: {e}"));
            }
        }

        report.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_crypto::LocalKeyProvider;
    use serde_json::json;

    fn issuer_did() -> Did {
        Did::new("did:key:zuniversity").unwrap()
    }

    fn holder_did() -> Did {
        Did::new("did:key:zstudent").unwrap()
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course {
                name: "Algorithms".into(),
                grade: "A".into(),
                credits: 3,
                year: 2024,
            },
            Course {
                name: "Databases".into(),
                grade: "B".into(),
                credits: 3,
                year: 2025,
            },
        ]
    }

    fn issue_sample(key: &LocalKeyProvider) -> AcademicCredential {
        AcademicCredential::issue(
            &issuer_did(),
            key,
            &holder_did(),
            "Alice Chen",
            "Test University",
            "BSc Computer Science",
            &sample_courses(),
        )
        .unwrap()
    }

    fn resolver_for(key: &LocalKeyProvider) -> impl Fn(&Did) -> Result<VerifyingKey, String> {
        let vk = key.verifying_key().unwrap();
        move |_did: &Did| Ok(vk.clone())
    }

    #[test]
    fn issue_attaches_proof_and_derives_gpa() {
        let key = LocalKeyProvider::generate();
        let credential = issue_sample(&key);

        assert!(credential.proof.is_some());
        assert_eq!(credential.credential_subject.gpa(), Some("3.50"));
        assert_eq!(
            credential.proof.as_ref().unwrap().verification_method,
            "did:key:zuniversity#owner"
        );
        assert!(credential.id.as_str().starts_with("urn:uuid:"));
    }

    #[test]
    fn issue_with_empty_courses_has_zero_gpa() {
        let key = LocalKeyProvider::generate();
        let credential = AcademicCredential::issue(
            &issuer_did(),
            &key,
            &holder_did(),
            "Bob",
            "Test University",
            "BA History",
            &[],
        )
        .unwrap();
        assert_eq!(credential.credential_subject.gpa(), Some("0.00"));
    }

    #[test]
    fn signing_input_excludes_proof() {
        let key = LocalKeyProvider::generate();
        let mut credential = issue_sample(&key);

        let with_proof = credential.signing_input().unwrap();
        credential.proof = None;
        let without_proof = credential.signing_input().unwrap();
        assert_eq!(with_proof.as_bytes(), without_proof.as_bytes());
    }

    #[test]
    fn roundtrip_verifies_with_all_checks_true() {
        let key = LocalKeyProvider::generate();
        let credential = issue_sample(&key);

        let report = credential.verify(resolver_for(&key));
        assert!(report.verified, "errors: {:?}", report.errors);
        assert!(report.checks.structure);
        assert!(report.checks.signature);
        assert!(report.checks.expiration);
        assert!(report.checks.revocation);
        assert_eq!(report.issuer, Some(issuer_did()));
        assert!(report.errors.is_empty());
    }

    #[test]
    fn tampered_subject_fails_signature_check() {
        let key = LocalKeyProvider::generate();
        let mut credential = issue_sample(&key);

        // Mutate a single subject field after issuance.
        let mut val = serde_json::to_value(&credential.credential_subject).unwrap();
        val["name"] = json!("Mallory");
        credential.credential_subject =
            CredentialSubject::from_map(val.as_object().unwrap().clone());

        let report = credential.verify(resolver_for(&key));
        assert!(!report.verified);
        assert!(report.checks.structure);
        assert!(!report.checks.signature);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("signature verification failed")));
    }

    #[test]
    fn missing_proof_fails_structure_and_halts() {
        let key = LocalKeyProvider::generate();
        let mut credential = issue_sample(&key);
        credential.proof = None;

        let report = credential.verify(resolver_for(&key));
        assert!(!report.verified);
        assert!(!report.checks.structure);
        assert!(!report.checks.signature);
        // Placeholders keep their defaults.
        assert!(report.checks.expiration);
        assert!(report.checks.revocation);
        assert_eq!(report.issuer, None);
    }

    #[test]
    fn unresolvable_issuer_reports_not_found() {
        let key = LocalKeyProvider::generate();
        let credential = issue_sample(&key);

        let report = credential.verify(|did: &Did| Err(format!("{did} not in directory")));
        assert!(!report.verified);
        assert!(report.checks.structure);
        assert!(!report.checks.signature);
        assert!(report.errors.iter().any(|e| e.contains("issuer not found")));
    }

    #[test]
    fn wrong_issuer_key_fails_signature() {
        let key = LocalKeyProvider::generate();
        let other = LocalKeyProvider::generate();
        let credential = issue_sample(&key);

        let report = credential.verify(resolver_for(&other));
        assert!(!report.verified);
        assert!(!report.checks.signature);
    }

    #[test]
    fn malformed_signature_value_fails_without_panicking() {
        let key = LocalKeyProvider::generate();
        let mut credential = issue_sample(&key);
        credential.proof.as_mut().unwrap().signature_value = "not-hex".to_string();

        let report = credential.verify(resolver_for(&key));
        assert!(!report.verified);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("malformed signature value")));
    }

    #[test]
    fn wire_field_names_match_interchange_format() {
        let key = LocalKeyProvider::generate();
        let credential = issue_sample(&key);
        let val = serde_json::to_value(&credential).unwrap();

        assert!(val.get("@context").is_some());
        assert!(val.get("type").is_some());
        assert!(val.get("issuanceDate").is_some());
        assert!(val.get("credentialSubject").is_some());
        assert!(val.get("proof").is_some());
        assert!(val.get("credential_subject").is_none());
        assert!(val.get("issuance_date").is_none());
    }

    #[test]
    fn credential_json_roundtrip_still_verifies() {
        let key = LocalKeyProvider::generate();
        let credential = issue_sample(&key);

        let encoded = serde_json::to_string(&credential).unwrap();
        let back: AcademicCredential = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back, credential);

        let report = back.verify(resolver_for(&key));
        assert!(report.verified, "errors: {:?}", report.errors);
    }

    #[test]
    fn credential_ids_are_unique_across_issuances() {
        let key = LocalKeyProvider::generate();
        let a = issue_sample(&key);
        let b = issue_sample(&key);
        assert_ne!(a.id, b.id);
    }
}
