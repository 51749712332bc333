//! # scholar-vc — Academic Verifiable Credentials
//!
//! Implements the credential model and issuance/verification flows:
//!
//! - **Credential structure** ([`AcademicCredential`]) with a W3C-shaped
//!   envelope and an open attribute subject ([`CredentialSubject`]).
//! - **GPA derivation** from the course list at issuance time.
//! - **Ed25519 proof generation and verification** over the canonical
//!   credential body, using the primitives from `scholar-crypto`.
//!
//! ## Security Invariants
//!
//! - All proof computation canonicalizes through
//!   [`CanonicalBytes`](scholar_core::CanonicalBytes) — never raw
//!   `serde_json::to_vec()`.
//! - Verification returns a [`VerificationReport`]; it never errors for
//!   "does not verify".

pub mod credential;
pub mod error;
pub mod proof;
pub mod subject;

// Re-export primary types.
pub use credential::{AcademicCredential, CredentialChecks, VerificationReport};
pub use error::VcError;
pub use proof::{Proof, ProofPurpose, ProofType};
pub use subject::{calculate_gpa, Course, CredentialSubject};
