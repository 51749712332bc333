//! # scholar-disclosure — Selective Disclosure & Predicate Statements
//!
//! Lets a credential holder prove *some* of what a signed credential
//! says without showing all of it:
//!
//! - **Commitments** ([`commitment`]): hash commitments over canonical
//!   attribute values with CSPRNG openings, behind an engine-owned cache
//!   with an explicit [`CachePolicy`].
//! - **Presentations** ([`presentation`]): reveal/hide partitions of a
//!   credential's subject, built by the [`DisclosureEngine`].
//! - **Verification** ([`verify`]): recomputes commitments and, given
//!   the original credential out-of-band, re-verifies the issuer
//!   signature it is bound to.
//! - **Predicates** ([`predicate`]): committed boolean statements such
//!   as `gpa >= 3.0` and two-sided ranges.
//!
//! ## Security Invariants
//!
//! - Commitment openings come from the OS CSPRNG, never a seedable
//!   generator.
//! - Commitments and predicate statements are *hash bindings*, not
//!   zero-knowledge proofs; the issuer's signature on the original
//!   credential is the only real trust anchor. The module docs of
//!   [`commitment`] and [`predicate`] spell out the limits.

pub mod commitment;
pub mod error;
pub mod predicate;
pub mod presentation;
pub mod verify;

// Re-export primary types.
pub use commitment::{commit_value, CachePolicy, CommitmentCache, CommitmentRecord};
pub use error::DisclosureError;
pub use predicate::{
    create_predicate_proof, create_range_proof, Operator, PredicateProof, RangeProof,
};
pub use presentation::{DisclosureEngine, RevealedProof, SelectivePresentation};
pub use verify::{verify_presentation, PresentationChecks, PresentationReport};
