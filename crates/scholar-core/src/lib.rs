//! # scholar-core — Foundational Types for the Scholar Credential Stack
//!
//! Shared building blocks used by every crate in the workspace:
//!
//! - **Canonical serialization** ([`CanonicalBytes`]): the deterministic,
//!   sorted-key byte encoding applied before anything is signed or hashed.
//! - **Content digests** ([`ContentDigest`], [`sha256_digest`]): SHA-256
//!   over canonical bytes, hex-encoded for transport.
//! - **Identifier newtypes** ([`Did`], [`CredentialId`], [`PresentationId`]):
//!   validated, mutually incompatible identifier types.
//! - **Timestamps** ([`Timestamp`]): UTC, truncated to whole seconds so
//!   sub-second formatting never reaches a signature.
//!
//! ## Security Invariants
//!
//! Signing, verification, and digest computation accept only
//! [`CanonicalBytes`]. A value that cannot be canonicalized (for example,
//! one containing a float) cannot be signed.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod timestamp;

// Re-export primary types.
pub use canonical::{CanonicalBytes, CanonicalizationError};
pub use digest::{sha256_digest, ContentDigest, Sha256Accumulator};
pub use error::ValidationError;
pub use identity::{CredentialId, Did, PresentationId};
pub use timestamp::Timestamp;
