//! # scholar-wallet — Holder-Side Collaborators
//!
//! The pieces a credential holder or issuer runs alongside the core
//! stack:
//!
//! - **Record persistence** ([`store`]): the [`RecordStore`] trait and
//!   an in-memory implementation.
//! - **Identity management** ([`identity`]): keypair generation,
//!   `did:key`-style identifier derivation, the active identity, and
//!   issuer key resolution for verification.

pub mod error;
pub mod identity;
pub mod store;

// Re-export primary types.
pub use error::WalletError;
pub use identity::{IdentityRecord, IdentityWallet};
pub use store::{MemoryStore, RecordStore};
