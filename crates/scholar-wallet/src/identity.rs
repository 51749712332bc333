//! # Identity Wallet
//!
//! Holder- and issuer-side identity management: Ed25519 keypair
//! generation, `did:key`-style identifier derivation, and issuer
//! public-key resolution for credential verification.
//!
//! The DID form is the simplified `did:key:z<hex>`, where the hex part
//! is the raw 32-byte Ed25519 public key. That makes every identity
//! self-certifying: the verifying key can be recovered from the
//! identifier alone, which is the resolution fallback for identities
//! not present in the wallet's directory.
//!
//! Public identity records go through the [`RecordStore`]; signing keys
//! never do. They stay in an in-process map and are zeroized on drop.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use scholar_core::{Did, Timestamp};
use scholar_crypto::{KeyProvider, LocalKeyProvider, VerifyingKey};

use crate::error::WalletError;
use crate::store::{MemoryStore, RecordStore};

/// Store collection holding identity records.
const IDENTITY_COLLECTION: &str = "identities";

/// The public part of a wallet identity, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// The identity's DID, which doubles as the record id.
    pub id: Did,
    /// Human-readable label, unique only by convention.
    pub alias: String,
    /// The Ed25519 public key, 64 lowercase hex characters.
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// When the identity was created.
    pub created: Timestamp,
}

/// Manages keypairs and their DIDs.
pub struct IdentityWallet {
    store: Box<dyn RecordStore>,
    keys: RwLock<HashMap<String, Arc<LocalKeyProvider>>>,
    active: RwLock<Option<Did>>,
}

impl IdentityWallet {
    /// Create a wallet over an in-memory store.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Create a wallet over an existing record store.
    ///
    /// Only identity records persist through the store; signing keys
    /// are process-local, so identities loaded from a pre-populated
    /// store can verify but not sign.
    pub fn with_store(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            keys: RwLock::new(HashMap::new()),
            active: RwLock::new(None),
        }
    }

    /// Generate a new identity: a fresh Ed25519 keypair and the DID
    /// derived from its public key. The first identity created becomes
    /// the active one.
    pub fn create_identity(&self, alias: &str) -> Result<Did, WalletError> {
        let provider = LocalKeyProvider::generate();
        let public_key = provider.verifying_key()?.to_hex();
        let did = Did::new(format!("did:key:z{public_key}"))?;

        let record = IdentityRecord {
            id: did.clone(),
            alias: alias.to_string(),
            public_key,
            created: Timestamp::now(),
        };
        self.store
            .save(IDENTITY_COLLECTION, serde_json::to_value(&record)?)?;
        self.keys
            .write()
            .insert(did.as_str().to_string(), Arc::new(provider));

        let mut active = self.active.write();
        if active.is_none() {
            *active = Some(did.clone());
        }

        tracing::debug!(did = %did, alias, "created identity");
        Ok(did)
    }

    /// Fetch one identity record.
    pub fn identity(&self, did: &Did) -> Result<Option<IdentityRecord>, WalletError> {
        match self.store.get(IDENTITY_COLLECTION, did.as_str())? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Every identity known to the wallet.
    pub fn identities(&self) -> Result<Vec<IdentityRecord>, WalletError> {
        self.store
            .get_all(IDENTITY_COLLECTION)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(WalletError::from))
            .collect()
    }

    /// The currently active identity, if any.
    pub fn active_identity(&self) -> Option<Did> {
        self.active.read().clone()
    }

    /// Switch the active identity to one the wallet holds a key for.
    pub fn set_active(&self, did: &Did) -> Result<(), WalletError> {
        if !self.keys.read().contains_key(did.as_str()) {
            return Err(WalletError::UnknownIdentity(did.as_str().to_string()));
        }
        *self.active.write() = Some(did.clone());
        Ok(())
    }

    /// The signing provider for an identity, for credential issuance.
    pub fn signing_provider(&self, did: &Did) -> Result<Arc<dyn KeyProvider>, WalletError> {
        self.keys
            .read()
            .get(did.as_str())
            .map(|provider| Arc::clone(provider) as Arc<dyn KeyProvider>)
            .ok_or_else(|| WalletError::UnknownIdentity(did.as_str().to_string()))
    }

    /// Resolve a DID to its Ed25519 verifying key.
    ///
    /// Looks in the wallet's identity directory first. For `did:key`
    /// identifiers not found there, falls back to recovering the key
    /// embedded in the identifier itself.
    pub fn resolve(&self, did: &Did) -> Result<VerifyingKey, String> {
        if let Ok(Some(record)) = self.identity(did) {
            return VerifyingKey::from_hex(&record.public_key).map_err(|e| e.to_string());
        }

        if did.method() == "key" {
            if let Some(hex) = did.method_specific_id().strip_prefix('z') {
                return VerifyingKey::from_hex(hex)
                    .map_err(|e| format!("cannot recover key from {did}: {e}"));
            }
        }

        Err(format!("no identity record for {did}"))
    }

    /// A resolution closure in the shape credential verification
    /// expects.
    pub fn resolver(&self) -> impl Fn(&Did) -> Result<VerifyingKey, String> + '_ {
        move |did| self.resolve(did)
    }
}

impl Default for IdentityWallet {
    fn default() -> Self {
        Self::new()
    }
}
