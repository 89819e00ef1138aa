// src/store.rs
//! KeyStore — the injected persistence boundary
//!
//! The manager treats this purely as a capability; any durable medium
//! (encrypted file, OS keychain, remote secret store) may implement it.
//! `InMemoryKeyStore` is the reference implementation used by tests and
//! single-process embedders.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::buffer::SecureBuffer;
use crate::error::{CryptoError, Result};

/// Durable key persistence, keyed by identifier.
///
/// `get` and `remove` signal absence in-band (`None` / `false`) so the
/// caller owns the error wording for a missing key.
pub trait KeyStore: Send + Sync {
    /// Store or replace material under `identifier`
    fn put(&self, identifier: &str, material: &SecureBuffer) -> Result<()>;

    /// Fetch a copy of the material, or `None` if absent
    fn get(&self, identifier: &str) -> Result<Option<SecureBuffer>>;

    /// Remove the material; returns whether anything was removed
    fn remove(&self, identifier: &str) -> Result<bool>;

    /// All currently-stored identifiers
    fn list_identifiers(&self) -> Result<Vec<String>>;
}

/// In-memory implementation of `KeyStore`.
///
/// Data is lost when the process terminates.
pub struct InMemoryKeyStore {
    keys: RwLock<HashMap<String, SecureBuffer>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn put(&self, identifier: &str, material: &SecureBuffer) -> Result<()> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| CryptoError::InternalError("key store lock poisoned".into()))?;
        // Replacing an entry drops the old buffer, which wipes its storage
        keys.insert(identifier.to_string(), material.clone());
        Ok(())
    }

    fn get(&self, identifier: &str) -> Result<Option<SecureBuffer>> {
        let keys = self
            .keys
            .read()
            .map_err(|_| CryptoError::InternalError("key store lock poisoned".into()))?;
        Ok(keys.get(identifier).cloned())
    }

    fn remove(&self, identifier: &str) -> Result<bool> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| CryptoError::InternalError("key store lock poisoned".into()))?;
        Ok(keys.remove(identifier).is_some())
    }

    fn list_identifiers(&self) -> Result<Vec<String>> {
        let keys = self
            .keys
            .read()
            .map_err(|_| CryptoError::InternalError("key store lock poisoned".into()))?;
        Ok(keys.keys().cloned().collect())
    }
}
