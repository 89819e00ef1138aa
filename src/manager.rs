// src/manager.rs
//! Key lifecycle orchestration: generate, import, retrieve, rotate, delete
//!
//! The manager owns the identifier namespace. Mutating operations
//! (generate/import/rotate/delete) are serialized behind one mutex so a
//! rotation's read-modify-write sequence can never interleave with another
//! mutation; retrieval and listing read the store directly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::buffer::SecureBuffer;
use crate::cipher;
use crate::config;
use crate::consts::{AES_256_KEY_SIZE, KEY_ID_PREFIX};
use crate::enums::EncryptionAlgorithm;
use crate::envelope::CipherEnvelope;
use crate::error::{CryptoError, Result};
use crate::key::{EncryptionKey, KeyMetadata};
use crate::store::KeyStore;

/// What a successful rotation hands back: the replacement key, and the
/// re-encrypted envelope when dependent data was supplied
pub struct RotationOutcome {
    pub key: EncryptionKey,
    pub reencrypted: Option<CipherEnvelope>,
}

impl std::fmt::Display for RotationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rotated '{}', re-encrypted data: {}",
            self.key.identifier(),
            if self.reencrypted.is_some() { "yes" } else { "no" }
        )
    }
}

/// Orchestrates the key lifecycle over an injected [`KeyStore`]
pub struct KeyManager {
    store: Arc<dyn KeyStore>,
    algorithm: EncryptionAlgorithm,
    // Descriptive metadata for keys this instance has seen; the store holds
    // only the material
    metadata: RwLock<HashMap<String, KeyMetadata>>,
    mutation: Mutex<()>,
}

impl KeyManager {
    /// Build a manager over a store, validating the configured algorithm
    pub fn new(store: Arc<dyn KeyStore>) -> Result<Self> {
        let algorithm = EncryptionAlgorithm::resolve(&config::load().crypto.algorithm)?;
        Ok(Self {
            store,
            algorithm,
            metadata: RwLock::new(HashMap::new()),
            mutation: Mutex::new(()),
        })
    }

    pub fn algorithm(&self) -> EncryptionAlgorithm {
        self.algorithm
    }

    /// Create `size_bytes` of fresh random material under `identifier` (or a
    /// synthesized one), persist it, and return the identifier
    pub fn generate_key(&self, size_bytes: usize, identifier: Option<&str>) -> Result<String> {
        let _guard = self.lock_mutations()?;
        let id = self.claim_identifier(identifier)?;

        let key = EncryptionKey::generate(&id, size_bytes)?;
        self.store.put(&id, key.material())?;
        self.remember_metadata(&id, key.metadata().clone())?;

        log::info!(
            "generated {}-bit {} key '{id}' (fingerprint {})",
            key.metadata().bits,
            self.algorithm.name(),
            key.fingerprint()
        );
        Ok(id)
    }

    /// Same as [`generate_key`](Self::generate_key), but with caller-supplied
    /// material — used for migrating externally-generated keys
    pub fn import_key(&self, material: &SecureBuffer, identifier: Option<&str>) -> Result<String> {
        if material.is_empty() {
            return Err(CryptoError::InvalidInput(
                "imported key material must not be empty".into(),
            ));
        }

        let _guard = self.lock_mutations()?;
        let id = self.claim_identifier(identifier)?;

        let metadata = KeyMetadata::for_new_material(material.len());
        self.store.put(&id, material)?;
        self.remember_metadata(&id, metadata)?;

        log::info!(
            "imported {}-byte key '{id}' (fingerprint {})",
            material.len(),
            material.fingerprint()
        );
        Ok(id)
    }

    /// Fetch the key stored under `identifier`
    pub fn retrieve_key(&self, identifier: &str) -> Result<EncryptionKey> {
        let material = self
            .store
            .get(identifier)?
            .ok_or_else(|| missing_key(identifier))?;
        let metadata = self
            .metadata
            .read()
            .map_err(|_| CryptoError::InternalError("metadata lock poisoned".into()))?
            .get(identifier)
            .cloned()
            // Keys that predate this manager instance get descriptive
            // placeholder metadata; it is not authenticated anyway
            .unwrap_or_else(|| KeyMetadata::for_new_material(material.len()));
        Ok(EncryptionKey::from_material(identifier, material, metadata))
    }

    /// Remove the key stored under `identifier`.
    ///
    /// Not idempotent: deleting an absent identifier fails, so callers can
    /// detect double-deletion bugs.
    pub fn delete_key(&self, identifier: &str) -> Result<()> {
        let _guard = self.lock_mutations()?;
        if !self.store.remove(identifier)? {
            return Err(missing_key(identifier));
        }
        self.metadata
            .write()
            .map_err(|_| CryptoError::InternalError("metadata lock poisoned".into()))?
            .remove(identifier);
        log::info!("deleted key '{identifier}'");
        Ok(())
    }

    /// Replace the material under `identifier` with a fresh 32-byte key,
    /// optionally re-encrypting dependent ciphertext.
    ///
    /// `data_to_reencrypt` is decrypted under the old key *before* the key is
    /// replaced — once the old material is gone there is no second chance. If
    /// that decryption fails the key is still replaced, and the failure is
    /// reported as the outcome of the whole operation.
    pub fn rotate_key(
        &self,
        identifier: &str,
        data_to_reencrypt: Option<&CipherEnvelope>,
    ) -> Result<RotationOutcome> {
        let _guard = self.lock_mutations()?;

        let old_material = self
            .store
            .get(identifier)?
            .ok_or_else(|| missing_key(identifier))?;
        let old_metadata = self
            .metadata
            .read()
            .map_err(|_| CryptoError::InternalError("metadata lock poisoned".into()))?
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| KeyMetadata::for_new_material(old_material.len()));
        let old_key = EncryptionKey::from_material(identifier, old_material, old_metadata);

        // Decrypt-before-replace: mandatory ordering
        let recovered = data_to_reencrypt.map(|envelope| cipher::decrypt(envelope, &old_key));

        let new_key = EncryptionKey::generate(identifier, AES_256_KEY_SIZE)?;
        self.store.put(identifier, new_key.material())?;
        self.remember_metadata(identifier, new_key.metadata().clone())?;
        // Old material is wiped here; the store wiped its copy on replacement
        drop(old_key);

        log::info!(
            "rotated key '{identifier}' (new fingerprint {})",
            new_key.fingerprint()
        );

        match recovered {
            None => Ok(RotationOutcome {
                key: new_key,
                reencrypted: None,
            }),
            Some(Err(e)) => {
                log::warn!(
                    "key '{identifier}' was rotated, but the supplied data could not be \
                     decrypted under the old key: {e}"
                );
                Err(e)
            }
            Some(Ok(plaintext)) => {
                let reencrypted = cipher::encrypt(&plaintext, &new_key)?;
                Ok(RotationOutcome {
                    key: new_key,
                    reencrypted: Some(reencrypted),
                })
            }
        }
    }

    /// All currently-stored identifiers, sorted
    pub fn list_key_identifiers(&self) -> Result<Vec<String>> {
        let mut identifiers = self.store.list_identifiers()?;
        identifiers.sort();
        Ok(identifiers)
    }

    fn lock_mutations(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.mutation
            .lock()
            .map_err(|_| CryptoError::InternalError("manager lock poisoned".into()))
    }

    /// Validate a caller-supplied identifier, or synthesize a fresh unique
    /// one. Must be called with the mutation guard held.
    fn claim_identifier(&self, identifier: Option<&str>) -> Result<String> {
        match identifier {
            Some(id) => {
                if id.is_empty() {
                    return Err(CryptoError::InvalidInput(
                        "key identifier must not be empty".into(),
                    ));
                }
                if self.store.get(id)?.is_some() {
                    return Err(CryptoError::InvalidInput(format!(
                        "key identifier '{id}' already exists"
                    )));
                }
                Ok(id.to_string())
            }
            None => self.synthesize_identifier(),
        }
    }

    fn synthesize_identifier(&self) -> Result<String> {
        let id_length = config::load().crypto.id_length_hex;
        loop {
            let raw = cipher::generate_key_material((id_length + 1) / 2)?;
            let mut suffix = raw.to_hex();
            suffix.truncate(id_length);
            let id = format!("{KEY_ID_PREFIX}{suffix}");
            if self.store.get(&id)?.is_none() {
                return Ok(id);
            }
        }
    }

    fn remember_metadata(&self, identifier: &str, metadata: KeyMetadata) -> Result<()> {
        self.metadata
            .write()
            .map_err(|_| CryptoError::InternalError("metadata lock poisoned".into()))?
            .insert(identifier.to_string(), metadata);
        Ok(())
    }
}

fn missing_key(identifier: &str) -> CryptoError {
    CryptoError::StorageOperationFailed(format!("no key found for identifier '{identifier}'"))
}
