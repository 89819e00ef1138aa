// src/key.rs
//! Key types and representation utilities
//!
//! This module defines the key object handed out by the manager and
//! multiple string representations (hex, base64, etc.) for keys.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::buffer::SecureBuffer;
use crate::cipher::generate_key_material;
use crate::consts::DEFAULT_ENCRYPTION_ALGO;
use crate::error::{CryptoError, Result};

/// Descriptive key metadata — not authenticated, not secret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMetadata {
    /// Algorithm identifier the key is intended for
    pub algorithm: String,
    /// Key length in bits
    pub bits: usize,
    /// When the key material was created (or last rotated)
    pub created_at: DateTime<Utc>,
}

impl KeyMetadata {
    /// Metadata for freshly created material of `size_bytes`
    pub fn for_new_material(size_bytes: usize) -> Self {
        Self {
            algorithm: DEFAULT_ENCRYPTION_ALGO.to_string(),
            bits: size_bytes * 8,
            created_at: Utc::now(),
        }
    }
}

/// Symmetric key material plus its identifier
#[derive(Clone)]
pub struct EncryptionKey {
    identifier: String,
    material: SecureBuffer,
    metadata: KeyMetadata,
}

impl EncryptionKey {
    /// Wrap existing material under an identifier
    pub fn from_material(identifier: &str, material: SecureBuffer, metadata: KeyMetadata) -> Self {
        Self {
            identifier: identifier.to_string(),
            material,
            metadata,
        }
    }

    /// Generate `size_bytes` of fresh random material under an identifier
    pub fn generate(identifier: &str, size_bytes: usize) -> Result<Self> {
        if size_bytes == 0 {
            return Err(CryptoError::InvalidInput(
                "key size must be at least 1 byte".into(),
            ));
        }
        let material = generate_key_material(size_bytes)?;
        let metadata = KeyMetadata::for_new_material(size_bytes);
        Ok(Self::from_material(identifier, material, metadata))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Borrow the key material (use with caution)
    pub fn material(&self) -> &SecureBuffer {
        &self.material
    }

    pub fn metadata(&self) -> &KeyMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.material.len()
    }

    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }

    /// Short non-secret fingerprint of the material, for logs and listings
    pub fn fingerprint(&self) -> String {
        self.material.fingerprint()
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncryptionKey(id={}, len={}, [REDACTED])",
            self.identifier,
            self.material.len()
        )
    }
}

/// Multiple string representations of a key for export/display
#[derive(Debug, Clone)]
pub struct KeyRepr {
    pub hex: String,
    pub base64: String,
    pub base64url_no_pad: String,
}

pub fn key_representations(key: &EncryptionKey) -> KeyRepr {
    KeyRepr {
        hex: key.material().to_hex(),
        base64: STANDARD.encode(key.material().as_bytes()),
        base64url_no_pad: URL_SAFE_NO_PAD.encode(key.material().as_bytes()),
    }
}
