// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for all #[derive(...)] enums that represent
//! user-visible choices: encryption algorithms, export formats, etc.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ENCRYPTION_ALGO;
use crate::error::{CryptoError, Result};

/// Supported encryption algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum EncryptionAlgorithm {
    #[default]
    Aes256Gcm,
    // Future:
    // ChaCha20Poly1305,
    // XChaCha20Poly1305,
}

impl EncryptionAlgorithm {
    /// The canonical identifier string for this algorithm
    pub fn name(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Gcm => DEFAULT_ENCRYPTION_ALGO,
        }
    }

    /// Resolve an algorithm identifier string.
    ///
    /// Exactly one identifier is accepted; anything else is rejected rather
    /// than silently falling back.
    pub fn resolve(name: &str) -> Result<Self> {
        if name == DEFAULT_ENCRYPTION_ALGO {
            Ok(EncryptionAlgorithm::Aes256Gcm)
        } else {
            Err(CryptoError::UnsupportedOperation(format!(
                "algorithm '{name}'"
            )))
        }
    }
}

/// Future export formats (JSON, encrypted backup, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum ExportFormat {
    #[default]
    JsonV1,
    // EncryptedBackupV1,
}
