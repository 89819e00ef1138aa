// src/consts.rs
//! Shared constants — security parameters and defaults

/// AES-256 key size in bytes
pub const AES_256_KEY_SIZE: usize = 32;

/// AES-GCM initialization vector size in bytes (96 bits)
pub const GCM_IV_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes (128 bits)
pub const GCM_TAG_SIZE: usize = 16;

/// Fixed overhead of a framed envelope: IV prefix + trailing tag
pub const ENVELOPE_OVERHEAD: usize = GCM_IV_SIZE + GCM_TAG_SIZE;

/// Current supported encryption algorithm identifier
pub const DEFAULT_ENCRYPTION_ALGO: &str = "AES-256-GCM";

/// Default number of hex characters in synthesized key identifiers
pub const DEFAULT_ID_LENGTH_HEX: usize = 20;

/// Prefix for synthesized key identifiers
pub const KEY_ID_PREFIX: &str = "key-";

/// Number of hex characters in a short key fingerprint
pub const FINGERPRINT_LENGTH_HEX: usize = 16;
