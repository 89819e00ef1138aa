// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Closed taxonomy of everything that can go wrong in this core.
///
/// Reason strings are safe to log — they never carry key or plaintext bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("invalid envelope format: {0}")]
    InvalidFormat(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("range out of bounds: {0}")]
    OutOfBounds(String),

    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    // Deliberately does not distinguish "wrong key" from "tampered data"
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("storage operation failed: {0}")]
    StorageOperationFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}
