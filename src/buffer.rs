// src/buffer.rs
//! SecureBuffer — the canonical container for secret bytes
//!
//! Everything secret in this crate (keys, plaintext, ciphertext, IVs) lives
//! in a `SecureBuffer`. Backing storage is wiped on drop and on explicit
//! `zeroize()`. Equality is constant-time. Slicing and concatenation always
//! copy — two live buffers never alias the same mutable storage.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroize;

use crate::consts::FINGERPRINT_LENGTH_HEX;
use crate::error::{CryptoError, Result};
use crate::util::blake3_hex;

/// Owned, contiguous secret byte storage
#[derive(Clone)]
pub struct SecureBuffer {
    bytes: Vec<u8>,
}

impl SecureBuffer {
    /// Buffer holding a copy of the given bytes. Never fails.
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Take ownership of an existing allocation without copying
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Buffer of `len` zero bytes
    pub fn zeroed(len: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|e| CryptoError::AllocationFailed(format!("{len} bytes: {e}")))?;
        bytes.resize(len, 0);
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the raw bytes (use with caution)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// New buffer = `a`'s bytes followed by `b`'s bytes
    pub fn concat(a: &SecureBuffer, b: &SecureBuffer) -> SecureBuffer {
        let mut bytes = Vec::with_capacity(a.len() + b.len());
        bytes.extend_from_slice(&a.bytes);
        bytes.extend_from_slice(&b.bytes);
        SecureBuffer { bytes }
    }

    /// Copy of `self[start..end]` as a fresh buffer
    pub fn slice(&self, start: usize, end: usize) -> Result<SecureBuffer> {
        if start > end || end > self.bytes.len() {
            return Err(CryptoError::OutOfBounds(format!(
                "slice {start}..{end} of buffer with length {}",
                self.bytes.len()
            )));
        }
        Ok(SecureBuffer::new(&self.bytes[start..end]))
    }

    /// Split into `(self[..at], self[at..])`, both fresh copies
    pub fn split_at(&self, at: usize) -> Result<(SecureBuffer, SecureBuffer)> {
        if at > self.bytes.len() {
            return Err(CryptoError::OutOfBounds(format!(
                "split at {at} of buffer with length {}",
                self.bytes.len()
            )));
        }
        Ok((
            SecureBuffer::new(&self.bytes[..at]),
            SecureBuffer::new(&self.bytes[at..]),
        ))
    }

    /// Constant-time equality.
    ///
    /// Runs in time proportional to `max(len(a), len(b))` no matter where the
    /// first difference sits. Length is not secret; content is.
    pub fn ct_eq(&self, other: &SecureBuffer) -> bool {
        let len = self.bytes.len().max(other.bytes.len());
        let mut diff = 0u8;
        for i in 0..len {
            let a = self.bytes.get(i).copied().unwrap_or(0);
            let b = other.bytes.get(i).copied().unwrap_or(0);
            diff |= a ^ b;
        }
        diff == 0 && self.bytes.len() == other.bytes.len()
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Decode lowercase or uppercase hex
    pub fn from_hex(encoded: &str) -> Result<SecureBuffer> {
        let bytes = hex::decode(encoded)
            .map_err(|e| CryptoError::InvalidEncoding(format!("hex: {e}")))?;
        Ok(SecureBuffer::from_vec(bytes))
    }

    /// Standard base64 encoding
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Decode standard base64
    pub fn from_base64(encoded: &str) -> Result<SecureBuffer> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::InvalidEncoding(format!("base64: {e}")))?;
        Ok(SecureBuffer::from_vec(bytes))
    }

    /// Overwrite every byte with zero, in place. Idempotent; length is kept.
    pub fn zeroize(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }

    /// Short BLAKE3 fingerprint — a non-secret handle safe for logs and listings
    pub fn fingerprint(&self) -> String {
        let mut digest = blake3_hex(&self.bytes);
        digest.truncate(FINGERPRINT_LENGTH_HEX);
        digest
    }
}

// Constant-time by construction — see ct_eq
impl PartialEq for SecureBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for SecureBuffer {}

impl std::fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureBuffer(len={}, [REDACTED])", self.bytes.len())
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        // Vec zeroize wipes the full capacity, not just the live length
        self.bytes.zeroize();
    }
}
