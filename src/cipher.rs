// src/cipher.rs
//! Pure cryptographic primitives — no I/O, no storage
//!
//! This module contains only the raw AES-256-GCM encryption/decryption
//! logic and the IV/framing policy. Everything here works on in-memory
//! buffers.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::buffer::SecureBuffer;
use crate::consts::{AES_256_KEY_SIZE, GCM_IV_SIZE};
use crate::envelope::CipherEnvelope;
use crate::error::{CryptoError, Result};
use crate::key::EncryptionKey;

/// Cryptographically secure random bytes of the requested length.
///
/// Used both for fresh key material and for IVs.
pub fn generate_key_material(size_bytes: usize) -> Result<SecureBuffer> {
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(size_bytes)
        .map_err(|e| CryptoError::AllocationFailed(format!("{size_bytes} bytes: {e}")))?;
    bytes.resize(size_bytes, 0);
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::InternalError(format!("system RNG failure: {e}")))?;
    Ok(SecureBuffer::from_vec(bytes))
}

fn build_cipher(key: &EncryptionKey) -> Result<Aes256Gcm> {
    if key.len() != AES_256_KEY_SIZE {
        return Err(CryptoError::InvalidKeySize {
            expected: AES_256_KEY_SIZE,
            actual: key.len(),
        });
    }
    Aes256Gcm::new_from_slice(key.material().as_bytes())
        .map_err(|e| CryptoError::InternalError(format!("cipher init: {e}")))
}

/// Encrypt plaintext under a 32-byte key → framed envelope.
///
/// A fresh random 12-byte IV is drawn on every call; callers never supply
/// one on this path, so IV reuse under a key cannot happen here.
pub fn encrypt(plaintext: &SecureBuffer, key: &EncryptionKey) -> Result<CipherEnvelope> {
    let cipher = build_cipher(key)?;
    let iv = generate_key_material(GCM_IV_SIZE)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(iv.as_bytes()), plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(format!("AES-256-GCM: {e}")))?;

    log::debug!(
        "encrypted {} plaintext bytes under key {}",
        plaintext.len(),
        key.identifier()
    );
    Ok(CipherEnvelope::from_parts(
        &iv,
        &SecureBuffer::from_vec(ciphertext),
    ))
}

/// Decrypt a framed envelope under a 32-byte key → plaintext.
///
/// A failed tag check and a wrong key are reported identically.
pub fn decrypt(envelope: &CipherEnvelope, key: &EncryptionKey) -> Result<SecureBuffer> {
    let cipher = build_cipher(key)?;
    let (iv, ciphertext) = envelope.split()?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(iv.as_bytes()), ciphertext.as_bytes())
        .map_err(|_| {
            CryptoError::DecryptionFailed("authentication failed or ciphertext malformed".into())
        })?;

    Ok(SecureBuffer::from_vec(plaintext))
}

/// Advanced path: encrypt with an optional caller-supplied IV.
///
/// With `iv = None` this matches [`encrypt`] exactly. With a supplied IV the
/// returned bytes are *detached* ciphertext‖tag — the IV is omitted from the
/// framing and the caller is responsible for transmitting it out-of-band.
pub fn encrypt_with_iv(
    plaintext: &SecureBuffer,
    key: &EncryptionKey,
    iv: Option<&SecureBuffer>,
) -> Result<SecureBuffer> {
    let Some(iv) = iv else {
        return Ok(SecureBuffer::new(encrypt(plaintext, key)?.as_bytes()));
    };

    if iv.len() != GCM_IV_SIZE {
        return Err(CryptoError::InvalidInput(format!(
            "IV must be {GCM_IV_SIZE} bytes, got {}",
            iv.len()
        )));
    }
    let cipher = build_cipher(key)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(iv.as_bytes()), plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(format!("AES-256-GCM: {e}")))?;
    Ok(SecureBuffer::from_vec(ciphertext))
}

/// Advanced path: decrypt with an optional caller-supplied IV.
///
/// With `iv = None`, `data` must be a framed envelope and this matches
/// [`decrypt`]. With a supplied IV, `data` is detached ciphertext‖tag.
pub fn decrypt_with_iv(
    data: &SecureBuffer,
    key: &EncryptionKey,
    iv: Option<&SecureBuffer>,
) -> Result<SecureBuffer> {
    let Some(iv) = iv else {
        return decrypt(&CipherEnvelope::from_bytes(data.clone()), key);
    };

    if iv.len() != GCM_IV_SIZE {
        return Err(CryptoError::InvalidInput(format!(
            "IV must be {GCM_IV_SIZE} bytes, got {}",
            iv.len()
        )));
    }
    let cipher = build_cipher(key)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(iv.as_bytes()), data.as_bytes())
        .map_err(|_| {
            CryptoError::DecryptionFailed("authentication failed or ciphertext malformed".into())
        })?;
    Ok(SecureBuffer::from_vec(plaintext))
}
