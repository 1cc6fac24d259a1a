//! AES-256-GCM encryption of exchange payloads.
//!
//! Output format: 12-byte nonce followed by the ciphertext (tag included).

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use s2s_core::error::AppError;
use s2s_core::result::AppResult;

/// Length of the AES-GCM nonce prefix.
pub const NONCE_LEN: usize = 12;

/// Length of an AES-256 key.
pub const KEY_LEN: usize = 32;

/// Decode a base64 shared key into raw key bytes.
pub fn decode_key(encoded: &str) -> AppResult<[u8; KEY_LEN]> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::encryption(format!("Shared key is not valid base64: {e}")))?;

    <[u8; KEY_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        AppError::encryption(format!(
            "Shared key must be {KEY_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}

/// Encrypt plaintext with a fresh random nonce.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> AppResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| AppError::encryption(format!("Key init failed: {e}")))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| AppError::encryption(format!("Encryption failed: {e}")))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt data produced by [`encrypt`].
pub fn decrypt(key: &[u8; KEY_LEN], blob: &[u8]) -> AppResult<Vec<u8>> {
    if blob.len() < NONCE_LEN {
        return Err(AppError::encryption("Encrypted payload is too short"));
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| AppError::encryption(format!("Key init failed: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|e| AppError::encryption(format!("Decryption failed: {e}")))
}

/// Encrypt and base64-encode, as carried in `EncryptedData::data`.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> AppResult<String> {
    Ok(STANDARD.encode(encrypt(key, plaintext)?))
}

/// Reverse of [`seal`].
pub fn open(key: &[u8; KEY_LEN], data: &str) -> AppResult<Vec<u8>> {
    let blob = STANDARD
        .decode(data)
        .map_err(|e| AppError::encryption(format!("Payload is not valid base64: {e}")))?;
    decrypt(key, &blob)
}
