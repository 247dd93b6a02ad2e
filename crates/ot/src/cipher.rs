//! Per-record hybrid cipher
//!
//! Every candidate payload is sealed under a fresh one-time AES-256-GCM key;
//! the key travels through the group-derived XOR mask. Disambiguation rests
//! on wrong-candidate masks failing tag verification, so a key must never be
//! reused across two candidates.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::error::{OtError, Result};

/// Record key length (AES-256)
pub const KEY_BYTES: usize = 32;

/// GCM nonce length
const NONCE_BYTES: usize = 12;

/// GCM tag length
const TAG_BYTES: usize = 16;

/// Seals one payload per fresh key and recovers it on the other side.
pub struct RecordCipher;

impl RecordCipher {
    /// Fresh one-time record key
    pub fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> [u8; KEY_BYTES] {
        let mut key = [0u8; KEY_BYTES];
        rng.fill_bytes(&mut key);
        key
    }

    /// Authenticated-encrypt a payload: base64(nonce || ciphertext || tag)
    pub fn seal<R: RngCore + CryptoRng>(
        rng: &mut R,
        plaintext: &str,
        key: &[u8; KEY_BYTES],
    ) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| OtError::InvalidKeyLength(key.len()))?;

        let mut nonce = [0u8; NONCE_BYTES];
        rng.fill_bytes(&mut nonce);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| OtError::Cipher("AES-GCM encrypt failed".to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_BYTES + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(blob))
    }

    /// Decrypt a sealed blob. Fails on tag mismatch, which recovery treats as
    /// "this candidate is not the match".
    pub fn open(blob: &str, key: &[u8; KEY_BYTES]) -> Result<String> {
        let content = BASE64
            .decode(blob)
            .map_err(|_| OtError::Cipher("invalid base64 blob".to_string()))?;
        if content.len() < NONCE_BYTES + TAG_BYTES {
            return Err(OtError::Cipher("sealed blob too short".to_string()));
        }

        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| OtError::InvalidKeyLength(key.len()))?;

        let (nonce, ciphertext) = content.split_at(NONCE_BYTES);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| OtError::AuthenticationFailed)?;

        String::from_utf8(plaintext)
            .map_err(|_| OtError::Cipher("payload is not UTF-8".to_string()))
    }

    /// Record key as the integer masked by the shared group element
    pub fn key_to_int(key: &[u8; KEY_BYTES]) -> BigUint {
        BigUint::from_bytes_be(key)
    }

    /// Recover key bytes from an unmasked integer, left-padding dropped
    /// leading zeros. Integers wider than the key length cannot be valid
    /// keys: the mask did not cancel.
    pub fn key_from_int(value: &BigUint) -> Result<[u8; KEY_BYTES]> {
        let bytes = value.to_bytes_be();
        if bytes.len() > KEY_BYTES {
            return Err(OtError::InvalidKeyLength(bytes.len()));
        }
        let mut key = [0u8; KEY_BYTES];
        key[KEY_BYTES - bytes.len()..].copy_from_slice(&bytes);
        Ok(key)
    }
}
