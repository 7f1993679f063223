//! RSA key pairs and symmetric key wrapping.
//!
//! Wrapping uses RSA-OAEP with SHA-256 as both the digest and the MGF1 hash
//! and an empty label. Randomness for key generation, OAEP seeds and
//! decryption blinding comes from the operating system RNG.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{CryptoError, HybridError};
use crate::keys::{RsaKeySize, SymmetricKey};

/// SHA-256 output length in bytes, the `hLen` of the OAEP overhead.
const OAEP_HASH_LEN: usize = 32;

fn oaep() -> Oaep {
    Oaep::new::<Sha256>()
}

/// A freshly generated RSA key pair.
///
/// The public half is always derived from the private half, so both share
/// one modulus.
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("modulus_bits", &(self.public.size() * 8))
            .finish_non_exhaustive()
    }
}

/// Generate an RSA key pair with public exponent 65537.
pub fn generate_key_pair(size: RsaKeySize) -> Result<KeyPair, HybridError> {
    let private = RsaPrivateKey::new(&mut OsRng, size.bits())
        .map_err(|_| CryptoError::KeyGenerationFailure)?;
    let public = RsaPublicKey::from(&private);
    Ok(KeyPair { private, public })
}

/// Largest payload, in bytes, that OAEP-SHA256 can carry under `public`.
pub fn max_payload_len(public: &RsaPublicKey) -> usize {
    public.size().saturating_sub(2 * OAEP_HASH_LEN + 2)
}

/// Encrypt a short payload under `public`.
///
/// The payload length is checked against the OAEP limit first, so an
/// oversized payload yields `PayloadTooLarge` rather than an opaque
/// primitive failure. OAEP is randomised: equal inputs give different
/// outputs.
pub fn encrypt(payload: &[u8], public: &RsaPublicKey) -> Result<Vec<u8>, HybridError> {
    let max = max_payload_len(public);
    if payload.len() > max {
        return Err(CryptoError::PayloadTooLarge {
            len: payload.len(),
            max,
        }
        .into());
    }

    public
        .encrypt(&mut OsRng, oaep(), payload)
        .map_err(|_| CryptoError::WrapFailed.into())
}

/// Decrypt an OAEP ciphertext with `private`.
///
/// Every failure (wrong key, corrupted bytes, bad length) maps to the same
/// `UnwrapFailed` error.
pub fn decrypt(ciphertext: &[u8], private: &RsaPrivateKey) -> Result<Vec<u8>, HybridError> {
    private
        .decrypt_blinded(&mut OsRng, oaep(), ciphertext)
        .map_err(|_| CryptoError::UnwrapFailed.into())
}

/// Wrap a symmetric key for storage.
pub fn wrap_key(key: &SymmetricKey, public: &RsaPublicKey) -> Result<Vec<u8>, HybridError> {
    encrypt(key.as_bytes(), public)
}

/// Recover a symmetric key from its wrapped form.
pub fn unwrap_key(wrapped: &[u8], private: &RsaPrivateKey) -> Result<SymmetricKey, HybridError> {
    decrypt(wrapped, private).map(SymmetricKey::from_bytes)
}
