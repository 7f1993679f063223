//! Bulk encryption of file contents.
//!
//! This module and `asymmetric` are the only places that touch cipher
//! primitives. Everything else encrypts and decrypts through the functions
//! exposed here.
//!
//! Primitive choices:
//! - **Cipher**: CAST5, 64-bit block, 40..=128-bit key
//! - **Mode**: CBC with PKCS#7 padding
//! - **IV**: 64 bits, generated fresh per operation via `SystemRandom`

use cast5::Cast5;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyInit};
use ring::rand::{SecureRandom, SystemRandom};

use crate::envelope::{self, Envelope, IV_LEN};
use crate::error::{CryptoError, HybridError};
use crate::keys::{KeyLength, SymmetricKey};

type Cast5CbcEnc = cbc::Encryptor<Cast5>;
type Cast5CbcDec = cbc::Decryptor<Cast5>;

/// An IV generated for a single encryption operation.
/// Newtype so an IV can only come from `generate_iv` and is consumed on use.
struct OwnedIv([u8; IV_LEN]);

/// Generate a cryptographically secure random IV.
///
/// A fresh IV is drawn for every encryption call. There is no IV caching or
/// counter-based generation.
fn generate_iv() -> Result<OwnedIv, HybridError> {
    let rng = SystemRandom::new();
    let mut buf = [0u8; IV_LEN];
    rng.fill(&mut buf).map_err(|_| CryptoError::RandomnessFailure)?;
    Ok(OwnedIv(buf))
}

fn cipher_for(key: &SymmetricKey) -> Result<Cast5, HybridError> {
    Cast5::new_from_slice(key.as_bytes()).map_err(|_| CryptoError::InvalidKey.into())
}

/// Generate a random symmetric key of `length.bytes()` bytes.
///
/// This is the only function in the crate that produces symmetric key
/// material from scratch.
pub fn generate_key(length: KeyLength) -> Result<SymmetricKey, HybridError> {
    let rng = SystemRandom::new();
    let mut bytes = vec![0u8; length.bytes()];
    rng.fill(&mut bytes).map_err(|_| CryptoError::RandomnessFailure)?;
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Encrypt `plaintext` with CAST5-CBC under `key`.
///
/// Returns the IV prepended to the ciphertext. A block-aligned plaintext
/// gains a full block of padding, so the output is always
/// `8 + 8 * (plaintext.len() / 8 + 1)` bytes.
///
/// # Layout of returned bytes
/// ```text
/// [ IV (8 bytes) ][ ciphertext ]
/// ```
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>, HybridError> {
    let cipher = cipher_for(key)?;
    let iv = generate_iv()?;

    let encryptor = Cast5CbcEnc::inner_iv_slice_init(cipher, &iv.0)
        .map_err(|_| CryptoError::InvalidKey)?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    Ok(envelope::assemble(&iv.0, &ciphertext))
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// Structural problems (truncated envelope, partial block) and malformed
/// padding are reported as distinct errors. The caller receives no partial
/// plaintext.
pub fn decrypt(key: &SymmetricKey, envelope_bytes: &[u8]) -> Result<Vec<u8>, HybridError> {
    let envelope = Envelope::parse(envelope_bytes)?;
    let cipher = cipher_for(key)?;

    let decryptor = Cast5CbcDec::inner_iv_slice_init(cipher, envelope.iv())
        .map_err(|_| CryptoError::InvalidKey)?;

    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(envelope.ciphertext())
        .map_err(|_| CryptoError::MalformedPadding.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::BLOCK_LEN;

    fn key(bits: u32) -> SymmetricKey {
        generate_key(KeyLength::validate(bits).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_key_length() {
        for bits in [40, 64, 96, 128] {
            assert_eq!(key(bits).bits(), bits);
        }
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = key(128);
        let b = key(128);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_roundtrip() {
        let k = key(128);
        let sealed = encrypt(&k, b"secret message").unwrap();
        assert_eq!(decrypt(&k, &sealed).unwrap(), b"secret message");
    }

    #[test]
    fn test_padding_lengths() {
        let k = key(64);
        assert_eq!(encrypt(&k, b"").unwrap().len(), IV_LEN + BLOCK_LEN);
        assert_eq!(encrypt(&k, b"1234567").unwrap().len(), IV_LEN + BLOCK_LEN);
        // Aligned input gains a whole padding block.
        assert_eq!(encrypt(&k, b"12345678").unwrap().len(), IV_LEN + 2 * BLOCK_LEN);
        assert_eq!(encrypt(&k, b"hello world").unwrap().len(), IV_LEN + 2 * BLOCK_LEN);
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let k = key(128);
        let a = encrypt(&k, b"same input").unwrap();
        let b = encrypt(&k, b"same input").unwrap();
        assert_ne!(a, b);
        assert_ne!(&a[..IV_LEN], &b[..IV_LEN]);
        assert_eq!(decrypt(&k, &a).unwrap(), decrypt(&k, &b).unwrap());
    }

    #[test]
    fn test_short_key_roundtrip() {
        let k = key(40);
        let sealed = encrypt(&k, b"forty bit key").unwrap();
        assert_eq!(decrypt(&k, &sealed).unwrap(), b"forty bit key");
    }

    #[test]
    fn test_invalid_key_rejected() {
        let short = SymmetricKey::from_bytes(vec![1u8; 4]);
        let err = encrypt(&short, b"data").unwrap_err();
        assert!(matches!(err, HybridError::Crypto(CryptoError::InvalidKey)));
    }

    #[test]
    fn test_corrupted_padding_rejected() {
        let k = key(128);
        let mut sealed = encrypt(&k, b"hello world").unwrap();
        // Flipping the previous block's last byte flips the final pad byte
        // from 0x05 to 0x04, leaving an inconsistent pad.
        sealed[IV_LEN + BLOCK_LEN - 1] ^= 0x01;
        let err = decrypt(&k, &sealed).unwrap_err();
        assert!(matches!(err, HybridError::Crypto(CryptoError::MalformedPadding)));
    }
}
