//! On-disk envelope layout.
//!
//! ```text
//! [ IV (8 bytes) ][ CAST5-CBC ciphertext, a positive multiple of 8 bytes ]
//! ```
//!
//! The layout carries no key length or version tag. The key length is
//! recovered from the wrapped key, not from the envelope.

use crate::error::{CryptoError, HybridError};

/// CAST5 block size in bytes.
pub const BLOCK_LEN: usize = 8;

/// CBC initialisation vector size in bytes (one block).
pub const IV_LEN: usize = BLOCK_LEN;

/// A borrowed, structurally valid envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    iv: &'a [u8; IV_LEN],
    ciphertext: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split `bytes` into IV and ciphertext.
    ///
    /// Fails with `TruncatedEnvelope` when there is not even a full IV, and
    /// with `MisalignedCiphertext` when the remainder is empty or not a
    /// whole number of blocks. Padding is checked later, after decryption.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, HybridError> {
        if bytes.len() < IV_LEN {
            return Err(CryptoError::TruncatedEnvelope { len: bytes.len() }.into());
        }

        let (iv, ciphertext) = bytes.split_at(IV_LEN);
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CryptoError::MisalignedCiphertext {
                len: ciphertext.len(),
            }
            .into());
        }

        let iv: &[u8; IV_LEN] = iv
            .try_into()
            .map_err(|_| CryptoError::TruncatedEnvelope { len: bytes.len() })?;

        Ok(Self { iv, ciphertext })
    }

    pub fn iv(&self) -> &'a [u8; IV_LEN] {
        self.iv
    }

    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }
}

/// Concatenate an IV and ciphertext into the on-disk layout.
pub(crate) fn assemble(iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(iv);
    out.extend_from_slice(ciphertext);
    out
}
