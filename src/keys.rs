//! Key sizes and symmetric key ownership.
//!
//! This module owns two responsibilities:
//! 1. Validating the configurable sizes: the CAST5 key length and the RSA
//!    modulus. No key is generated from an unvalidated size.
//! 2. Holding symmetric key material in a type that is opaque,
//!    non-cloneable, and zeroised on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ConfigError, HybridError};

/// Smallest accepted symmetric key length in bits.
pub const MIN_KEY_BITS: u32 = 40;

/// Largest accepted symmetric key length in bits.
pub const MAX_KEY_BITS: u32 = 128;

/// Symmetric key lengths must be whole bytes.
pub const KEY_BITS_MULTIPLE: u32 = 8;

/// Symmetric key length used when nothing else is configured.
pub const DEFAULT_KEY_BITS: u32 = 128;

/// RSA modulus bounds and default, in bits.
pub const MIN_RSA_BITS: usize = 1024;
pub const MAX_RSA_BITS: usize = 4096;
pub const DEFAULT_RSA_BITS: usize = 2048;

// ---------------------------------------------------------------------------
// Symmetric key length
// ---------------------------------------------------------------------------

/// A symmetric key length that has passed validation.
///
/// The only way to obtain one is [`KeyLength::validate`] (or `Default`), so
/// holding a `KeyLength` is proof the bound was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLength(u32);

impl KeyLength {
    /// Accept `bits` only when `40 <= bits <= 128` and `bits % 8 == 0`.
    pub fn validate(bits: u32) -> Result<Self, HybridError> {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) || bits % KEY_BITS_MULTIPLE != 0 {
            return Err(ConfigError::InvalidKeyLength(bits).into());
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn bytes(self) -> usize {
        (self.0 / 8) as usize
    }
}

impl Default for KeyLength {
    fn default() -> Self {
        Self(DEFAULT_KEY_BITS)
    }
}

// ---------------------------------------------------------------------------
// RSA modulus size
// ---------------------------------------------------------------------------

/// A validated RSA modulus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaKeySize(usize);

impl RsaKeySize {
    pub fn validate(bits: usize) -> Result<Self, HybridError> {
        if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&bits) || bits % 8 != 0 {
            return Err(ConfigError::InvalidRsaKeySize(bits).into());
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> usize {
        self.0
    }
}

impl Default for RsaKeySize {
    fn default() -> Self {
        Self(DEFAULT_RSA_BITS)
    }
}

// ---------------------------------------------------------------------------
// Symmetric key
// ---------------------------------------------------------------------------

/// A CAST5 key.
///
/// - Not `Clone`. Exists only for the duration of one operation.
/// - Zeroised on drop.
/// - Never persisted in the clear; only its wrapped form reaches disk.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    /// Take ownership of raw key bytes, e.g. after unwrapping.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Length of the key in bits.
    pub fn bits(&self) -> u32 {
        (self.bytes.len() * 8) as u32
    }

    /// `pub(crate)`: raw bytes leave the crate only in wrapped form.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
