//! JSON configuration.
//!
//! A settings file maps each file role to a path and optionally fixes the
//! symmetric key length and RSA modulus:
//!
//! ```json
//! {
//!     "private_key": "keys/private.pem",
//!     "public_key": "keys/public.pem",
//!     "symmetric_key": "keys/symmetric.bin",
//!     "text_file": "data/plain.txt",
//!     "encrypted_file": "data/encrypted.bin",
//!     "decrypted_file": "data/decrypted.txt",
//!     "cast_key_length": 128,
//!     "rsa_key_size": 2048,
//!     "key_length": "key_length.txt"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, HybridError};
use crate::fsio;
use crate::keys::{KeyLength, RsaKeySize, DEFAULT_KEY_BITS};

/// Raw settings as they appear on disk. Every field is optional here so
/// that a missing key is reported by name instead of as a parse error.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    private_key: Option<PathBuf>,
    public_key: Option<PathBuf>,
    symmetric_key: Option<PathBuf>,
    text_file: Option<PathBuf>,
    encrypted_file: Option<PathBuf>,
    decrypted_file: Option<PathBuf>,
    cast_key_length: Option<u32>,
    rsa_key_size: Option<usize>,
    key_length: Option<PathBuf>,
}

/// Locations of every artifact the vault reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
    /// The wrapped symmetric key.
    pub symmetric_key: PathBuf,
    pub text_file: PathBuf,
    pub encrypted_file: PathBuf,
    pub decrypted_file: PathBuf,
}

/// A validated configuration. Immutable for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Paths,
    pub cast_key_length: Option<u32>,
    pub rsa_key_size: RsaKeySize,
    pub key_length_file: Option<PathBuf>,
}

fn require(value: Option<PathBuf>, name: &'static str) -> Result<PathBuf, HybridError> {
    value.ok_or_else(|| ConfigError::MissingKey(name).into())
}

impl Config {
    /// Load and validate a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, HybridError> {
        let bytes = fsio::read_bytes(path)?;
        let config = Self::from_json(&bytes)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse settings from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, HybridError> {
        let raw: RawConfig = serde_json::from_slice(bytes)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;

        let paths = Paths {
            private_key: require(raw.private_key, "private_key")?,
            public_key: require(raw.public_key, "public_key")?,
            symmetric_key: require(raw.symmetric_key, "symmetric_key")?,
            text_file: require(raw.text_file, "text_file")?,
            encrypted_file: require(raw.encrypted_file, "encrypted_file")?,
            decrypted_file: require(raw.decrypted_file, "decrypted_file")?,
        };

        let rsa_key_size = match raw.rsa_key_size {
            Some(bits) => RsaKeySize::validate(bits)?,
            None => RsaKeySize::default(),
        };

        Ok(Self {
            paths,
            cast_key_length: raw.cast_key_length,
            rsa_key_size,
            key_length_file: raw.key_length,
        })
    }

    /// Resolve the symmetric key length for this invocation.
    ///
    /// Precedence: an existing `key_length` file, then `cli_override`, then
    /// `cast_key_length`, then 128. Whichever value wins is validated.
    pub fn resolve_key_length(&self, cli_override: Option<u32>) -> Result<KeyLength, HybridError> {
        let bits = match self.key_length_file.as_deref().filter(|p| p.is_file()) {
            Some(file) => fsio::read_int_from_text_file(file)?,
            None => cli_override
                .or(self.cast_key_length)
                .unwrap_or(DEFAULT_KEY_BITS),
        };
        KeyLength::validate(bits)
    }
}
