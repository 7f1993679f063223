//! Error types for hybridvault.
//!
//! Failures fall into four closed kinds: configuration, I/O, key
//! serialization and cryptographic operation. Error messages are
//! intentionally minimal. They signal *what* failed without revealing *why*
//! in ways that could leak cryptographic state.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`HybridError`], stable for callers that
/// need to branch on the failure kind rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Io,
    KeySerialization,
    CryptoOperation,
}

/// The single error type for all hybridvault operations.
#[derive(Debug, Error)]
pub enum HybridError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("key serialization error: {0}")]
    KeySerialization(#[from] KeySerializationError),

    #[error("cryptographic operation failed: {0}")]
    Crypto(#[from] CryptoError),
}

impl HybridError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Io { .. } => ErrorKind::Io,
            Self::KeySerialization(_) => ErrorKind::KeySerialization,
            Self::Crypto(_) => ErrorKind::CryptoOperation,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Missing or invalid configuration, including key-length violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required configuration key was absent.
    #[error("missing configuration key `{0}`")]
    MissingKey(&'static str),

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),

    /// Symmetric key length outside [40, 128] bits or not a multiple of 8.
    #[error("incorrect key length: {0} bits")]
    InvalidKeyLength(u32),

    /// RSA modulus size outside the supported range.
    #[error("unsupported RSA key size: {0} bits")]
    InvalidRsaKeySize(usize),

    /// A text file expected to hold an integer held something else.
    #[error("{} does not contain a valid integer", path.display())]
    NotAnInteger { path: PathBuf },
}

/// Failures while encoding or decoding PEM key files.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeySerializationError {
    #[error("could not encode private key")]
    EncodePrivateKey,

    #[error("could not encode public key")]
    EncodePublicKey,

    #[error("malformed private key PEM")]
    MalformedPrivateKey,

    #[error("malformed public key PEM")]
    MalformedPublicKey,
}

/// Failures inside the asymmetric or symmetric primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The system's random number generator failed to produce bytes.
    #[error("randomness source failed")]
    RandomnessFailure,

    /// RSA key pair generation failed.
    #[error("key pair generation failed")]
    KeyGenerationFailure,

    /// A symmetric key had a length the cipher does not accept.
    #[error("invalid key")]
    InvalidKey,

    /// The payload does not fit under OAEP for this modulus.
    #[error("payload of {len} bytes exceeds the {max}-byte OAEP limit")]
    PayloadTooLarge { len: usize, max: usize },

    /// OAEP encryption failed.
    #[error("key wrapping failed")]
    WrapFailed,

    /// OAEP decryption failed. Wrong key and corrupted input are not
    /// distinguished.
    #[error("key unwrapping failed")]
    UnwrapFailed,

    /// Envelope shorter than the IV.
    #[error("envelope of {len} bytes is shorter than the IV")]
    TruncatedEnvelope { len: usize },

    /// Ciphertext portion empty or not a whole number of blocks.
    #[error("ciphertext length {len} is not a positive multiple of the block size")]
    MisalignedCiphertext { len: usize },

    /// The trailing PKCS#7 padding was not well-formed.
    #[error("malformed padding")]
    MalformedPadding,
}

pub type Result<T> = std::result::Result<T, HybridError>;
