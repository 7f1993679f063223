//! # hybridvault
//!
//! Hybrid (envelope) encryption for files.
//!
//! An RSA key pair protects a randomly generated CAST5 key, and the CAST5
//! key protects the file contents. Three operations tie the pieces together:
//! key generation, file encryption and file decryption.
//!
//! ## Artifacts
//!
//! - private key: PKCS#1 PEM, unencrypted
//! - public key: SubjectPublicKeyInfo PEM
//! - wrapped key: raw RSA-OAEP(SHA-256) ciphertext of the CAST5 key
//! - envelope: `IV (8 bytes) || CAST5-CBC ciphertext` with PKCS#7 padding
//!
//! ## Public API
//!
//! [`HybridVault`] runs the file operations. The `asymmetric` and `symmetric`
//! modules expose the individual layers for callers that manage their own
//! storage.

pub mod asymmetric;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fsio;
pub mod keys;
pub mod pem;
pub mod symmetric;
pub mod vault;

pub use config::{Config, Paths};
pub use error::{ErrorKind, HybridError};
pub use keys::{KeyLength, RsaKeySize, SymmetricKey};
pub use vault::HybridVault;
