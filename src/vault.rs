//! Envelope orchestration.
//!
//! `HybridVault` composes the asymmetric and symmetric layers into the three
//! file operations:
//!
//! ```text
//! generate: SymmetricKey -> KeyPair -> save PEMs -> wrap -> save wrapped key
//! encrypt:  load private key -> unwrap -> read plaintext -> seal -> write
//! decrypt:  load private key -> unwrap -> read envelope -> open -> write
//! ```
//!
//! Each operation re-reads everything it needs. No key material is cached
//! between calls. A failure aborts the operation; files already written by
//! an earlier step are left in place.

use rsa::RsaPrivateKey;
use tracing::{info, warn};

use crate::asymmetric;
use crate::config::{Config, Paths};
use crate::error::HybridError;
use crate::fsio;
use crate::keys::{KeyLength, RsaKeySize, SymmetricKey};
use crate::pem;
use crate::symmetric;

/// The hybrid RSA + CAST5 file vault for one invocation.
#[derive(Debug, Clone)]
pub struct HybridVault {
    paths: Paths,
    key_length: KeyLength,
    rsa_key_size: RsaKeySize,
}

impl HybridVault {
    pub fn new(paths: Paths, key_length: KeyLength, rsa_key_size: RsaKeySize) -> Self {
        Self {
            paths,
            key_length,
            rsa_key_size,
        }
    }

    /// Build a vault from configuration, resolving the key length with
    /// `cli_key_length` as the command-line override.
    pub fn from_config(config: &Config, cli_key_length: Option<u32>) -> Result<Self, HybridError> {
        let key_length = config.resolve_key_length(cli_key_length)?;
        Ok(Self::new(config.paths.clone(), key_length, config.rsa_key_size))
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Generate a key pair and a wrapped symmetric key, and persist all three.
    ///
    /// The symmetric key is wrapped under the public key generated in this
    /// same call, so the wrapped key and the key pair always match.
    pub fn generate_keys(&self) -> Result<(), HybridError> {
        let symmetric_key = symmetric::generate_key(self.key_length)?;
        let pair = asymmetric::generate_key_pair(self.rsa_key_size)?;

        pem::save_private_key(pair.private_key(), &self.paths.private_key)?;
        pem::save_public_key(pair.public_key(), &self.paths.public_key)?;

        let wrapped = asymmetric::wrap_key(&symmetric_key, pair.public_key())?;
        fsio::write_bytes(&wrapped, &self.paths.symmetric_key)?;

        info!(
            key_bits = self.key_length.bits(),
            rsa_bits = self.rsa_key_size.bits(),
            "key generation completed"
        );
        Ok(())
    }

    /// Encrypt `text_file` into `encrypted_file`.
    pub fn encrypt_file(&self) -> Result<(), HybridError> {
        let key = self.recover_symmetric_key()?;

        let plaintext = fsio::read_bytes(&self.paths.text_file)?;
        let envelope = symmetric::encrypt(&key, &plaintext)?;
        fsio::write_bytes(&envelope, &self.paths.encrypted_file)?;

        info!(bytes = envelope.len(), "encryption complete");
        Ok(())
    }

    /// Decrypt `encrypted_file` into `decrypted_file`.
    ///
    /// Nothing is written unless the whole envelope decrypts and unpads.
    pub fn decrypt_file(&self) -> Result<(), HybridError> {
        let key = self.recover_symmetric_key()?;

        let envelope = fsio::read_bytes(&self.paths.encrypted_file)?;
        let plaintext = symmetric::decrypt(&key, &envelope)?;
        fsio::write_bytes(&plaintext, &self.paths.decrypted_file)?;

        info!(bytes = plaintext.len(), "decryption complete");
        Ok(())
    }

    /// Unwrap the stored symmetric key and seal `plaintext` in memory.
    pub fn seal_bytes(&self, plaintext: &[u8]) -> Result<Vec<u8>, HybridError> {
        let key = self.recover_symmetric_key()?;
        symmetric::encrypt(&key, plaintext)
    }

    /// Unwrap the stored symmetric key and open `envelope` in memory.
    pub fn open_bytes(&self, envelope: &[u8]) -> Result<Vec<u8>, HybridError> {
        let key = self.recover_symmetric_key()?;
        symmetric::decrypt(&key, envelope)
    }

    fn recover_symmetric_key(&self) -> Result<SymmetricKey, HybridError> {
        let private = pem::load_private_key(&self.paths.private_key)?;
        self.unwrap_stored_key(&private)
    }

    fn unwrap_stored_key(&self, private: &RsaPrivateKey) -> Result<SymmetricKey, HybridError> {
        let wrapped = fsio::read_bytes(&self.paths.symmetric_key)?;
        let key = asymmetric::unwrap_key(&wrapped, private)?;

        // The stored key carries its own length; it only has to be one CAST5
        // accepts. The configured length matters for generation alone.
        let stored = KeyLength::validate(key.bits())?;
        if stored != self.key_length {
            warn!(
                configured_bits = self.key_length.bits(),
                stored_bits = stored.bits(),
                "stored symmetric key length differs from configuration, using stored key"
            );
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, CryptoError, ErrorKind};
    use std::path::Path;

    fn paths_in(dir: &Path) -> Paths {
        Paths {
            private_key: dir.join("keys/private.pem"),
            public_key: dir.join("keys/public.pem"),
            symmetric_key: dir.join("keys/symmetric.bin"),
            text_file: dir.join("data/plain.txt"),
            encrypted_file: dir.join("data/encrypted.bin"),
            decrypted_file: dir.join("data/decrypted.txt"),
        }
    }

    fn vault(dir: &Path, bits: u32) -> HybridVault {
        HybridVault::new(
            paths_in(dir),
            KeyLength::validate(bits).unwrap(),
            RsaKeySize::validate(1024).unwrap(),
        )
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let v = vault(dir.path(), 128);
        v.generate_keys().unwrap();

        let sealed = v.seal_bytes(b"in memory").unwrap();
        assert_eq!(v.open_bytes(&sealed).unwrap(), b"in memory");
    }

    #[test]
    fn test_encrypt_without_keys_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let v = vault(dir.path(), 128);
        assert_eq!(v.encrypt_file().unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn test_stored_key_length_wins_over_configured() {
        let dir = tempfile::tempdir().unwrap();
        vault(dir.path(), 64).generate_keys().unwrap();

        // A later run with the default length still uses the 64-bit key.
        let later = vault(dir.path(), 128);
        let sealed = later.seal_bytes(b"generated at 64 bits").unwrap();
        assert_eq!(vault(dir.path(), 64).open_bytes(&sealed).unwrap(), b"generated at 64 bits");
        assert_eq!(later.open_bytes(&sealed).unwrap(), b"generated at 64 bits");
    }

    #[test]
    fn test_stored_key_outside_cast5_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let v = vault(dir.path(), 128);
        v.generate_keys().unwrap();

        // Replace the wrapped key with a 4-byte key under the same public key.
        let public = pem::load_public_key(&v.paths().public_key).unwrap();
        let wrapped = asymmetric::encrypt(&[1u8; 4], &public).unwrap();
        fsio::write_bytes(&wrapped, &v.paths().symmetric_key).unwrap();

        let err = v.seal_bytes(b"x").unwrap_err();
        assert!(matches!(
            err,
            HybridError::Configuration(ConfigError::InvalidKeyLength(32))
        ));
    }

    #[test]
    fn test_regenerate_invalidates_old_envelopes() {
        let dir = tempfile::tempdir().unwrap();
        let v = vault(dir.path(), 128);
        v.generate_keys().unwrap();
        let sealed = v.seal_bytes(b"first generation").unwrap();

        v.generate_keys().unwrap();
        // With a new symmetric key the old envelope must not open cleanly to
        // the same bytes.
        match v.open_bytes(&sealed) {
            Ok(bytes) => assert_ne!(bytes, b"first generation"),
            Err(err) => assert!(matches!(
                err,
                HybridError::Crypto(CryptoError::MalformedPadding)
            )),
        }
    }
}
