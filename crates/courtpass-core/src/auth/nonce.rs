//! Sign in with Apple replay-protection nonce.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

const NONCE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVXYZabcdefghijklmnopqrstuvwxyz-._";
const RANDOM_BATCH: usize = 16;

/// A raw nonce and the SHA-256 digest bound to the authorization request.
///
/// The raw value travels with the identity assertion unmodified; only the
/// hash is handed to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Nonce {
    raw: String,
    hashed: String,
}

impl Nonce {
    /// Draw a fresh nonce of `length` characters from the OS CSPRNG.
    pub fn generate(length: usize) -> Result<Self> {
        let raw = random_nonce(length)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let hashed = sha256_hex(&raw);
        Self { raw, hashed }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn hashed(&self) -> &str {
        &self.hashed
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Nonce")
            .field("raw", &"[REDACTED]")
            .field("hashed", &self.hashed)
            .finish()
    }
}

/// Rejection-sample bytes into the nonce alphabet so every symbol is equally likely.
pub fn random_nonce(length: usize) -> Result<String> {
    if length == 0 {
        return Err(Error::InvalidConfiguration(
            "nonce length must be greater than zero".to_string(),
        ));
    }

    let mut result = String::with_capacity(length);
    let mut batch = [0_u8; RANDOM_BATCH];
    while result.len() < length {
        OsRng
            .try_fill_bytes(&mut batch)
            .map_err(|error| Error::AuthProvider(format!("unable to generate nonce: {error}")))?;
        for byte in batch {
            if result.len() == length {
                break;
            }
            if let Some(symbol) = NONCE_CHARSET.get(usize::from(byte)) {
                result.push(char::from(*symbol));
            }
        }
    }
    Ok(result)
}

/// Lowercase hex SHA-256 of the UTF-8 input.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_has_requested_length_and_alphabet() {
        for length in [1, 16, 32, 100] {
            let nonce = random_nonce(length).unwrap();
            assert_eq!(nonce.len(), length);
            assert!(nonce.bytes().all(|byte| NONCE_CHARSET.contains(&byte)));
        }
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(matches!(
            random_nonce(0).unwrap_err(),
            Error::InvalidConfiguration(_)
        ));
    }

    #[test]
    fn consecutive_nonces_differ() {
        assert_ne!(random_nonce(32).unwrap(), random_nonce(32).unwrap());
    }

    #[test]
    fn sha256_matches_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn nonce_keeps_raw_value_and_hashes_it() {
        let nonce = Nonce::generate(32).unwrap();
        assert_eq!(nonce.hashed(), sha256_hex(nonce.raw()));
        assert_eq!(nonce.hashed().len(), 64);
        assert!(!format!("{nonce:?}").contains(nonce.raw()));
    }
}
