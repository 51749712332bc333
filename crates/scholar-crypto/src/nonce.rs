//! Commitment openings (nonces).
//!
//! Every attribute commitment binds a value to a fresh 16-byte random
//! opening. Nonces come from the OS CSPRNG — never a seedable or
//! non-cryptographic generator — because a guessable opening lets a
//! verifier brute-force hidden attribute values.

use rand_core::{CryptoRngCore, OsRng};
use serde::{Deserialize, Serialize};

use crate::ed25519::bytes_to_hex;
use crate::error::CryptoError;

/// Length of a commitment opening in bytes.
pub const NONCE_LEN: usize = 16;

/// A random opening for a hash commitment, transported as 32 lowercase
/// hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Nonce(String);

impl Nonce {
    /// Draw a fresh nonce from the OS CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Draw a fresh nonce from the given CSPRNG.
    pub fn generate_with<R: CryptoRngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes_to_hex(&bytes))
    }

    /// Wrap an opening received in a presentation, validating shape.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidNonceLength`] on wrong-length input
    /// and [`CryptoError::HexDecode`] on anything but lowercase hex.
    pub fn from_hex(hex: impl Into<String>) -> Result<Self, CryptoError> {
        let s = hex.into();
        if s.len() != NONCE_LEN * 2 {
            return Err(CryptoError::InvalidNonceLength(s.len()));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(CryptoError::HexDecode(
                "nonce must be lowercase hex".to_string(),
            ));
        }
        Ok(Self(s))
    }

    /// The hex transport form.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

// Route deserialization through `from_hex` so malformed openings are
// rejected at the wire boundary.
impl<'de> Deserialize<'de> for Nonce {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_32_hex_chars() {
        let nonce = Nonce::generate();
        assert_eq!(nonce.as_hex().len(), NONCE_LEN * 2);
        assert!(nonce.as_hex().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn nonces_are_fresh() {
        assert_ne!(Nonce::generate(), Nonce::generate());
    }

    #[test]
    fn from_hex_accepts_well_formed_openings() {
        let nonce = Nonce::from_hex("00112233445566778899aabbccddeeff").unwrap();
        assert_eq!(nonce.as_hex(), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Nonce::from_hex("abcd"),
            Err(CryptoError::InvalidNonceLength(4))
        ));
        assert!(matches!(
            Nonce::from_hex(""),
            Err(CryptoError::InvalidNonceLength(0))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_and_uppercase() {
        assert!(matches!(
            Nonce::from_hex("zz112233445566778899aabbccddeeff"),
            Err(CryptoError::HexDecode(_))
        ));
        assert!(matches!(
            Nonce::from_hex("00112233445566778899AABBCCDDEEFF"),
            Err(CryptoError::HexDecode(_))
        ));
    }

    #[test]
    fn nonce_serde_is_transparent() {
        let nonce = Nonce::from_hex("00112233445566778899aabbccddeeff").unwrap();
        let encoded = serde_json::to_string(&nonce).unwrap();
        assert_eq!(encoded, "\"00112233445566778899aabbccddeeff\"");
        let back: Nonce = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back, nonce);
    }

    #[test]
    fn deserialization_rejects_malformed_openings() {
        assert!(serde_json::from_str::<Nonce>("\"short\"").is_err());
        assert!(serde_json::from_str::<Nonce>("\"ZZ112233445566778899aabbccddeeff\"").is_err());
    }
}
