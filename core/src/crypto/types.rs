//! crypto/types.rs
//! Key, digest and format-version types for the signature engine.

use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::constants::{keys, version_ids, DIGEST_LEN, KEY_LEN_16};
use crate::crypto::hex_codec::{hex_decode, hex_encode};

/// Save-format versions, each with its own embedded signing key.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum FormatVersion {
    Kotor1 = version_ids::KOTOR1,
    Kotor2 = version_ids::KOTOR2,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 2] = [FormatVersion::Kotor1, FormatVersion::Kotor2];

    pub fn key(self) -> SignatureKey {
        match self {
            FormatVersion::Kotor1 => SignatureKey(keys::KOTOR1),
            FormatVersion::Kotor2 => SignatureKey(keys::KOTOR2),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatVersion::Kotor1 => "kotor1",
            FormatVersion::Kotor2 => "kotor2",
        }
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        FormatVersion::Kotor1
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatVersion {
    type Err = CryptoError;

    /// Accepts `kotor1`/`k1`/`1` and `kotor2`/`k2`/`2`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kotor1" | "k1" | "1" => Ok(FormatVersion::Kotor1),
            "kotor2" | "k2" | "2" => Ok(FormatVersion::Kotor2),
            other => Err(CryptoError::UnknownVersionName(other.to_string())),
        }
    }
}

/// 16-byte HMAC key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SignatureKey([u8; KEY_LEN_16]);

impl SignatureKey {
    pub const fn new(bytes: [u8; KEY_LEN_16]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN_16] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_16,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse 32 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        Self::from_slice(&hex_decode(s.trim())?)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN_16] {
        &self.0
    }
}

impl fmt::Debug for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the version-identifying prefix, not the full secret.
        write!(f, "SignatureKey({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

impl From<FormatVersion> for SignatureKey {
    fn from(v: FormatVersion) -> Self {
        v.key()
    }
}

/// 20-byte HMAC-SHA1 output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureDigest([u8; DIGEST_LEN]);

impl SignatureDigest {
    pub const LEN: usize = DIGEST_LEN;

    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidDigestLen {
            expected: DIGEST_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse exactly 40 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        Self::from_slice(&hex_decode(s.trim())?)
    }

    pub fn to_hex(&self) -> String {
        hex_encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for SignatureDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for SignatureDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SignatureDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureDigest({})", self.to_hex())
    }
}

impl Serialize for SignatureDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SignatureDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SignatureDigest::from_hex(&s).map_err(de::Error::custom)
    }
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key is not 16 bytes.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Digest is not 20 bytes.
    #[error("invalid digest length: expected={expected}, actual={actual}")]
    InvalidDigestLen { expected: usize, actual: usize },

    /// Input is not valid hex.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Unrecognized numeric format version.
    #[error("unknown format version: 0x{raw:02x}")]
    UnknownVersion { raw: u8 },

    /// Unrecognized format version name.
    #[error("unknown format version: {0:?} (expected kotor1 or kotor2)")]
    UnknownVersionName(String),

    /// Computed digest differs from the expected one.
    #[error("signature mismatch")]
    DigestMismatch,
}

impl From<num_enum::TryFromPrimitiveError<FormatVersion>> for CryptoError {
    fn from(e: num_enum::TryFromPrimitiveError<FormatVersion>) -> Self {
        CryptoError::UnknownVersion { raw: e.number }
    }
}
