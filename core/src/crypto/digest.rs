//! crypto/digest.rs
//! Keyed HMAC-SHA1 digests over arbitrary byte sequences.
//!
//! Design notes:
//! - Stateless one-shot `digest` plus an incremental `SignatureBuilder`; both are
//!   bit-exact over the concatenation of their inputs.
//! - The key is always a parameter, never read from a global.
//! - Verification goes through `Mac::verify_slice` (constant-time compare).

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::constants::DIGEST_LEN;
use crate::crypto::types::{CryptoError, SignatureDigest, SignatureKey};

type HmacSha1 = Hmac<Sha1>;

#[inline]
fn keyed(key: &[u8]) -> HmacSha1 {
    HmacSha1::new_from_slice(key).expect("HMAC can take key of any size")
}

/// HMAC-SHA1 with a key of any length.
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = keyed(key);
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Keyed digest of `data` under a 16-byte signature key.
#[inline]
pub fn digest(key: &SignatureKey, data: &[u8]) -> SignatureDigest {
    let mut builder = SignatureBuilder::new(key);
    builder.update(data);
    builder.finalize()
}

/// Check `data` against an expected digest.
pub fn verify(key: &SignatureKey, data: &[u8], expected: &SignatureDigest) -> Result<(), CryptoError> {
    let mut verifier = SignatureVerifier::new(key, *expected);
    verifier.update(data);
    verifier.finalize()
}

/// Incremental signature builder.
///
/// Feeding `a` then `b` yields the same digest as `digest(key, a ++ b)`.
#[derive(Clone)]
pub struct SignatureBuilder {
    mac: HmacSha1,
    bytes: u64,
}

impl SignatureBuilder {
    pub fn new(key: &SignatureKey) -> Self {
        Self { mac: keyed(key.as_bytes()), bytes: 0 }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.mac.update(data);
        self.bytes += data.len() as u64;
        self
    }

    /// Total bytes fed so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn finalize(self) -> SignatureDigest {
        SignatureDigest::new(self.mac.finalize().into_bytes().into())
    }
}

/// Streaming verifier (bit-exact with `SignatureBuilder`).
pub struct SignatureVerifier {
    mac: HmacSha1,
    expected: SignatureDigest,
}

impl SignatureVerifier {
    pub fn new(key: &SignatureKey, expected: SignatureDigest) -> Self {
        Self { mac: keyed(key.as_bytes()), expected }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.mac.update(data);
    }

    pub fn finalize(self) -> Result<(), CryptoError> {
        self.mac
            .verify_slice(self.expected.as_bytes())
            .map_err(|_| CryptoError::DigestMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::types::FormatVersion;

    #[test]
    fn rfc2202_case_2() {
        let out = hmac_sha1(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(hex::encode(out), "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn kotor1_key_known_answers() {
        let key = FormatVersion::Kotor1.key();
        assert_eq!(digest(&key, b"").to_hex(), "5f5d0d7de34a5c5b9d4e0caed217a6611050669b");
        assert_eq!(digest(&key, b"abc").to_hex(), "bdc1377e759515864a60c25e095df2d3238d2bb7");
    }

    #[test]
    fn kotor2_key_differs() {
        let key = FormatVersion::Kotor2.key();
        assert_eq!(digest(&key, b"abc").to_hex(), "6f1b925abfc88a1a7c8cd4a154f9d52a7e9bcdd3");
    }

    #[test]
    fn builder_counts_bytes() {
        let mut b = SignatureBuilder::new(&FormatVersion::Kotor1.key());
        b.update(b"ab").update(b"c");
        assert_eq!(b.bytes(), 3);
        assert_eq!(b.finalize().to_hex(), "bdc1377e759515864a60c25e095df2d3238d2bb7");
    }
}
