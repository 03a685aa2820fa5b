//! crypto/hex_codec.rs
//! Hex helpers for displaying and round-tripping digest values.

/// Lowercase hex encoding.
#[inline]
pub fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Inverse of `hex_encode`; accepts either case.
#[inline]
pub fn hex_decode(s: impl AsRef<[u8]>) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s)
}
