//! layout/encode.rs
//!
//! Header encoding, used to build synthetic save files.
//!
//! Design notes:
//! - Writes the 11 leading fields in little-endian order; the remaining header bytes
//!   are the caller's business.
//! - Field order must match `decode.rs` exactly.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::SAVE_HEADER_FIELDS_LEN;
use crate::layout::types::SaveHeader;

/// Serialize the leading fields of a `SaveHeader` into a 44-byte buffer.
#[inline]
pub fn encode_save_header_le(h: &SaveHeader) -> [u8; SAVE_HEADER_FIELDS_LEN] {
    let mut out = [0u8; SAVE_HEADER_FIELDS_LEN];
    let mut i = 0usize;

    fn put_u32(out: &mut [u8], i: &mut usize, v: u32) {
        LittleEndian::write_u32(&mut out[*i..*i + 4], v);
        *i += 4;
    }

    put_u32(&mut out, &mut i, h.signature);                  // 0..4
    put_u32(&mut out, &mut i, h.version);                    // 4..8
    put_u32(&mut out, &mut i, h.localized_string_count);     // 8..12
    put_u32(&mut out, &mut i, h.localized_string_size);      // 12..16
    put_u32(&mut out, &mut i, h.entry_count);                // 16..20
    put_u32(&mut out, &mut i, h.offset_to_localized_string); // 20..24
    put_u32(&mut out, &mut i, h.offset_to_key_list);         // 24..28
    put_u32(&mut out, &mut i, h.offset_to_resource_list);    // 28..32
    put_u32(&mut out, &mut i, h.build_year);                 // 32..36
    put_u32(&mut out, &mut i, h.build_day);                  // 36..40
    put_u32(&mut out, &mut i, h.description_str_ref);        // 40..44

    debug_assert_eq!(i, SAVE_HEADER_FIELDS_LEN, "encoding wrote incorrect length");

    out
}

/// Overwrite the leading fields of an existing header buffer in place.
///
/// Leaves bytes 44..160 untouched. `buf` must hold at least 44 bytes.
pub fn patch_save_header_le(buf: &mut [u8], h: &SaveHeader) {
    buf[..SAVE_HEADER_FIELDS_LEN].copy_from_slice(&encode_save_header_le(h));
}
