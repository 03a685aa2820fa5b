//! layout/decode.rs
//!
//! Header decoding and section resolution.
//!
//! Design notes:
//! - Decodes the 11 leading little-endian fields from a buffer of at least 160 bytes.
//! - Only `entry_count` and `offset_to_resource_list` drive the layout; the other fields
//!   are carried for diagnostics and never validated.
//! - All arithmetic on header values is checked; a corrupt header is an error, not a panic.

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace};

use crate::constants::{SAVE_HEADER_FIELDS_LEN, SAVE_HEADER_LEN};
use crate::layout::types::{LayoutError, SaveHeader, SaveLayout, SectionRange};

/// Deserialize the leading fields of a `SAVEGAME.sav` header.
///
/// # Returns
/// - `Ok(SaveHeader)` when `buf` holds at least the 160-byte fixed header.
/// - `Err(LayoutError::BufferTooShort)` otherwise.
#[inline]
pub fn decode_save_header_le(buf: &[u8]) -> Result<SaveHeader, LayoutError> {
    if buf.len() < SaveHeader::LEN {
        return Err(LayoutError::BufferTooShort { have: buf.len(), need: SaveHeader::LEN });
    }

    let mut i = 0usize;
    #[inline] fn get_u32(buf: &[u8], i: &mut usize) -> u32 { let v = LittleEndian::read_u32(&buf[*i..*i + 4]); *i += 4; v }

    let h = SaveHeader {
        signature:                  get_u32(buf, &mut i), // 0..4
        version:                    get_u32(buf, &mut i), // 4..8
        localized_string_count:     get_u32(buf, &mut i), // 8..12
        localized_string_size:      get_u32(buf, &mut i), // 12..16
        entry_count:                get_u32(buf, &mut i), // 16..20
        offset_to_localized_string: get_u32(buf, &mut i), // 20..24
        offset_to_key_list:         get_u32(buf, &mut i), // 24..28
        offset_to_resource_list:    get_u32(buf, &mut i), // 28..32
        build_year:                 get_u32(buf, &mut i), // 32..36
        build_day:                  get_u32(buf, &mut i), // 36..40
        description_str_ref:        get_u32(buf, &mut i), // 40..44
    };

    debug_assert_eq!(i, SAVE_HEADER_FIELDS_LEN, "decoding consumed incorrect length");

    trace!(
        signature = h.signature,
        version = h.version,
        entry_count = h.entry_count,
        offset_to_resource_list = h.offset_to_resource_list,
        "decoded save header"
    );

    Ok(h)
}

/// Split a composite save file into HEADER, HEADER_VARS and DATA.
///
/// `header_vars_len = offset_to_resource_list + 8 * entry_count - 160`.
///
/// Fails when the file is shorter than the header, when the computed length is
/// negative or overflows, or when HEADER_VARS would run past the end of the file.
pub fn resolve_layout(buf: &[u8]) -> Result<SaveLayout, LayoutError> {
    let header_fields = decode_save_header_le(buf)?;
    let header_vars_len = header_fields.header_vars_len()?;

    let header_vars_end = SAVE_HEADER_LEN
        .checked_add(header_vars_len)
        .ok_or(LayoutError::Overflow {
            offset_to_resource_list: header_fields.offset_to_resource_list,
            entry_count: header_fields.entry_count,
        })?;

    if header_vars_end > buf.len() {
        return Err(LayoutError::Overrun { end: header_vars_end as u64, len: buf.len() });
    }

    let layout = SaveLayout {
        header_fields,
        header: SectionRange { start: 0, end: SAVE_HEADER_LEN },
        header_vars: SectionRange { start: SAVE_HEADER_LEN, end: header_vars_end },
        data: SectionRange { start: header_vars_end, end: buf.len() },
        file_len: buf.len(),
    };

    debug!(
        file_len = layout.file_len,
        header_vars = ?layout.header_vars.as_range(),
        data = ?layout.data.as_range(),
        "resolved save layout"
    );

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Section;

    fn save_with(entry_count: u32, offset_to_resource_list: u32, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        buf[16..20].copy_from_slice(&entry_count.to_le_bytes());
        buf[28..32].copy_from_slice(&offset_to_resource_list.to_le_bytes());
        buf
    }

    #[test]
    fn empty_header_vars_when_list_ends_at_header() {
        let buf = save_with(0, 160, 170);
        let layout = resolve_layout(&buf).unwrap();
        assert!(layout.header_vars.is_empty());
        assert_eq!(layout.data.start, 160);
        assert_eq!(layout.slice(Section::Data, &buf).len(), 10);
    }

    #[test]
    fn exactly_header_sized_file_is_valid() {
        let buf = save_with(0, 160, 160);
        let layout = resolve_layout(&buf).unwrap();
        assert!(layout.data.is_empty());
    }

    #[test]
    fn list_ending_before_header_is_negative() {
        let buf = save_with(1, 100, 200);
        assert!(matches!(
            resolve_layout(&buf),
            Err(LayoutError::NegativeHeaderVars { offset_to_resource_list: 100, entry_count: 1 })
        ));
    }

    #[test]
    fn header_vars_ending_exactly_at_eof() {
        let buf = save_with(2, 164, 180);
        let layout = resolve_layout(&buf).unwrap();
        assert_eq!(layout.header_vars.len(), 20);
        assert!(layout.data.is_empty());
    }

    #[test]
    fn header_vars_one_past_eof_overruns() {
        let buf = save_with(2, 164, 179);
        assert!(matches!(resolve_layout(&buf), Err(LayoutError::Overrun { end: 180, len: 179 })));
    }
}
