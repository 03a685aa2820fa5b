//! layout/types.rs
//! Save header struct, section ranges and the resolved layout.
//!
//! Format notes:
//! - `SAVEGAME.sav` opens with a fixed 160-byte header.
//! - The first 44 bytes are 11 little-endian `u32` fields; the remaining 116 bytes are
//!   opaque but still belong to the HEADER section when digested.
//! - HEADER_VARS runs from byte 160 to the end of the resource list
//!   (`offset_to_resource_list + 8 * entry_count`); DATA is everything after.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::SAVE_HEADER_LEN;

/// The 11 leading header fields of `SAVEGAME.sav`, in file order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    pub signature: u32,                  // 0..4   file type tag
    pub version: u32,                    // 4..8   format version tag
    pub localized_string_count: u32,     // 8..12
    pub localized_string_size: u32,      // 12..16
    pub entry_count: u32,                // 16..20 resource entries
    pub offset_to_localized_string: u32, // 20..24
    pub offset_to_key_list: u32,         // 24..28
    pub offset_to_resource_list: u32,    // 28..32
    pub build_year: u32,                 // 32..36
    pub build_day: u32,                  // 36..40
    pub description_str_ref: u32,        // 40..44
}

impl SaveHeader {
    /// Size of the fixed header section, not of the decoded fields.
    pub const LEN: usize = SAVE_HEADER_LEN;

    /// End offset of the resource list, i.e. the end of HEADER_VARS.
    ///
    /// Checked: a corrupted `entry_count` must not wrap.
    pub fn resource_list_end(&self) -> Result<u64, LayoutError> {
        u64::from(self.entry_count)
            .checked_mul(crate::constants::RESOURCE_ENTRY_LEN)
            .and_then(|span| span.checked_add(u64::from(self.offset_to_resource_list)))
            .ok_or(LayoutError::Overflow {
                offset_to_resource_list: self.offset_to_resource_list,
                entry_count: self.entry_count,
            })
    }

    /// `offset_to_resource_list + 8 * entry_count - 160`.
    pub fn header_vars_len(&self) -> Result<usize, LayoutError> {
        let end = self.resource_list_end()?;
        let len = end
            .checked_sub(SAVE_HEADER_LEN as u64)
            .ok_or(LayoutError::NegativeHeaderVars {
                offset_to_resource_list: self.offset_to_resource_list,
                entry_count: self.entry_count,
            })?;
        usize::try_from(len).map_err(|_| LayoutError::Overflow {
            offset_to_resource_list: self.offset_to_resource_list,
            entry_count: self.entry_count,
        })
    }
}

/// Logical sections of the composite save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Header,
    HeaderVars,
    Data,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Header, Section::HeaderVars, Section::Data];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header     => "HEADER",
            Section::HeaderVars => "HEADER_VARS",
            Section::Data       => "DATA",
        };
        f.write_str(name)
    }
}

/// Half-open byte range `[start, end)` inside the composite file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRange {
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    /// Zero for an inverted range, which only a hand-built or deserialized value can hold.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Resolved section boundaries of one composite file.
///
/// Invariant: `header.end == header_vars.start`, `header_vars.end == data.start`,
/// `data.end == file_len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveLayout {
    pub header_fields: SaveHeader,
    pub header: SectionRange,
    pub header_vars: SectionRange,
    pub data: SectionRange,
    pub file_len: usize,
}

impl SaveLayout {
    pub fn range(&self, section: Section) -> SectionRange {
        match section {
            Section::Header     => self.header,
            Section::HeaderVars => self.header_vars,
            Section::Data       => self.data,
        }
    }

    /// Borrow one section out of the file it was resolved from.
    ///
    /// `buf` must be the same bytes passed to `resolve_layout`.
    pub fn slice<'a>(&self, section: Section, buf: &'a [u8]) -> &'a [u8] {
        debug_assert_eq!(buf.len(), self.file_len, "layout applied to a different buffer");
        &buf[self.range(section).as_range()]
    }

    /// All three sections in file order.
    pub fn sections<'a>(&self, buf: &'a [u8]) -> [(Section, &'a [u8]); 3] {
        Section::ALL.map(|s| (s, self.slice(s, buf)))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Composite file shorter than the fixed header.
    #[error("save header too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Resource list ends before the fixed header does.
    #[error("negative HEADER_VARS length: offset_to_resource_list={offset_to_resource_list}, entry_count={entry_count}")]
    NegativeHeaderVars { offset_to_resource_list: u32, entry_count: u32 },

    /// `offset_to_resource_list + 8 * entry_count` does not fit.
    #[error("HEADER_VARS length overflows: offset_to_resource_list={offset_to_resource_list}, entry_count={entry_count}")]
    Overflow { offset_to_resource_list: u32, entry_count: u32 },

    /// HEADER_VARS would end past the end of the file.
    #[error("HEADER_VARS overruns file: ends at {end}, file is {len} bytes")]
    Overrun { end: u64, len: usize },
}
