//! constants.rs
//! Fixed layout numbers, file names and key material for the save signature format.

/// Fixed size of the `SAVEGAME.sav` header section (bytes 0..160).
pub const SAVE_HEADER_LEN: usize = 160;

/// Leading header fields: 11 little-endian `u32` values.
pub const SAVE_HEADER_FIELDS_LEN: usize = 11 * 4;

/// Byte offset of `entry_count` inside the header.
pub const ENTRY_COUNT_OFFSET: usize = 16;

/// Byte offset of `offset_to_resource_list` inside the header.
pub const RESOURCE_LIST_OFFSET: usize = 28;

/// Each resource list entry occupies 8 bytes after `offset_to_resource_list`.
pub const RESOURCE_ENTRY_LEN: u64 = 8;

/// Width of the file-size trailer appended to HEADER before digesting.
pub const FILE_SIZE_TRAILER_LEN: usize = 4;

/// HMAC-SHA1 output length.
pub const DIGEST_LEN: usize = 20;

/// Signature key length.
pub const KEY_LEN_16: usize = 16;

/// Input file names inside a save folder.
pub mod input_names {
    pub const SCREEN: &str = "Screen.tga";
    pub const PARTY_TABLE: &str = "PARTYTABLE.res";
    pub const GLOBAL_VARS: &str = "GLOBALVARS.res";
    pub const SAVE_INFO: &str = "savenfo.res";
    pub const SAVEGAME: &str = "SAVEGAME.sav";

    /// Read order used by the loader.
    pub const ALL: [&str; 5] = [SCREEN, PARTY_TABLE, GLOBAL_VARS, SAVE_INFO, SAVEGAME];
}

/// Output `.sig` file names.
pub mod sig_names {
    pub const SCREEN: &str = "Screen.sig";
    pub const SAVE_PARTY: &str = "SAVE_PARTY.sig";
    pub const SAVE_VARS: &str = "SAVE_VARS.sig";
    pub const SAVE_INFO: &str = "SAVE_INFO.sig";
    pub const SAVE_HEADER: &str = "SAVE_HEADER.sig";
    pub const SAVE_HEADERVAR: &str = "SAVE_HEADERVAR.sig";
    pub const SAVE_DATA: &str = "SAVE_DATA.sig";
}

/// Key identifiers (mirrored in `FormatVersion`).
pub mod version_ids {
    pub const KOTOR1: u8 = 0x01;
    pub const KOTOR2: u8 = 0x02;
}

/// Embedded signing keys, one per save-format version.
pub mod keys {
    use super::KEY_LEN_16;

    pub const KOTOR1: [u8; KEY_LEN_16] = [
        0x07, 0xDF, 0x71, 0xE6, 0xB1, 0xFB, 0x1C, 0x82,
        0x78, 0x26, 0x68, 0x3C, 0x2A, 0x48, 0x42, 0xD3,
    ];

    pub const KOTOR2: [u8; KEY_LEN_16] = [
        0x67, 0x77, 0x01, 0x4B, 0xB4, 0xAD, 0xE4, 0x21,
        0x8B, 0x3D, 0x98, 0x67, 0xA8, 0xBA, 0x76, 0x3C,
    ];
}
