//! layout/mod.rs
//! Layout resolver for the composite `SAVEGAME.sav` file.
//!
//! Format notes:
//! - Fixed 160-byte header; sections are located only through fields of that header.
//! - Little-endian across all multi-byte integers.
//! - HEADER, HEADER_VARS and DATA partition the file end-to-end with no gaps.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
