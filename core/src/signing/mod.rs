//! signing/mod.rs
//! Output assembly: seven keyed digests per save folder, write-back and verification.
//!
//! Output notes:
//! - Four flat files map to `Screen.sig`, `SAVE_PARTY.sig`, `SAVE_VARS.sig`, `SAVE_INFO.sig`.
//! - `SAVEGAME.sav` sections map to `SAVE_HEADER.sig`, `SAVE_HEADERVAR.sig`, `SAVE_DATA.sig`.
//! - `.sig` files hold the raw 20 digest bytes, not hex text.

pub mod types;
pub mod sign;
pub mod persist;
pub mod verify;

pub use types::*;
pub use sign::*;
pub use persist::*;
pub use verify::*;
