//! savesig-core
//!
//! Layout resolver and keyed signature engine for KotOR save folders.
//! No CLI, no prompts: file access and confirmation are passed in by the caller.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

// Building blocks
pub mod crypto;
pub mod layout;
pub mod io;
pub mod telemetry;

// Output assembly
pub mod signing;
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::SignConfig;
    pub use crate::crypto::{digest, hex_decode, hex_encode, FormatVersion, SignatureDigest, SignatureKey};
    pub use crate::io::{MemorySave, SaveDirectory, SaveSource, SigSink};
    pub use crate::layout::{resolve_layout, SaveLayout, Section};
    pub use crate::pipeline::SignSession;
    pub use crate::signing::{
        persist_signatures, sign_save, verify_signatures, SaveInputs, SignatureName, SignatureRecord,
        SignatureSet, Strategy,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::SignError;
}
