pub mod types;
pub mod hex_codec;
pub mod digest;

pub use types::*;
pub use hex_codec::*;
pub use digest::*;
