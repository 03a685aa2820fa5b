//! config.rs
//! Run configuration: which key to sign with and how to schedule digests.

use serde::{Deserialize, Serialize};

use crate::crypto::{CryptoError, FormatVersion, SignatureKey};
use crate::signing::Strategy;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignConfig {
    /// Selects the embedded key when no custom key is given.
    pub version: FormatVersion,

    /// Overrides `version` when set.
    #[serde(skip)]
    pub custom_key: Option<SignatureKey>,

    pub strategy: Strategy,
}

impl SignConfig {
    pub fn new(version: FormatVersion) -> Self {
        Self { version, ..Self::default() }
    }

    /// Use a custom 16-byte key given as 32 hex characters.
    pub fn with_custom_key_hex(mut self, key_hex: &str) -> Result<Self, CryptoError> {
        self.custom_key = Some(SignatureKey::from_hex(key_hex)?);
        Ok(self)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The key every digest of this run is computed with.
    pub fn key(&self) -> SignatureKey {
        self.custom_key.unwrap_or_else(|| self.version.key())
    }

    /// Short label for logs; never includes key bytes.
    pub fn key_label(&self) -> &'static str {
        match self.custom_key {
            Some(_) => "custom",
            None => self.version.name(),
        }
    }
}
