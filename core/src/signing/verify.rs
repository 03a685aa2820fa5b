//! signing/verify.rs
//! Compare a freshly computed set against the `.sig` files already in a save folder.

use std::io;

use serde::Serialize;
use tracing::debug;

use crate::crypto::SignatureDigest;
use crate::io::SaveSource;
use crate::signing::types::{SignatureName, SignatureSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyStatus {
    Match,
    Mismatch { on_disk: SignatureDigest },
    /// No `.sig` file, or it could not be read.
    Missing,
    /// File present but not exactly 20 bytes.
    Malformed { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyEntry {
    pub name: SignatureName,
    pub computed: SignatureDigest,
    #[serde(flatten)]
    pub status: VerifyStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VerifyReport {
    pub entries: Vec<VerifyEntry>,
}

impl VerifyReport {
    pub fn all_match(&self) -> bool {
        self.entries.iter().all(|e| e.status == VerifyStatus::Match)
    }

    pub fn status(&self, name: SignatureName) -> Option<&VerifyStatus> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.status)
    }
}

/// Check every record of `set` against its `.sig` file in `source`.
pub fn verify_signatures<S: SaveSource + ?Sized>(set: &SignatureSet, source: &S) -> VerifyReport {
    let entries = set
        .iter()
        .map(|record| {
            let status = match source.read(record.name.file_name()) {
                Ok(bytes) => match SignatureDigest::from_slice(&bytes) {
                    Ok(on_disk) if on_disk == record.digest => VerifyStatus::Match,
                    Ok(on_disk) => VerifyStatus::Mismatch { on_disk },
                    Err(_) => VerifyStatus::Malformed { len: bytes.len() },
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => VerifyStatus::Missing,
                Err(e) => {
                    debug!(file = record.name.file_name(), error = %e, "unreadable signature file");
                    VerifyStatus::Missing
                }
            };
            VerifyEntry { name: record.name, computed: record.digest, status }
        })
        .collect();

    VerifyReport { entries }
}
