//! telemetry/counters.rs
//! Mutable counters collected during one signing run.
//!
//! Summary: file reads, digested bytes and write-back outcomes.
//! Converted into an immutable `TelemetrySnapshot` at the end of the run.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignCounters {
    pub files_read: u64,
    pub bytes_read: u64,
    pub digests: u64,
    pub bytes_digested: u64,
    pub writes_ok: u64,
    pub writes_failed: u64,
}

impl SignCounters {
    pub fn add_read(&mut self, len: usize) {
        self.files_read += 1;
        self.bytes_read += len as u64;
    }

    /// Record one computed signature over `bytes` bytes (trailer included).
    pub fn add_digest(&mut self, bytes: u64) {
        self.digests += 1;
        self.bytes_digested += bytes;
    }

    pub fn add_writes(&mut self, ok: usize, failed: usize) {
        self.writes_ok += ok as u64;
        self.writes_failed += failed as u64;
    }

    pub fn merge(&mut self, other: &SignCounters) {
        self.files_read += other.files_read;
        self.bytes_read += other.bytes_read;
        self.digests += other.digests;
        self.bytes_digested += other.bytes_digested;
        self.writes_ok += other.writes_ok;
        self.writes_failed += other.writes_failed;
    }
}

impl AddAssign for SignCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
