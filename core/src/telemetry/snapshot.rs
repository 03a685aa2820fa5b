//! telemetry/snapshot.rs
//!
//! Immutable end-of-run telemetry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::SignCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub files_read: u64,
    pub bytes_read: u64,
    pub digests: u64,
    pub bytes_digested: u64,
    pub writes_ok: u64,
    pub writes_failed: u64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &SignCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_digested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            files_read: counters.files_read,
            bytes_read: counters.bytes_read,
            digests: counters.digests,
            bytes_digested: counters.bytes_digested,
            writes_ok: counters.writes_ok,
            writes_failed: counters.writes_failed,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.stage_times.contains(*s))
    }

    /// Stage times never exceed wall time.
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
