//! pipeline.rs
//! Stable public API: one `SignSession` per save folder.
//!
//! A session owns the configuration and the telemetry of a run. Each step is a
//! separate call so the caller can print the set and ask for confirmation between
//! signing and write-back.

use tracing::info;

use crate::config::SignConfig;
use crate::io::{load_inputs, SaveSource, SigSink};
use crate::layout::resolve_layout;
use crate::signing::{
    persist_signatures, sign_resolved, verify_signatures, SaveInputs, SignatureSet, VerifyReport,
    WriteReport,
};
use crate::telemetry::{SignCounters, Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::Result;

#[derive(Debug, Clone)]
pub struct SignSession {
    config: SignConfig,
    counters: SignCounters,
    timer: TelemetryTimer,
}

impl SignSession {
    pub fn new(config: SignConfig) -> Self {
        Self { config, counters: SignCounters::default(), timer: TelemetryTimer::new() }
    }

    pub fn config(&self) -> &SignConfig {
        &self.config
    }

    /// Read the five inputs and the stored size of `SAVEGAME.sav`.
    pub fn load<S: SaveSource + ?Sized>(&mut self, source: &S) -> Result<SaveInputs> {
        let inputs = self.timer.time(Stage::Read, || load_inputs(source))?;
        for len in [
            inputs.screen.len(),
            inputs.party_table.len(),
            inputs.global_vars.len(),
            inputs.save_info.len(),
            inputs.savegame.len(),
        ] {
            self.counters.add_read(len);
        }
        Ok(inputs)
    }

    /// Resolve the composite layout and compute all seven signatures.
    pub fn sign(&mut self, inputs: &SaveInputs) -> Result<SignatureSet> {
        // Fail on a bad header before charging any digest time.
        let layout = self.timer.time(Stage::Resolve, || resolve_layout(&inputs.savegame))?;

        let key = self.config.key();
        let strategy = self.config.strategy;
        let counters = &mut self.counters;
        let set = self
            .timer
            .time(Stage::Digest, || sign_resolved(&key, inputs, &layout, strategy, counters))?;

        info!(key = self.config.key_label(), ?strategy, "computed {} signatures", set.len());
        Ok(set)
    }

    /// `load` then `sign`.
    pub fn sign_source<S: SaveSource + ?Sized>(&mut self, source: &S) -> Result<SignatureSet> {
        let inputs = self.load(source)?;
        self.sign(&inputs)
    }

    /// Write `set` through `sink` if `confirm` agrees.
    pub fn persist<K, F>(&mut self, set: &SignatureSet, sink: &mut K, confirm: F) -> WriteReport
    where
        K: SigSink + ?Sized,
        F: FnOnce(&SignatureSet) -> bool,
    {
        let report = self.timer.time(Stage::Write, || persist_signatures(set, sink, confirm));
        self.counters.add_writes(report.written.len(), report.failed.len());
        report
    }

    /// Compare `set` with the `.sig` files already present in `source`.
    pub fn verify<S: SaveSource + ?Sized>(&mut self, set: &SignatureSet, source: &S) -> VerifyReport {
        self.timer.time(Stage::Verify, || verify_signatures(set, source))
    }

    pub fn counters(&self) -> &SignCounters {
        &self.counters
    }

    /// Close the run and take its telemetry.
    pub fn finish(mut self) -> TelemetrySnapshot {
        self.timer.finish();
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }
}
