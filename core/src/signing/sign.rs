//! signing/sign.rs
//!
//! Seven-record signature assembly.
//!
//! Design notes:
//! - Flat files are digested whole; HEADER_VARS and DATA are digested as sliced.
//! - HEADER is digested together with a 4-byte little-endian trailer holding the stored
//!   size of `SAVEGAME.sav`, binding the signature to the total file length.
//! - The layout is resolved before any digest runs; a bad header yields no records at all.

use tracing::debug;

use crate::constants::{input_names, FILE_SIZE_TRAILER_LEN};
use crate::crypto::{SignatureBuilder, SignatureDigest, SignatureKey};
use crate::layout::{resolve_layout, SaveLayout, Section};
use crate::signing::types::{SaveInputs, SignatureName, SignatureRecord, SignatureSet, SignedSource, Strategy};
use crate::telemetry::SignCounters;
use crate::types::{Result, SignError};

/// One unit of digest work, borrowing from the inputs.
#[derive(Debug, Clone, Copy)]
enum Job<'a> {
    Whole(&'a [u8]),
    WithSizeTrailer(&'a [u8], [u8; FILE_SIZE_TRAILER_LEN]),
}

impl Job<'_> {
    fn run(&self, key: &SignatureKey) -> (SignatureDigest, u64) {
        let mut builder = SignatureBuilder::new(key);
        match self {
            Job::Whole(bytes) => {
                builder.update(bytes);
            }
            Job::WithSizeTrailer(bytes, trailer) => {
                builder.update(bytes).update(trailer);
            }
        }
        let n = builder.bytes();
        (builder.finalize(), n)
    }
}

/// Little-endian `u32` encoding of the stored composite size.
pub fn file_size_trailer(size: u64) -> Result<[u8; FILE_SIZE_TRAILER_LEN]> {
    let size = u32::try_from(size).map_err(|_| {
        SignError::file_size(input_names::SAVEGAME, format!("{size} bytes does not fit the 4-byte trailer"))
    })?;
    Ok(size.to_le_bytes())
}

fn plan<'a>(inputs: &'a SaveInputs, layout: &SaveLayout) -> Result<Vec<(SignatureName, Job<'a>)>> {
    let trailer = file_size_trailer(inputs.savegame_size)?;

    let jobs = SignatureName::ALL
        .into_iter()
        .map(|name| {
            let job = match name.source() {
                SignedSource::File(input) => Job::Whole(inputs.file(input)),
                SignedSource::Section(Section::Header) => {
                    Job::WithSizeTrailer(layout.slice(Section::Header, &inputs.savegame), trailer)
                }
                SignedSource::Section(section) => Job::Whole(layout.slice(section, &inputs.savegame)),
            };
            (name, job)
        })
        .collect();

    Ok(jobs)
}

/// Compute all seven signatures sequentially.
pub fn sign_save(key: &SignatureKey, inputs: &SaveInputs) -> Result<SignatureSet> {
    sign_save_with(key, inputs, Strategy::Sequential, &mut SignCounters::default())
}

/// Compute all seven signatures with the given strategy, recording into `counters`.
pub fn sign_save_with(
    key: &SignatureKey,
    inputs: &SaveInputs,
    strategy: Strategy,
    counters: &mut SignCounters,
) -> Result<SignatureSet> {
    let layout = resolve_layout(&inputs.savegame)?;
    sign_resolved(key, inputs, &layout, strategy, counters)
}

/// Like `sign_save_with`, over a layout already resolved from `inputs.savegame`.
pub fn sign_resolved(
    key: &SignatureKey,
    inputs: &SaveInputs,
    layout: &SaveLayout,
    strategy: Strategy,
    counters: &mut SignCounters,
) -> Result<SignatureSet> {
    let jobs = plan(inputs, layout)?;

    let results: Vec<(SignatureName, (SignatureDigest, u64))> = match strategy {
        Strategy::Sequential => jobs.iter().map(|(name, job)| (*name, job.run(key))).collect(),
        Strategy::Parallel => run_parallel(key, &jobs)?,
    };

    let mut records = Vec::with_capacity(results.len());
    for (name, (digest, bytes)) in results {
        debug!(signature = %name, digest = %digest, bytes, "computed signature");
        counters.add_digest(bytes);
        records.push(SignatureRecord { name, digest });
    }

    Ok(SignatureSet::from_records(records))
}

fn run_parallel(
    key: &SignatureKey,
    jobs: &[(SignatureName, Job<'_>)],
) -> Result<Vec<(SignatureName, (SignatureDigest, u64))>> {
    let joined = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = jobs
            .iter()
            .map(|(name, job)| s.spawn(move |_| (*name, job.run(key))))
            .collect();
        handles.into_iter().map(|h| h.join()).collect::<std::result::Result<Vec<_>, _>>()
    });

    match joined {
        Ok(Ok(results)) => Ok(results),
        _ => Err(SignError::PipelineError("signing worker panicked")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailer_is_little_endian() {
        assert_eq!(file_size_trailer(200).unwrap(), [0xC8, 0x00, 0x00, 0x00]);
        assert_eq!(file_size_trailer(0x0102_0304).unwrap(), [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn trailer_rejects_sizes_beyond_u32() {
        assert!(matches!(
            file_size_trailer(u64::from(u32::MAX) + 1),
            Err(SignError::FileSizeUnavailable { .. })
        ));
    }
}
