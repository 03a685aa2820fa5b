//! signing/persist.rs
//! Confirmed write-back of a signature set as raw 20-byte `.sig` files.

use tracing::{info, warn};

use crate::io::SigSink;
use crate::signing::types::{SignatureName, SignatureSet};
use crate::types::SignError;

/// Outcome of one write-back attempt.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// `false` when the confirmation declined and nothing was touched.
    pub confirmed: bool,
    pub written: Vec<SignatureName>,
    /// One `SignError::OutputWriteFailure` per file that could not be written.
    pub failed: Vec<(SignatureName, SignError)>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.confirmed && self.failed.is_empty()
    }
}

/// Ask `confirm` once, then write every record if it agreed.
///
/// `confirm` sees the full set before anything is written. Existing files are
/// overwritten without further questions.
pub fn persist_signatures<K, F>(set: &SignatureSet, sink: &mut K, confirm: F) -> WriteReport
where
    K: SigSink + ?Sized,
    F: FnOnce(&SignatureSet) -> bool,
{
    if !confirm(set) {
        info!("write-back declined; no .sig files written");
        return WriteReport::default();
    }
    write_signatures(set, sink)
}

/// Write every record unconditionally.
///
/// A failure on one file is recorded and the remaining files are still attempted.
pub fn write_signatures<K: SigSink + ?Sized>(set: &SignatureSet, sink: &mut K) -> WriteReport {
    let mut report = WriteReport { confirmed: true, ..WriteReport::default() };

    for record in set {
        let file = record.name.file_name();
        match sink.write(file, record.digest.as_bytes()) {
            Ok(()) => {
                info!(file, "saved signature");
                report.written.push(record.name);
            }
            Err(e) => {
                warn!(file, error = %e, "failed to save signature");
                report.failed.push((record.name, SignError::output_write(file, e)));
            }
        }
    }

    report
}
