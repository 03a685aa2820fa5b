use std::io;

use thiserror::Error;

use crate::{crypto::CryptoError, layout::LayoutError};

/// Unified signing error covering input, layout, key and output failures.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Every variant names the file or condition that triggered it.
#[derive(Debug, Error)]
pub enum SignError {
    /// One of the five input files is absent or unreadable.
    #[error("missing input file {name}: {source}")]
    MissingInputFile {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Composite file too short, or HEADER_VARS negative / overflowing / overrunning.
    #[error("malformed SAVEGAME.sav header: {0}")]
    MalformedHeader(#[from] LayoutError),

    /// On-disk size of the composite file could not be obtained or encoded.
    #[error("file size unavailable for {name}: {reason}")]
    FileSizeUnavailable { name: String, reason: String },

    /// Writing one `.sig` file failed.
    #[error("failed to write {name}: {source}")]
    OutputWriteFailure {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Custom key or digest text could not be used.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] CryptoError),

    /// Worker thread panicked under the parallel strategy.
    #[error("pipeline error: {0}")]
    PipelineError(&'static str),
}

impl SignError {
    pub fn missing_input(name: impl Into<String>, source: io::Error) -> Self {
        Self::MissingInputFile { name: name.into(), source }
    }

    pub fn file_size(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::FileSizeUnavailable { name: name.into(), reason: reason.to_string() }
    }

    pub fn output_write(name: impl Into<String>, source: io::Error) -> Self {
        Self::OutputWriteFailure { name: name.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, SignError>;
