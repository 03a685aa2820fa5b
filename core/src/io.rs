//! io.rs
//! Read/write capabilities the pipeline calls into.
//!
//! The core never opens paths on its own: everything goes through `SaveSource`
//! (read a whole file, query its size) and `SigSink` (write one `.sig` file).
//! `SaveDirectory` backs both with a filesystem folder, `MemorySave` with a map.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::constants::input_names;
use crate::signing::SaveInputs;
use crate::types::{Result, SignError};

/// Read side of a save folder.
pub trait SaveSource {
    /// Whole-file read.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Size of the file as stored, independent of what `read` returned.
    fn size(&self, name: &str) -> io::Result<u64>;
}

/// Write side of a save folder.
pub trait SigSink {
    /// Create or overwrite `name` with exactly `bytes`.
    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// A save folder on disk.
#[derive(Debug, Clone)]
pub struct SaveDirectory {
    root: PathBuf,
}

impl SaveDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like `new`, but fails early if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if !fs::metadata(&root)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl SaveSource for SaveDirectory {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path(name))
    }

    fn size(&self, name: &str) -> io::Result<u64> {
        Ok(fs::metadata(self.path(name))?.len())
    }
}

impl SigSink for SaveDirectory {
    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.path(name), bytes)
    }
}

/// In-memory save folder.
#[derive(Debug, Clone, Default)]
pub struct MemorySave {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(name.into(), bytes.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.files.remove(name)
    }
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{name} not found"))
}

impl SaveSource for MemorySave {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| not_found(name))
    }

    fn size(&self, name: &str) -> io::Result<u64> {
        self.files.get(name).map(|b| b.len() as u64).ok_or_else(|| not_found(name))
    }
}

impl SigSink for MemorySave {
    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Read the five input files, then the on-disk size of `SAVEGAME.sav`.
///
/// Every read happens before any digest is computed; the first failure aborts.
pub fn load_inputs<S: SaveSource + ?Sized>(source: &S) -> Result<SaveInputs> {
    let read = |name: &str| -> Result<Vec<u8>> {
        let bytes = source.read(name).map_err(|e| SignError::missing_input(name, e))?;
        trace!(file = name, len = bytes.len(), "read input");
        Ok(bytes)
    };

    let screen = read(input_names::SCREEN)?;
    let party_table = read(input_names::PARTY_TABLE)?;
    let global_vars = read(input_names::GLOBAL_VARS)?;
    let save_info = read(input_names::SAVE_INFO)?;
    let savegame = read(input_names::SAVEGAME)?;

    let savegame_size = source
        .size(input_names::SAVEGAME)
        .map_err(|e| SignError::file_size(input_names::SAVEGAME, e))?;

    debug!(savegame_size, "loaded save inputs");

    Ok(SaveInputs { screen, party_table, global_vars, save_info, savegame, savegame_size })
}
