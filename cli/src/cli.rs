//! CLI argument parsing for savesig

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use savesig_core::crypto::FormatVersion;
use savesig_core::signing::Strategy;

/// Compute and write the .sig files of a KotOR save folder
#[derive(Parser, Debug)]
#[command(name = "savesig")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Folder containing Screen.tga, PARTYTABLE.res, GLOBALVARS.res, savenfo.res and SAVEGAME.sav
    #[arg(value_name = "SAVE_DIR")]
    pub core_path: PathBuf,

    /// Save-format version selecting the embedded key
    #[arg(long, value_enum, default_value_t = VersionArg::Kotor1)]
    pub format: VersionArg,

    /// Custom 16-byte key as 32 hex characters (overrides --format)
    #[arg(long, env = "SAVESIG_KEY", value_name = "HEX", hide_env_values = true)]
    pub key: Option<String>,

    /// Compute the seven digests on worker threads
    #[arg(long)]
    pub parallel: bool,

    /// Write .sig files without asking
    #[arg(short = 'y', long, conflicts_with_all = ["dry_run", "verify"])]
    pub yes: bool,

    /// Never write .sig files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Compare against the .sig files already in the folder instead of writing
    #[arg(long)]
    pub verify: bool,

    /// Print signatures and telemetry as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum VersionArg {
    #[value(alias = "k1")]
    Kotor1,
    #[value(alias = "k2")]
    Kotor2,
}

impl From<VersionArg> for FormatVersion {
    fn from(v: VersionArg) -> Self {
        match v {
            VersionArg::Kotor1 => FormatVersion::Kotor1,
            VersionArg::Kotor2 => FormatVersion::Kotor2,
        }
    }
}

impl Cli {
    pub fn strategy(&self) -> Strategy {
        if self.parallel {
            Strategy::Parallel
        } else {
            Strategy::Sequential
        }
    }
}
