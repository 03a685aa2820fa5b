//! Text and JSON rendering of a run

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use savesig_core::signing::{SignatureSet, VerifyReport, VerifyStatus, WriteReport};
use savesig_core::telemetry::TelemetrySnapshot;
use serde::Serialize;

pub fn print_signatures<W: Write>(out: &mut W, set: &SignatureSet) -> io::Result<()> {
    writeln!(out, "Computed sig files:")?;
    for record in set {
        writeln!(out, "- {} ({})", record.name, record.digest)?;
    }
    Ok(())
}

pub fn print_write_report<W: Write>(out: &mut W, report: &WriteReport, dir: &Path) -> io::Result<()> {
    for name in &report.written {
        writeln!(out, "Saved {} in {}", name, dir.display())?;
    }
    for (_, err) in &report.failed {
        writeln!(out, "ERROR: {err}")?;
    }
    Ok(())
}

pub fn print_verify_report<W: Write>(out: &mut W, report: &VerifyReport) -> io::Result<()> {
    writeln!(out, "Verification:")?;
    for entry in &report.entries {
        let status = match &entry.status {
            VerifyStatus::Match => "ok".to_string(),
            VerifyStatus::Mismatch { on_disk } => format!("MISMATCH (on disk {on_disk})"),
            VerifyStatus::Missing => "missing".to_string(),
            VerifyStatus::Malformed { len } => format!("malformed ({len} bytes)"),
        };
        writeln!(out, "- {}: {}", entry.name, status)?;
    }
    Ok(())
}

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub save_dir: &'a Path,
    pub key: &'a str,
    /// File name -> hex digest.
    pub signatures: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<&'a VerifyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_errors: Option<Vec<String>>,
    pub telemetry: &'a TelemetrySnapshot,
}

pub fn print_json<W: Write>(out: &mut W, report: &JsonReport<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
