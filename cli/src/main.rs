//! savesig - compute, write and verify the .sig files of a KotOR save folder

mod cli;
mod output;
mod prompt;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use savesig_core::config::SignConfig;
use savesig_core::io::SaveDirectory;
use savesig_core::pipeline::SignSession;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;
use crate::output::JsonReport;

/// Some writes failed or verification found differences.
const EXIT_INCOMPLETE: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    let stdout = io::stdout();
    let code = run(&cli, &mut stdout.lock())?;
    Ok(ExitCode::from(code))
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("savesig=warn,savesig_core=warn"),
        1 => EnvFilter::new("savesig=info,savesig_core=info"),
        2 => EnvFilter::new("savesig=debug,savesig_core=debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries the report; logs go to stderr.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<SignConfig> {
    let config = SignConfig::new(cli.format.into()).with_strategy(cli.strategy());
    match &cli.key {
        Some(hex) => config.with_custom_key_hex(hex).context("invalid --key"),
        None => Ok(config),
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<u8> {
    let config = build_config(cli)?;
    let mut dir = SaveDirectory::open(&cli.core_path)
        .with_context(|| format!("cannot open save folder {}", cli.core_path.display()))?;

    tracing::info!(
        save_dir = %dir.root().display(),
        key = config.key_label(),
        verify = cli.verify,
        "Starting"
    );

    let mut session = SignSession::new(config);
    let key_label = session.config().key_label();
    let set = session
        .sign_source(&dir)
        .with_context(|| format!("cannot sign save folder {}", dir.root().display()))?;

    if !cli.json {
        output::print_signatures(out, &set)?;
    }

    let mut code = 0;
    let mut verify_report = None;
    let mut written = None;
    let mut write_errors = None;

    if cli.verify {
        let report = session.verify(&set, &dir);
        if !report.all_match() {
            code = EXIT_INCOMPLETE;
        }
        if !cli.json {
            output::print_verify_report(out, &report)?;
        }
        verify_report = Some(report);
    } else {
        let report = session.persist(&set, &mut dir, |_| {
            if cli.yes {
                true
            } else if cli.dry_run {
                false
            } else if cli.json {
                // Keep stdout parseable.
                prompt::confirm(&mut io::stdin().lock(), &mut io::stderr(), prompt::SAVE_PROMPT)
            } else {
                prompt::confirm_stdio(prompt::SAVE_PROMPT)
            }
        });
        if !report.failed.is_empty() {
            code = EXIT_INCOMPLETE;
        }
        if !cli.json {
            if report.confirmed {
                output::print_write_report(out, &report, dir.root())?;
            } else {
                writeln!(out, "Sig files not saved.")?;
            }
        }
        written = Some(report.written.iter().map(|n| n.file_name().to_string()).collect());
        write_errors = Some(report.failed.iter().map(|(_, e)| e.to_string()).collect());
    }

    let telemetry = session.finish();
    tracing::info!(
        files_read = telemetry.files_read,
        bytes_digested = telemetry.bytes_digested,
        elapsed_us = telemetry.elapsed.as_micros() as u64,
        "Finished"
    );

    if cli.json {
        let report = JsonReport {
            save_dir: dir.root(),
            key: key_label,
            signatures: set.to_hex_map(),
            verify: verify_report.as_ref(),
            written,
            write_errors,
            telemetry: &telemetry,
        };
        output::print_json(out, &report)?;
    } else if cli.verbose > 0 {
        tracing::info!("telemetry: {}", telemetry.to_json()?);
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_save(dir: &Path) {
        let mut savegame: Vec<u8> = (0..200u32).map(|i| i as u8).collect();
        savegame[16..20].copy_from_slice(&1u32.to_le_bytes());
        savegame[28..32].copy_from_slice(&168u32.to_le_bytes());

        fs::write(dir.join("Screen.tga"), b"screen").unwrap();
        fs::write(dir.join("PARTYTABLE.res"), b"party").unwrap();
        fs::write(dir.join("GLOBALVARS.res"), b"globals").unwrap();
        fs::write(dir.join("savenfo.res"), b"info").unwrap();
        fs::write(dir.join("SAVEGAME.sav"), savegame).unwrap();
    }

    fn run_args(args: &[&str]) -> (anyhow::Result<u8>, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn yes_writes_all_seven_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_save(tmp.path());
        let path = tmp.path().to_str().unwrap();

        let (code, text) = run_args(&["savesig", "-y", path]);
        assert_eq!(code.unwrap(), 0);
        assert!(text.starts_with("Computed sig files:\n"));
        assert!(text.contains("- Screen.sig (b373a3e87b889269f80bbf46e85e7150ffd32ee7)"));
        assert_eq!(text.matches("Saved ").count(), 7);

        let header = fs::read(tmp.path().join("SAVE_HEADER.sig")).unwrap();
        assert_eq!(header.len(), 20);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        write_save(tmp.path());
        let path = tmp.path().to_str().unwrap();

        let (code, text) = run_args(&["savesig", "-n", path]);
        assert_eq!(code.unwrap(), 0);
        assert!(text.contains("Sig files not saved."));
        assert!(!tmp.path().join("Screen.sig").exists());
    }

    #[test]
    fn verify_after_write_matches_then_detects_tampering() {
        let tmp = tempfile::tempdir().unwrap();
        write_save(tmp.path());
        let path = tmp.path().to_str().unwrap();

        assert_eq!(run_args(&["savesig", "-y", path]).0.unwrap(), 0);
        assert_eq!(run_args(&["savesig", "--verify", path]).0.unwrap(), 0);

        fs::write(tmp.path().join("savenfo.res"), b"edited").unwrap();
        let (code, text) = run_args(&["savesig", "--verify", path]);
        assert_eq!(code.unwrap(), EXIT_INCOMPLETE);
        assert!(text.contains("SAVE_INFO.sig: MISMATCH"));
    }

    #[test]
    fn missing_input_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_save(tmp.path());
        fs::remove_file(tmp.path().join("GLOBALVARS.res")).unwrap();
        let path = tmp.path().to_str().unwrap();

        let (result, _) = run_args(&["savesig", "-n", path]);
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("GLOBALVARS.res"), "{err}");
    }

    #[test]
    fn json_report_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        write_save(tmp.path());
        let path = tmp.path().to_str().unwrap();

        let (code, text) = run_args(&["savesig", "-n", "--json", path]);
        assert_eq!(code.unwrap(), 0);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["key"], "kotor1");
        assert_eq!(value["signatures"]["SAVE_PARTY.sig"], "42536dd1f2f3c7c36f0bb33720d64148ec626a5a");
        assert_eq!(value["written"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn bad_key_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_save(tmp.path());
        let path = tmp.path().to_str().unwrap();

        let (result, _) = run_args(&["savesig", "-n", "--key", "abcd", path]);
        assert!(result.is_err());
    }
}
