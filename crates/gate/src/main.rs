//! Search Bundle gate
//!
//! Checks search Bundles received from another organization before they are
//! executed.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use helios_search_gate::{
    GateConfig, OutputFormat, SearchBundle, SearchBundleValidator, Violation, init_logging,
};
use tracing::{info, warn};

/// Exit status when at least one Bundle was rejected.
const EXIT_REJECTED: u8 = 1;

/// Exit status for configuration and I/O errors.
const EXIT_ERROR: u8 = 2;

/// Outcome of checking a single Bundle.
#[derive(Debug, PartialEq)]
enum Outcome {
    Accepted,
    Rejected(Violation),
}

fn main() -> ExitCode {
    let config = GateConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        return ExitCode::from(EXIT_ERROR);
    }

    match run(&config, &mut io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_REJECTED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Checks every configured Bundle and reports each outcome to `out`.
///
/// Returns `Ok(true)` when all Bundles were accepted.
fn run(config: &GateConfig, out: &mut impl Write) -> anyhow::Result<bool> {
    let validator = SearchBundleValidator::new();
    let mut all_accepted = true;

    if config.bundles.is_empty() {
        let json = read_stdin()?;
        all_accepted &= check_and_report(&validator, config, "-", &json, out)?;
        return Ok(all_accepted);
    }

    for path in &config.bundles {
        let name = path.display().to_string();
        let json = if path.as_os_str() == "-" {
            read_stdin()?
        } else {
            read_file(path)?
        };
        all_accepted &= check_and_report(&validator, config, &name, &json, out)?;
    }

    Ok(all_accepted)
}

fn read_stdin() -> anyhow::Result<String> {
    let mut json = String::new();
    io::stdin()
        .read_to_string(&mut json)
        .context("Failed to read Bundle from stdin")?;
    Ok(json)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Bundle from {}", path.display()))
}

/// Checks one Bundle and writes the outcome in the configured format.
fn check_and_report(
    validator: &SearchBundleValidator,
    config: &GateConfig,
    name: &str,
    json: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let organization = config.organization.as_deref().unwrap_or("unknown");
    let task_id = config.task_id.as_deref().unwrap_or("unknown");

    let outcome = check_bundle(validator, config, name, json)?;

    match (&outcome, config.output) {
        (Outcome::Accepted, OutputFormat::Text) => writeln!(out, "OK {}", name)?,
        (Outcome::Accepted, OutputFormat::Json) => writeln!(
            out,
            "{}",
            serde_json::json!({
                "bundle": name,
                "organization": organization,
                "task": task_id,
                "valid": true
            })
        )?,
        (Outcome::Rejected(violation), OutputFormat::Text) => {
            writeln!(out, "REJECTED {} - {}", name, violation)?
        }
        (Outcome::Rejected(violation), OutputFormat::Json) => writeln!(
            out,
            "{}",
            serde_json::json!({
                "bundle": name,
                "organization": organization,
                "task": task_id,
                "valid": false,
                "outcome": violation.to_operation_outcome()
            })
        )?,
    }

    Ok(outcome == Outcome::Accepted)
}

/// Parses and validates one Bundle, logging the result.
fn check_bundle(
    validator: &SearchBundleValidator,
    config: &GateConfig,
    name: &str,
    json: &str,
) -> anyhow::Result<Outcome> {
    let organization = config.organization.as_deref().unwrap_or("unknown");
    let task_id = config.task_id.as_deref().unwrap_or("unknown");

    info!(
        bundle = %name,
        organization = %organization,
        task_id = %task_id,
        "Checking downloaded search Bundle"
    );

    let bundle = SearchBundle::from_json(json)
        .with_context(|| format!("Failed to parse search Bundle {}", name))?;

    match validator.validate(&bundle) {
        Ok(()) => {
            info!(
                bundle = %name,
                organization = %organization,
                task_id = %task_id,
                valid_search_params = ?validator.valid_search_params(),
                "Search Bundle contains only valid requests of type GET and valid search params"
            );
            Ok(Outcome::Accepted)
        }
        Err(violation) => {
            warn!(
                bundle = %name,
                organization = %organization,
                task_id = %task_id,
                kind = %violation.kind(),
                "Error while checking search Bundle - {}",
                violation
            );
            Ok(Outcome::Rejected(violation))
        }
    }
}
