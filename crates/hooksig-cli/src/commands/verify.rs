//! Verification of received deliveries.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use hooksig_core::webhook::{SIGNATURE_HEADER, Verification};
use serde::Serialize;

use super::read_body;
use crate::config::{SecretArgs, resolve_config};

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The X-Signature header value
    #[arg(allow_hyphen_values = true)]
    pub header: String,

    #[command(flatten)]
    pub secrets: SecretArgs,

    /// File holding the raw request body, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub body: String,

    /// Also accept signatures made with swapped current/previous secrets
    #[arg(long)]
    pub cross_check: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct VerifyReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<&'static str>,
}

pub fn handle_verify_command(args: VerifyArgs) -> Result<ExitCode> {
    let config = resolve_config(&args.secrets, args.cross_check)?;
    let body = read_body(&args.body)?;

    let outcome = config
        .check_detailed(&args.header, &body)
        .with_context(|| format!("Invalid {} header", SIGNATURE_HEADER))?;

    println!("{}", render_outcome(outcome, args.json)?);

    Ok(if outcome.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render_outcome(outcome: Verification, json: bool) -> Result<String> {
    let matched = match outcome {
        Verification::Current => Some("current"),
        Verification::Previous => Some("previous"),
        Verification::Mismatch => None,
    };

    if json {
        let report = VerifyReport {
            valid: outcome.is_valid(),
            matched,
        };
        return serde_json::to_string(&report).context("Failed to serialize result");
    }

    Ok(match matched {
        Some(secret) => format!("valid ({} secret)", secret),
        None => "invalid".to_string(),
    })
}
