use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hooksig_core::HookSigError;

mod commands;
mod config;

use commands::{
    header::handle_header_command,
    sign::{SignArgs, handle_sign_command},
    verify::{VerifyArgs, handle_verify_command},
};

/// Exit status for a header that cannot be parsed.
const EXIT_MALFORMED_HEADER: u8 = 2;
/// Exit status for configuration and I/O errors.
const EXIT_ERROR: u8 = 3;

#[derive(Parser)]
#[command(name = "hooksig")]
#[command(about = "Sign and verify timestamped webhook signatures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce an X-Signature header for a request body
    Sign(SignArgs),

    /// Parse an X-Signature header and print its fields
    Header {
        /// The X-Signature header value
        #[arg(allow_hyphen_values = true)]
        header: String,

        /// Print the fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify a request body against its X-Signature header
    Verify(VerifyArgs),

    /// Show CLI version
    Version,
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Sign(args) => handle_sign_command(args)?,
        Commands::Header { header, json } => handle_header_command(&header, json)?,
        Commands::Verify(args) => return handle_verify_command(args),
        Commands::Version => println!("hooksig {}", hooksig_core::VERSION),
    }

    Ok(ExitCode::SUCCESS)
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<HookSigError>() {
        Some(e) if e.is_header_error() => EXIT_MALFORMED_HEADER,
        _ => EXIT_ERROR,
    }
}

fn main() -> ExitCode {
    // Load .env file if present (doesn't override existing env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hooksig=warn,hooksig_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}
