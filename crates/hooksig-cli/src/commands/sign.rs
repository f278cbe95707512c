//! Header generation for outgoing deliveries.

use anyhow::Result;
use clap::Args;

use super::read_body;
use crate::config::{SecretArgs, resolve_config};

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub secrets: SecretArgs,

    /// Unix timestamp in seconds (defaults to now)
    #[arg(long, allow_hyphen_values = true)]
    pub timestamp: Option<i64>,

    /// File holding the request body, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub body: String,
}

pub fn handle_sign_command(args: SignArgs) -> Result<()> {
    let config = resolve_config(&args.secrets, false)?;
    let body = read_body(&args.body)?;
    let timestamp = args
        .timestamp
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    let header = config.signer().header(timestamp, config.hook_url(), &body);
    tracing::debug!(timestamp, rotation = config.has_old_secret(), "Signed webhook body");

    println!("{}", header);
    Ok(())
}
