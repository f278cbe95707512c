//! Secret and hook URL resolution.
//!
//! Priority order: CLI flags > environment variables (`HOOKSIG_*`, including
//! values loaded from `.env`).

use anyhow::{Context, Result, bail};
use clap::Args;
use hooksig_core::config::WebhookConfig;

/// Flags shared by commands that need webhook secrets.
#[derive(Args, Debug, Default)]
pub struct SecretArgs {
    /// Current webhook secret (falls back to HOOKSIG_SECRET)
    #[arg(long)]
    pub secret: Option<String>,

    /// Previous webhook secret still inside its grace period
    #[arg(long)]
    pub old_secret: Option<String>,

    /// Hook URL exactly as the sender signs it (falls back to HOOKSIG_HOOK_URL)
    #[arg(long = "url")]
    pub hook_url: Option<String>,
}

/// Resolve webhook configuration from flags, falling back to the environment.
///
/// `--secret` and `--url` must be given together. When both are absent the
/// environment is used, with `--old-secret` still overriding
/// `HOOKSIG_OLD_SECRET`.
pub fn resolve_config(args: &SecretArgs, cross_check: bool) -> Result<WebhookConfig> {
    match (&args.secret, &args.hook_url) {
        (Some(secret), Some(hook_url)) => Ok(WebhookConfig::new(secret.as_str(), hook_url.as_str())
            .context("Invalid webhook flags")?
            .with_old_secret(args.old_secret.clone())
            .with_cross_check(cross_check)),
        (None, None) => {
            let Some(config) =
                WebhookConfig::from_env().context("Failed to load webhook configuration")?
            else {
                bail!(
                    "No webhook secret configured. Pass --secret and --url or set HOOKSIG_SECRET and HOOKSIG_HOOK_URL."
                );
            };

            let config = if args.old_secret.is_some() {
                config.with_old_secret(args.old_secret.clone())
            } else {
                config
            };
            let cross_check = cross_check || config.cross_check();
            Ok(config.with_cross_check(cross_check))
        }
        _ => bail!("--secret and --url must be given together"),
    }
}
