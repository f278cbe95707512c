//! Webhook verification settings loaded from the environment.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{HookSigError, Result};
use crate::webhook::{Signer, SignatureVerifier, Verification};

pub const SECRET_VAR: &str = "HOOKSIG_SECRET";
pub const OLD_SECRET_VAR: &str = "HOOKSIG_OLD_SECRET";
pub const HOOK_URL_VAR: &str = "HOOKSIG_HOOK_URL";
pub const CROSS_CHECK_VAR: &str = "HOOKSIG_CROSS_CHECK";

/// Secrets and endpoint used to verify incoming deliveries.
#[derive(Debug)]
pub struct WebhookConfig {
    /// Current shared secret.
    secret: SecretString,
    /// Previous secret, still accepted during a rotation grace period.
    old_secret: Option<SecretString>,
    /// Hook URL exactly as the sender signs it.
    hook_url: String,
    /// Accept signatures made with swapped secrets.
    cross_check: bool,
}

impl WebhookConfig {
    /// Creates a configuration, validating the secret and hook URL.
    ///
    /// The URL is stored verbatim; parsing only rejects values that are not URLs.
    pub fn new(secret: impl Into<String>, hook_url: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(HookSigError::Configuration(
                "Webhook secret must not be empty".to_string(),
            ));
        }

        let hook_url = hook_url.into();
        Url::parse(&hook_url).map_err(|e| {
            HookSigError::Configuration(format!("Invalid hook URL '{}': {}", hook_url, e))
        })?;

        Ok(Self {
            secret: SecretString::from(secret),
            old_secret: None,
            hook_url,
            cross_check: false,
        })
    }

    /// Sets the previous secret. Empty values are treated as absent.
    pub fn with_old_secret(mut self, old_secret: Option<String>) -> Self {
        self.old_secret = old_secret
            .filter(|s| !s.is_empty())
            .map(SecretString::from);
        self
    }

    pub fn with_cross_check(mut self, cross_check: bool) -> Self {
        self.cross_check = cross_check;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// Returns `Ok(None)` when nothing is set. `HOOKSIG_SECRET` and
    /// `HOOKSIG_HOOK_URL` must be set together.
    pub fn from_env() -> Result<Option<Self>> {
        let secret = std::env::var(SECRET_VAR).ok();
        let hook_url = std::env::var(HOOK_URL_VAR).ok();
        let old_secret = std::env::var(OLD_SECRET_VAR).ok();
        let cross_check = bool_from_env(CROSS_CHECK_VAR)?;

        match (secret, hook_url) {
            (Some(secret), Some(hook_url)) => Ok(Some(
                Self::new(secret, hook_url)?
                    .with_old_secret(old_secret)
                    .with_cross_check(cross_check),
            )),
            (None, None) if old_secret.is_none() => Ok(None),
            _ => Err(HookSigError::Configuration(format!(
                "Partial webhook configuration. Set all of: {}, {}",
                SECRET_VAR, HOOK_URL_VAR
            ))),
        }
    }

    pub fn hook_url(&self) -> &str {
        &self.hook_url
    }

    pub fn has_old_secret(&self) -> bool {
        self.old_secret.is_some()
    }

    pub fn cross_check(&self) -> bool {
        self.cross_check
    }

    /// Returns a verifier borrowing these secrets.
    pub fn verifier(&self) -> SignatureVerifier<'_> {
        SignatureVerifier::new(self.secret.expose_secret().as_bytes())
            .with_old_secret(self.old_secret.as_ref().map(|s| s.expose_secret().as_bytes()))
            .with_cross_check(self.cross_check)
    }

    /// Returns a signer producing headers for these secrets.
    pub fn signer(&self) -> Signer<'_> {
        Signer::new(self.secret.expose_secret().as_bytes())
            .with_old_secret(self.old_secret.as_ref().map(|s| s.expose_secret().as_bytes()))
    }

    /// Verifies a delivery to the configured hook URL.
    pub fn check(&self, header: &str, body: &[u8]) -> Result<bool> {
        self.verifier().verify(header, &self.hook_url, body)
    }

    /// Verifies a delivery and reports which secret matched.
    pub fn check_detailed(&self, header: &str, body: &[u8]) -> Result<Verification> {
        self.verifier().verify_detailed(header, &self.hook_url, body)
    }
}

fn bool_from_env(name: &str) -> Result<bool> {
    match std::env::var(name) {
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            _ => Err(HookSigError::Configuration(format!(
                "Invalid {}: expected true or false, got '{}'",
                name, value
            ))),
        },
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://my.webhook.url/";

    fn with_env<R>(
        secret: Option<&str>,
        old_secret: Option<&str>,
        hook_url: Option<&str>,
        cross_check: Option<&str>,
        f: impl FnOnce() -> R,
    ) -> R {
        temp_env::with_vars(
            [
                (SECRET_VAR, secret),
                (OLD_SECRET_VAR, old_secret),
                (HOOK_URL_VAR, hook_url),
                (CROSS_CHECK_VAR, cross_check),
            ],
            f,
        )
    }

    #[test]
    fn test_from_env_unset() {
        with_env(None, None, None, None, || {
            assert!(WebhookConfig::from_env().unwrap().is_none());
        });
    }

    #[test]
    fn test_from_env_full() {
        with_env(Some("new"), Some("old"), Some(URL), Some("TRUE"), || {
            let config = WebhookConfig::from_env().unwrap().unwrap();
            assert_eq!(config.hook_url(), URL);
            assert!(config.has_old_secret());
            assert!(config.cross_check());
        });
    }

    #[test]
    fn test_from_env_defaults_cross_check_off() {
        with_env(Some("new"), None, Some(URL), None, || {
            let config = WebhookConfig::from_env().unwrap().unwrap();
            assert!(!config.has_old_secret());
            assert!(!config.cross_check());
        });
    }

    #[test]
    fn test_from_env_partial() {
        with_env(Some("new"), None, None, None, || {
            let err = WebhookConfig::from_env().unwrap_err();
            assert!(matches!(err, HookSigError::Configuration(_)));
            assert!(err.to_string().contains(HOOK_URL_VAR));
        });

        with_env(None, Some("old"), None, None, || {
            assert!(WebhookConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_from_env_invalid_cross_check() {
        with_env(Some("new"), None, Some(URL), Some("maybe"), || {
            assert!(WebhookConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_new_validates_inputs() {
        assert!(WebhookConfig::new("", URL).is_err());
        assert!(WebhookConfig::new("secret", "not a url").is_err());
        assert!(WebhookConfig::new("secret", URL).is_ok());
    }

    #[test]
    fn test_hook_url_kept_verbatim() {
        let config = WebhookConfig::new("secret", "HTTPS://My.Webhook.url").unwrap();
        assert_eq!(config.hook_url(), "HTTPS://My.Webhook.url");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = WebhookConfig::new("super-secret-value", URL)
            .unwrap()
            .with_old_secret(Some("older-secret-value".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
        assert!(!debug.contains("older-secret-value"));
    }

    #[test]
    fn test_empty_old_secret_is_absent() {
        let config = WebhookConfig::new("secret", URL)
            .unwrap()
            .with_old_secret(Some(String::new()));
        assert!(!config.has_old_secret());
    }

    #[test]
    fn test_check_round_trip_with_rotation() {
        let config = WebhookConfig::new("new", URL)
            .unwrap()
            .with_old_secret(Some("old".to_string()));
        let header = config.signer().header(1691051724, URL, b"{}").to_string();

        assert!(config.check(&header, b"{}").unwrap());
        assert_eq!(
            config.check_detailed(&header, b"{}").unwrap(),
            Verification::Current
        );
        assert!(!config.check(&header, b"{ }").unwrap());
    }
}
