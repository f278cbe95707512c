//! Signature computation.
//!
//! A signature is the HMAC-SHA256 of `<timestamp>.<hook_url>.<body>`, keyed
//! with the shared webhook secret and hex encoded.

use crate::crypto::hmac_sha256_hex;
use crate::webhook::header::SignatureHeader;

/// The exact bytes fed to the keyed hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningInput<'a> {
    timestamp: &'a str,
    hook_url: &'a str,
    body: &'a [u8],
}

impl<'a> SigningInput<'a> {
    /// Creates a signing input.
    ///
    /// `hook_url` is used verbatim, including scheme and trailing slash.
    pub fn new(timestamp: &'a str, hook_url: &'a str, body: &'a [u8]) -> Self {
        Self {
            timestamp,
            hook_url,
            body,
        }
    }

    pub fn timestamp(&self) -> &str {
        self.timestamp
    }

    pub fn hook_url(&self) -> &str {
        self.hook_url
    }

    pub fn body(&self) -> &[u8] {
        self.body
    }

    /// Returns `timestamp.hook_url.body`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut input =
            Vec::with_capacity(self.timestamp.len() + self.hook_url.len() + self.body.len() + 2);
        input.extend_from_slice(self.timestamp.as_bytes());
        input.push(b'.');
        input.extend_from_slice(self.hook_url.as_bytes());
        input.push(b'.');
        input.extend_from_slice(self.body);
        input
    }
}

/// Computes the hex signature of a webhook delivery.
///
/// Returns an empty string if the HMAC key cannot be set up. The empty value
/// never matches a presented signature, so a broken crypto primitive shows up
/// as a failed verification instead of a panic, and the caller cannot tell it
/// apart from a wrong signature. This also hides real misconfiguration, which
/// is why the failure is logged.
pub fn sign(secret: &[u8], timestamp: &str, hook_url: &str, body: &[u8]) -> String {
    let input = SigningInput::new(timestamp, hook_url, body);
    match hmac_sha256_hex(secret, &input.to_bytes()) {
        Ok(signature) => signature,
        Err(e) => {
            tracing::error!("Failed to compute webhook signature: {}", e);
            String::new()
        }
    }
}

/// Sender-side helper that produces complete signature headers.
pub struct Signer<'a> {
    secret: &'a [u8],
    old_secret: Option<&'a [u8]>,
}

impl<'a> Signer<'a> {
    /// Creates a signer for the current secret.
    pub fn new(secret: &'a [u8]) -> Self {
        Self {
            secret,
            old_secret: None,
        }
    }

    /// Also signs with the previous secret, adding a `v0=` field.
    pub fn with_old_secret(mut self, old_secret: Option<&'a [u8]>) -> Self {
        self.old_secret = old_secret;
        self
    }

    /// Builds the header for a delivery to `hook_url` at `timestamp`.
    pub fn header(&self, timestamp: i64, hook_url: &str, body: &[u8]) -> SignatureHeader {
        let time = timestamp.to_string();
        let header = SignatureHeader::new(timestamp, sign(self.secret, &time, hook_url, body));

        match self.old_secret {
            Some(old_secret) => {
                header.with_old_verification(sign(old_secret, &time, hook_url, body))
            }
            None => header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DIGEST_HEX_LEN;

    const URL: &str = "https://my.webhook.url/";

    #[test]
    fn test_signing_input_bytes() {
        let input = SigningInput::new("1691051724", URL, b"{\"a\":1}");
        assert_eq!(
            input.to_bytes(),
            b"1691051724.https://my.webhook.url/.{\"a\":1}".to_vec()
        );
        assert_eq!(input.timestamp(), "1691051724");
        assert_eq!(input.hook_url(), URL);
        assert_eq!(input.body(), b"{\"a\":1}");
    }

    #[test]
    fn test_sign_known_vector() {
        assert_eq!(
            sign(b"k", "0", "", b""),
            "cf0868f8aa1aef0564c3bd7cad57adc1b4caa11497a587afe52f21e8d6ed5101"
        );
    }

    #[test]
    fn test_sign_empty_secret_returns_sentinel() {
        assert_eq!(sign(b"", "1691051724", URL, b"body"), "");
    }

    #[test]
    fn test_signer_empty_old_secret_yields_empty_v0() {
        let header = Signer::new(b"new")
            .with_old_secret(Some(b"".as_slice()))
            .header(100, URL, b"body");
        assert_eq!(header.old_verification.as_deref(), Some(""));
    }

    #[test]
    fn test_sign_negative_timestamp() {
        assert_eq!(
            sign(b"MySecret", "-5", URL, b"{}"),
            "dfe77eaf29a9fd3f0067bbb1cc5ebbc2160fe3a31422a2a6ff78fd8300d644ae"
        );
    }

    #[test]
    fn test_sign_is_lowercase_full_width() {
        let signature = sign(b"MySecret", "1691051724", URL, b"body");
        assert_eq!(signature.len(), DIGEST_HEX_LEN);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_each_input_changes_signature() {
        let base = sign(b"secret", "100", URL, b"body");
        assert_ne!(base, sign(b"secret2", "100", URL, b"body"));
        assert_ne!(base, sign(b"secret", "101", URL, b"body"));
        assert_ne!(base, sign(b"secret", "100", "https://my.webhook.url", b"body"));
        assert_ne!(base, sign(b"secret", "100", URL, b"body "));
    }

    #[test]
    fn test_signer_header_without_old_secret() {
        let header = Signer::new(b"secret").header(100, URL, b"body");
        assert_eq!(header.timestamp, 100);
        assert_eq!(header.verification, sign(b"secret", "100", URL, b"body"));
        assert_eq!(header.old_verification, None);
    }

    #[test]
    fn test_signer_header_with_old_secret() {
        let header = Signer::new(b"new")
            .with_old_secret(Some(b"old".as_slice()))
            .header(100, URL, b"body");
        assert_eq!(header.verification, sign(b"new", "100", URL, b"body"));
        assert_eq!(
            header.old_verification,
            Some(sign(b"old", "100", URL, b"body"))
        );
    }
}
