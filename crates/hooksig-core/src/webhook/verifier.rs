//! Webhook signature verification.

use crate::crypto::constant_time_eq;
use crate::error::Result;
use crate::webhook::header::SignatureHeader;
use crate::webhook::signer::sign;

/// Outcome of verifying a well-formed signature header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// A presented signature matches the current secret.
    Current,
    /// A presented signature matches the previous secret.
    Previous,
    /// No presented signature matches.
    Mismatch,
}

impl Verification {
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::Mismatch)
    }
}

/// Verifier for `X-Signature` headers.
pub struct SignatureVerifier<'a> {
    secret: &'a [u8],
    old_secret: Option<&'a [u8]>,
    cross_check: bool,
}

impl<'a> SignatureVerifier<'a> {
    /// Creates a new verifier with the current webhook secret.
    pub fn new(secret: &'a [u8]) -> Self {
        Self {
            secret,
            old_secret: None,
            cross_check: false,
        }
    }

    /// Sets the previous secret accepted during a rotation grace period.
    pub fn with_old_secret(mut self, old_secret: Option<&'a [u8]>) -> Self {
        self.old_secret = old_secret;
        self
    }

    /// Also accepts `v0=` signed with the current secret and `v=` signed
    /// with the previous one, for senders that have not switched yet.
    pub fn with_cross_check(mut self, cross_check: bool) -> Self {
        self.cross_check = cross_check;
        self
    }

    /// Verifies a raw header value against the delivery.
    ///
    /// # Arguments
    /// * `header` - The X-Signature header value
    /// * `hook_url` - The URL the delivery was sent to, exactly as signed
    /// * `body` - The raw request body
    ///
    /// Returns an error only if the header cannot be parsed. A signature
    /// that does not match is `Ok(false)`.
    pub fn verify(&self, header: &str, hook_url: &str, body: &[u8]) -> Result<bool> {
        Ok(self.verify_detailed(header, hook_url, body)?.is_valid())
    }

    /// Like [`verify`](Self::verify), but reports which secret matched.
    pub fn verify_detailed(
        &self,
        header: &str,
        hook_url: &str,
        body: &[u8],
    ) -> Result<Verification> {
        let parsed = SignatureHeader::parse(header)?;
        Ok(self.verify_parsed(&parsed, hook_url, body))
    }

    /// Verifies an already parsed header.
    pub fn verify_parsed(
        &self,
        header: &SignatureHeader,
        hook_url: &str,
        body: &[u8],
    ) -> Verification {
        let time = header.timestamp.to_string();
        let expected = sign(self.secret, &time, hook_url, body);

        // The previous secret only takes part when the sender included v0=.
        let expected_old = match (&header.old_verification, self.old_secret) {
            (Some(_), Some(old_secret)) => Some(sign(old_secret, &time, hook_url, body)),
            _ => None,
        };

        let presented_old = header.old_verification.as_deref();

        let outcome = if signatures_match(&header.verification, &expected) {
            Verification::Current
        } else if matches_both(presented_old, expected_old.as_deref()) {
            Verification::Previous
        } else if self.cross_check && matches_both(presented_old, Some(expected.as_str())) {
            Verification::Current
        } else if self.cross_check
            && matches_both(Some(header.verification.as_str()), expected_old.as_deref())
        {
            Verification::Previous
        } else {
            Verification::Mismatch
        };

        match outcome {
            Verification::Previous => {
                tracing::debug!(
                    timestamp = header.timestamp,
                    "Webhook signature matched previous secret"
                );
            }
            Verification::Mismatch => {
                tracing::warn!(timestamp = header.timestamp, "Webhook signature mismatch");
            }
            Verification::Current => {}
        }

        outcome
    }
}

/// Checks a signature header against the current and, optionally, the previous secret.
///
/// The previous secret is only consulted when the header carries `v0=`. If
/// the header carries `v0=` but no previous secret is given, that branch
/// simply does not match.
pub fn check_signature(
    header: &str,
    secret: &[u8],
    old_secret: Option<&[u8]>,
    hook_url: &str,
    body: &[u8],
) -> Result<bool> {
    SignatureVerifier::new(secret)
        .with_old_secret(old_secret)
        .verify(header, hook_url, body)
}

/// Exact, case-sensitive comparison in constant time.
///
/// An empty expected value is the signer's failure sentinel and never matches.
fn signatures_match(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && constant_time_eq(presented.as_bytes(), expected.as_bytes())
}

fn matches_both(presented: Option<&str>, expected: Option<&str>) -> bool {
    match (presented, expected) {
        (Some(presented), Some(expected)) => signatures_match(presented, expected),
        _ => false,
    }
}
