//! Parsing and formatting of the `X-Signature` header.
//!
//! Wire format: `t=<unix-seconds>,v=<hex-hmac>[,v0=<hex-hmac-old>]`.
//! Fields are matched by key, so their order is not significant.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{HookSigError, Result};

/// Name of the HTTP header carrying the signature.
pub const SIGNATURE_HEADER: &str = "X-Signature";

const FIELD_SEPARATOR: char = ',';
const TIMESTAMP_KEY: &str = "t";
const VERIFICATION_KEY: &str = "v";
const OLD_VERIFICATION_KEY: &str = "v0";

/// Parsed representation of a signature header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureHeader {
    /// Seconds since the Unix epoch, as sent. No range check is applied.
    pub timestamp: i64,
    /// Signature made with the current secret.
    pub verification: String,
    /// Signature made with the previous secret, sent during a rotation grace period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_verification: Option<String>,
}

impl SignatureHeader {
    /// Creates a header carrying only the current signature.
    pub fn new(timestamp: i64, verification: impl Into<String>) -> Self {
        Self {
            timestamp,
            verification: verification.into(),
            old_verification: None,
        }
    }

    /// Adds the signature made with the previous secret.
    pub fn with_old_verification(mut self, old_verification: impl Into<String>) -> Self {
        self.old_verification = Some(old_verification.into());
        self
    }

    /// Parses a raw header value.
    ///
    /// The value must split into two or three comma-separated fields. A
    /// trailing comma does not count as an extra field. Keys are matched
    /// ASCII case-insensitively; values are kept verbatim.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }

        if fields.len() < 2 || fields.len() > 3 {
            return Err(HookSigError::MalformedHeader {
                header: raw.to_string(),
            });
        }

        let timestamp = parse_timestamp(raw, &fields)?;

        let old_verification = if fields.len() == 3 {
            let (_, value) = find_field(&fields, OLD_VERIFICATION_KEY).ok_or_else(|| {
                HookSigError::MissingOldVerification {
                    header: raw.to_string(),
                }
            })?;
            Some(value.to_string())
        } else {
            None
        };

        let (_, verification) = find_field(&fields, VERIFICATION_KEY).ok_or_else(|| {
            HookSigError::MissingVerification {
                header: raw.to_string(),
            }
        })?;

        Ok(Self {
            timestamp,
            verification: verification.to_string(),
            old_verification,
        })
    }
}

impl FromStr for SignatureHeader {
    type Err = HookSigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SignatureHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={},{}={}",
            TIMESTAMP_KEY, self.timestamp, VERIFICATION_KEY, self.verification
        )?;
        if let Some(old) = &self.old_verification {
            write!(f, ",{}={}", OLD_VERIFICATION_KEY, old)?;
        }
        Ok(())
    }
}

/// Finds the first field whose key equals `key`, returning `(field, value)`.
///
/// Comparing whole keys keeps `v` and `v0` apart regardless of field order.
fn find_field<'a>(fields: &[&'a str], key: &str) -> Option<(&'a str, &'a str)> {
    fields.iter().copied().find_map(|field| {
        let (name, value) = field.split_once('=')?;
        name.eq_ignore_ascii_case(key).then_some((field, value))
    })
}

fn parse_timestamp(raw: &str, fields: &[&str]) -> Result<i64> {
    let (field, value) =
        find_field(fields, TIMESTAMP_KEY).ok_or_else(|| HookSigError::MissingTimestamp {
            header: raw.to_string(),
        })?;

    value
        .parse::<i64>()
        .map_err(|_| HookSigError::InvalidTimestamp {
            field: field.to_string(),
        })
}
