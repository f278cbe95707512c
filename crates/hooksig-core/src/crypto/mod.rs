//! Cryptographic utilities for webhook signing and verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{HookSigError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded HMAC-SHA256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Computes HMAC-SHA256 of data with the given key and returns it as lowercase hex.
///
/// The output is always [`DIGEST_HEX_LEN`] characters; leading zero nibbles are kept.
/// An empty key is rejected: anyone could compute a signature with it.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String> {
    if key.is_empty() {
        return Err(HookSigError::Crypto("HMAC key must not be empty".to_string()));
    }

    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| HookSigError::Crypto(format!("HMAC key setup failed: {}", e)))?;
    mac.update(data);
    let result = mac.finalize();
    Ok(hex::encode(result.into_bytes()))
}

/// Constant-time equality comparison.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
