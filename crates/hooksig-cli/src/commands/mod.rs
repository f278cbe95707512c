//! CLI command implementations.

pub mod header;
pub mod sign;
pub mod verify;

use std::io::Read;

use anyhow::{Context, Result};

/// Reads a request body from a file, or from stdin when `path` is `-`.
pub fn read_body(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .context("Failed to read body from stdin")?;
        return Ok(body);
    }

    std::fs::read(path).with_context(|| format!("Failed to read body from {}", path))
}
