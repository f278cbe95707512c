//! Inspection of signature headers.

use anyhow::{Context, Result};
use hooksig_core::webhook::{SIGNATURE_HEADER, SignatureHeader};

pub fn handle_header_command(raw: &str, json: bool) -> Result<()> {
    let header = SignatureHeader::parse(raw)
        .with_context(|| format!("Invalid {} header", SIGNATURE_HEADER))?;
    println!("{}", render_header(&header, json)?);
    Ok(())
}

fn render_header(header: &SignatureHeader, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(header).context("Failed to serialize header");
    }

    let mut out = format!(
        "Timestamp:        {}\nVerification:     {}",
        header.timestamp, header.verification
    );
    if let Some(old) = &header.old_verification {
        out.push_str(&format!("\nOld verification: {}", old));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let header = SignatureHeader::new(1691051724, "abc").with_old_verification("def");
        let out = render_header(&header, false).unwrap();
        assert!(out.contains("Timestamp:        1691051724"));
        assert!(out.contains("Verification:     abc"));
        assert!(out.contains("Old verification: def"));
    }

    #[test]
    fn test_render_json_skips_missing_old() {
        let header = SignatureHeader::new(1691051724, "abc");
        let out = render_header(&header, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["timestamp"], 1691051724);
        assert_eq!(value["verification"], "abc");
        assert!(value.get("old_verification").is_none());
    }
}
