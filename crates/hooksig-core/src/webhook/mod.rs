//! Webhook signature parsing, signing, and verification.

pub mod header;
pub mod signer;
pub mod verifier;

pub use header::*;
pub use signer::*;
pub use verifier::*;
