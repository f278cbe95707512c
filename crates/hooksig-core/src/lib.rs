//! Hooksig Core Library
//!
//! Parsing, signing, and verification of timestamped webhook signatures
//! carried in the `X-Signature` header.

pub mod config;
pub mod crypto;
pub mod error;
pub mod webhook;

pub use error::{HookSigError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
