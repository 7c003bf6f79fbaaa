// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout credential-vault.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(VaultKey32, 32); // 256-bit AES-GCM vault key

// Dynamic secrets
dynamic_alias!(PlainText, Vec<u8>); // serialized record before sealing / after opening
