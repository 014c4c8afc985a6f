//! Serialized schema/data contracts.

/// Allowlist configuration schema types.
pub mod config;
/// Membership proof distribution schema types.
pub mod proofs;
