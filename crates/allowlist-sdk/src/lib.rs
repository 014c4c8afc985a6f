//! Allowlist SDK: workflow logic shared by the CLI and other front-ends.

/// Workflow command implementations.
pub mod commands;
/// CLI-independent configuration types.
pub mod common;
