//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod addresses;
mod build_allowlist;
mod files;
mod proof_generate;
mod proof_verify;

use std::path::PathBuf;

use allowlist_core::schema::config::AllowlistConfiguration;
use allowlist_core::schema::proofs::AllowlistProofs;
pub use build_allowlist::build_allowlist;
pub use proof_generate::{TreeSource, generate_proof};
pub use proof_verify::{verify_membership_proof, verify_proofs};

use crate::common::RootEncoding;

/// Which published document to print the JSON schema for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTarget {
    /// The allowlist configuration file.
    Configuration,
    /// The membership proof bundle.
    Proofs,
}

/// Generates and prints the JSON schema for a published document.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn allowlist_schema(target: SchemaTarget) -> eyre::Result<()> {
    let (name, schema) = match target {
        SchemaTarget::Configuration => (
            "Allowlist Configuration",
            schemars::schema_for!(AllowlistConfiguration),
        ),
        SchemaTarget::Proofs => ("Allowlist Proofs", schemars::schema_for!(AllowlistProofs)),
    };
    let schema_str = serde_json::to_string_pretty(&schema)?;
    println!("{name} JSON Schema:\n{schema_str}");
    Ok(())
}

/// Print the root committed to by an allowlist configuration.
///
/// # Errors
/// Returns an error if the configuration cannot be read or parsed.
#[allow(clippy::print_stdout, reason = "Prints root to stdout")]
pub async fn print_root(configuration_file: PathBuf, encoding: RootEncoding) -> eyre::Result<()> {
    let configuration: AllowlistConfiguration =
        files::read_json(&configuration_file, "allowlist configuration").await?;
    println!("{}", encoding.encode(&configuration.root));
    Ok(())
}
