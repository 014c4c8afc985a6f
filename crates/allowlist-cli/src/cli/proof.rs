//! Proof subcommands.

use std::path::PathBuf;

use allowlist_core::base::Address;
use allowlist_sdk::commands::TreeSource;
use clap::ArgGroup;

use super::constants::{
    ALLOWLIST_ADDRESS, ALLOWLIST_CONFIG_FILE, ALLOWLIST_INPUT_FILE, ALLOWLIST_PROOF_OUT,
    ALLOWLIST_PROOFS_FILE, ALLOWLIST_TREE_FILE, DEFAULT_CONFIG_FILE, DEFAULT_PROOFS_FILE,
};
use super::parse_address;

/// Arguments for `proof generate`.
#[derive(Debug, clap::Args)]
pub struct ProofGenerateArgs {
    /// Address to prove membership for.
    #[arg(long, env = ALLOWLIST_ADDRESS, value_parser = parse_address)]
    pub address: Address,
    /// Allowlist configuration file.
    #[arg(long, env = ALLOWLIST_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Rebuild the tree from this address list.
    #[arg(long, env = ALLOWLIST_INPUT_FILE)]
    pub input: Option<PathBuf>,
    /// Load a tree saved by `config build --tree-out`.
    #[arg(long, env = ALLOWLIST_TREE_FILE)]
    pub tree: Option<PathBuf>,
    /// Proof output file. Printed to stdout when omitted.
    #[arg(long, env = ALLOWLIST_PROOF_OUT)]
    pub proof_out: Option<PathBuf>,
}

impl ProofGenerateArgs {
    /// Where the tree comes from.
    ///
    /// The `tree_source` group makes clap require exactly one of `input` and `tree`.
    pub fn source(&self) -> TreeSource {
        match (&self.tree, &self.input) {
            (Some(tree), _) => TreeSource::Tree(tree.clone()),
            (None, input) => TreeSource::Addresses(input.clone().unwrap_or_default()),
        }
    }
}

/// Arguments for `proof verify`.
#[derive(Debug, clap::Args)]
pub struct ProofVerifyArgs {
    /// Allowlist configuration file.
    #[arg(long, env = ALLOWLIST_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Proof bundle to verify.
    #[arg(long, env = ALLOWLIST_PROOFS_FILE, default_value = DEFAULT_PROOFS_FILE)]
    pub proofs: PathBuf,
    /// Only verify the proof for this address.
    #[arg(long, env = ALLOWLIST_ADDRESS, value_parser = parse_address)]
    pub address: Option<Address>,
}

/// Proof command group.
#[derive(Debug, clap::Subcommand)]
pub enum ProofCommands {
    /// Generate the membership proof for one address.
    #[command(group(
        ArgGroup::new("tree_source")
            .args(["input", "tree"])
            .required(true)
            .multiple(false)
    ))]
    Generate {
        #[command(flatten)]
        args: ProofGenerateArgs,
    },
    /// Verify a proof bundle against a configuration.
    Verify {
        #[command(flatten)]
        args: ProofVerifyArgs,
    },
}
