//! Config subcommands.

use std::path::PathBuf;

use allowlist_core::schema::config::{HashFunction, LeafOrder};
use allowlist_sdk::common::RootEncoding;

use super::constants::{
    ALLOWLIST_CONFIG_FILE, ALLOWLIST_CONFIG_OUT, ALLOWLIST_HASH, ALLOWLIST_INPUT_FILE,
    ALLOWLIST_LEAF_ORDER, ALLOWLIST_PROOFS_OUT, ALLOWLIST_ROOT_ENCODING, ALLOWLIST_TREE_OUT,
    DEFAULT_CONFIG_FILE, DEFAULT_HASH, DEFAULT_INPUT_FILE, DEFAULT_LEAF_ORDER,
    DEFAULT_PROOFS_FILE, DEFAULT_ROOT_ENCODING,
};
use super::{parse_hash_function, parse_leaf_order, parse_root_encoding};

/// Arguments for `config build`.
#[derive(Debug, clap::Args)]
pub struct ConfigBuildArgs {
    /// Address list: one address per line, or a JSON array when the file ends in `.json`.
    #[arg(long, env = ALLOWLIST_INPUT_FILE, default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,
    /// Hash function for leaves and internal nodes.
    #[arg(
        long,
        env = ALLOWLIST_HASH,
        default_value = DEFAULT_HASH,
        value_parser = parse_hash_function
    )]
    pub hash: HashFunction,
    /// Leaf ordering: `sorted` (input-order independent) or `insertion`.
    #[arg(
        long,
        env = ALLOWLIST_LEAF_ORDER,
        default_value = DEFAULT_LEAF_ORDER,
        value_parser = parse_leaf_order
    )]
    pub leaf_order: LeafOrder,
    /// Configuration output file.
    #[arg(long, env = ALLOWLIST_CONFIG_OUT, default_value = DEFAULT_CONFIG_FILE)]
    pub config_out: PathBuf,
    /// Membership proofs output file.
    #[arg(long, env = ALLOWLIST_PROOFS_OUT, default_value = DEFAULT_PROOFS_FILE)]
    pub proofs_out: PathBuf,
    /// Optional serialized tree output file, for proof generation without the address list.
    #[arg(long, env = ALLOWLIST_TREE_OUT)]
    pub tree_out: Option<PathBuf>,
}

/// Arguments for `config root`.
#[derive(Debug, clap::Args)]
pub struct ConfigRootArgs {
    /// Allowlist configuration file.
    #[arg(long, env = ALLOWLIST_CONFIG_FILE, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Output encoding: `hex` or `base64`.
    #[arg(
        long,
        env = ALLOWLIST_ROOT_ENCODING,
        default_value = DEFAULT_ROOT_ENCODING,
        value_parser = parse_root_encoding
    )]
    pub encoding: RootEncoding,
}

/// Config command group.
#[derive(Debug, clap::Subcommand)]
pub enum ConfigCommands {
    /// Build the allowlist tree and export configuration and proofs.
    Build {
        #[command(flatten)]
        args: ConfigBuildArgs,
    },
    /// Print the root of an allowlist configuration.
    Root {
        #[command(flatten)]
        args: ConfigRootArgs,
    },
    /// Print the JSON schema of the configuration file.
    Schema {
        /// Print the proof bundle schema instead.
        #[arg(long, default_value_t = false)]
        proofs: bool,
    },
}
