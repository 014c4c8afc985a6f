//! Command-line interface for the `allowlist` CLI application.

mod config;
pub mod constants;
mod proof;

use allowlist_core::base::Address;
use allowlist_core::schema::config::{HashFunction, LeafOrder};
use allowlist_sdk::common::RootEncoding;
use clap::Parser;
use eyre::{Context as _, Result, eyre};

pub use self::config::ConfigCommands;
pub use self::proof::ProofCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "allowlist")]
#[command(about = "NFT allowlist Merkle tree tools")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Allowlist configuration utilities.
    Config {
        /// Config subcommands.
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Membership proof commands.
    Proof {
        /// Proof subcommands.
        #[command(subcommand)]
        command: ProofCommands,
    },
}

pub fn parse_hash_function(s: &str) -> Result<HashFunction> {
    HashFunction::from_str_name(s).ok_or_else(|| {
        eyre!("Invalid hash function: {s}. Expected 'keccak256' or 'sha256'.")
    })
}

pub fn parse_leaf_order(s: &str) -> Result<LeafOrder> {
    LeafOrder::from_str_name(s)
        .ok_or_else(|| eyre!("Invalid leaf order: {s}. Expected 'sorted' or 'insertion'."))
}

pub fn parse_root_encoding(s: &str) -> Result<RootEncoding> {
    match s {
        "hex" => Ok(RootEncoding::Hex),
        "base64" => Ok(RootEncoding::Base64),
        other => Err(eyre!(
            "Invalid root encoding: {other}. Expected 'hex' or 'base64'."
        )),
    }
}

pub fn parse_address(s: &str) -> Result<Address> {
    s.parse().with_context(|| format!("Invalid address: {s}"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use allowlist_sdk::commands::TreeSource;
    use clap::Parser as _;

    use super::*;

    const MEMBER: &str = "0x3733bDCA4daBf8aFE2C7fd513812d8343165E8ed";

    #[test]
    fn hash_function_parse() {
        assert_eq!(
            parse_hash_function("keccak256").expect("keccak256 should parse"),
            HashFunction::Keccak256
        );
        assert_eq!(
            parse_hash_function("sha256").expect("sha256 should parse"),
            HashFunction::Sha256
        );
        assert!(parse_hash_function("md5").is_err());
    }

    #[test]
    fn leaf_order_parse() {
        assert_eq!(
            parse_leaf_order("sorted").expect("sorted should parse"),
            LeafOrder::Sorted
        );
        assert_eq!(
            parse_leaf_order("insertion").expect("insertion should parse"),
            LeafOrder::Insertion
        );
        assert!(parse_leaf_order("random").is_err());
    }

    #[test]
    fn root_encoding_parse() {
        assert_eq!(
            parse_root_encoding("hex").expect("hex should parse"),
            RootEncoding::Hex
        );
        assert_eq!(
            parse_root_encoding("base64").expect("base64 should parse"),
            RootEncoding::Base64
        );
        assert!(parse_root_encoding("base58").is_err());
    }

    #[test]
    fn address_parse() {
        assert!(parse_address(MEMBER).is_ok());
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0x0000000000000000000000000000000000000000").is_err());
    }

    #[test]
    fn parse_proof_generate_requires_one_tree_source() {
        let cli = Cli::try_parse_from(["allowlist", "proof", "generate", "--address", MEMBER]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "allowlist",
            "proof",
            "generate",
            "--address",
            MEMBER,
            "--input",
            "allowlist.txt",
            "--tree",
            "allowlist-tree.bin",
        ]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "allowlist",
            "proof",
            "generate",
            "--address",
            MEMBER,
            "--tree",
            "allowlist-tree.bin",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn proof_generate_source_follows_flag() {
        for (flag, path) in [("--input", "allowlist.txt"), ("--tree", "allowlist-tree.bin")] {
            let cli = Cli::try_parse_from([
                "allowlist", "proof", "generate", "--address", MEMBER, flag, path,
            ])
            .expect("one tree source parses");
            let Commands::Proof {
                command: ProofCommands::Generate { args },
            } = cli.command
            else {
                panic!("expected proof generate");
            };
            let source = args.source();
            if flag == "--tree" {
                assert!(matches!(source, TreeSource::Tree(p) if p == PathBuf::from(path)));
            } else {
                assert!(matches!(source, TreeSource::Addresses(p) if p == PathBuf::from(path)));
            }
        }
    }

    #[test]
    fn parse_config_build_defaults() {
        let cli = Cli::try_parse_from(["allowlist", "config", "build"]).expect("defaults parse");
        let Commands::Config {
            command: ConfigCommands::Build { args },
        } = cli.command
        else {
            panic!("expected config build");
        };
        assert_eq!(args.hash, HashFunction::Keccak256);
        assert_eq!(args.leaf_order, LeafOrder::Sorted);
        assert!(args.tree_out.is_none());
    }
}
