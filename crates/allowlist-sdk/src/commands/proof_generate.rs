use std::path::PathBuf;

use allowlist_core::base::Address;
use allowlist_core::schema::config::{AllowlistConfiguration, HashFunction};
use allowlist_core::schema::proofs::{AllowlistProofs, MembershipProof};
use allowlist_merkle::{
    AllowlistTree, Keccak256Hasher, MerkleHasher, MerkleNode, MerkleProof, Sha256Hasher,
};
use eyre::{Context as _, ensure};
use tracing::{info, instrument};

use super::addresses::load_addresses;
use super::files::{read_json, write_json};
use crate::common::RootEncoding;

/// Where the allowlist tree for proof generation comes from.
#[derive(Debug, Clone)]
pub enum TreeSource {
    /// Rebuild the tree from the original address list.
    Addresses(PathBuf),
    /// Load a tree saved by `build_allowlist`.
    Tree(PathBuf),
}

enum TreeInput {
    Addresses(Vec<Address>),
    Bytes(Vec<u8>),
}

/// Generate the membership proof for a single address.
///
/// The tree is rebuilt (or loaded) and must reproduce the configuration root
/// before any proof is handed out. The result is a one-entry proof bundle written
/// to `proof_output_file`, or printed to stdout when no file is given.
///
/// # Errors
/// Returns an error if the tree cannot be obtained, its root does not match the
/// configuration, or the address is not on the allowlist.
#[instrument(skip_all, fields(address = %address))]
#[allow(clippy::print_stdout, reason = "Prints proof to stdout when no file is given")]
pub async fn generate_proof(
    address: Address,
    source: TreeSource,
    configuration_file: PathBuf,
    proof_output_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let configuration: AllowlistConfiguration =
        read_json(&configuration_file, "allowlist configuration").await?;

    let input = match source {
        TreeSource::Addresses(path) => TreeInput::Addresses(load_addresses(&path).await?),
        TreeSource::Tree(path) => TreeInput::Bytes(
            tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read tree file {}", path.display()))?,
        ),
    };

    let bundle = tokio::task::spawn_blocking(move || match configuration.hash_function {
        HashFunction::Keccak256 => single_proof::<Keccak256Hasher>(&configuration, address, input),
        HashFunction::Sha256 => single_proof::<Sha256Hasher>(&configuration, address, input),
    })
    .await??;

    match proof_output_file {
        Some(path) => {
            write_json(&path, &bundle).await?;
            info!(file = ?path, "Exported membership proof");
        }
        None => println!("{}", serde_json::to_string_pretty(&bundle)?),
    }
    Ok(())
}

fn single_proof<H: MerkleHasher>(
    configuration: &AllowlistConfiguration,
    address: Address,
    input: TreeInput,
) -> eyre::Result<AllowlistProofs> {
    let tree = match input {
        TreeInput::Addresses(addresses) => {
            AllowlistTree::<H>::build(&addresses, configuration.leaf_order)?
        }
        TreeInput::Bytes(bytes) => AllowlistTree::<H>::from_bytes(&bytes)?,
    };

    let root = tree.root()?.to_bytes();
    ensure!(
        root == configuration.root,
        "Tree root {} does not match configuration root {}",
        RootEncoding::Hex.encode(&root),
        RootEncoding::Hex.encode(&configuration.root)
    );

    let proof = tree
        .proof(address.as_ref())
        .with_context(|| format!("Address {address} is not on the allowlist"))?;
    info!(siblings = proof.len(), "Generated membership proof");

    Ok(AllowlistProofs {
        hash_function: H::FUNCTION,
        root,
        proofs: vec![membership_proof::<H>(address, &proof)],
    })
}

/// Distribution entry for `address` and its sibling path.
pub(super) fn membership_proof<H: MerkleHasher>(
    address: Address,
    proof: &MerkleProof,
) -> MembershipProof {
    MembershipProof {
        address,
        leaf: MerkleNode::leaf::<H>(address.as_ref()).to_bytes(),
        proof: proof.to_bytes(),
    }
}
