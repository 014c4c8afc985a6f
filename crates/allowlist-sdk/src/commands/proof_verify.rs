use std::path::PathBuf;

use allowlist_core::base::Address;
use allowlist_core::schema::config::{AllowlistConfiguration, HashFunction};
use allowlist_core::schema::proofs::{AllowlistProofs, MembershipProof};
use allowlist_merkle::{
    Keccak256Hasher, MerkleHasher, MerkleNode, MerkleProof, Sha256Hasher, verify_proof,
};
use eyre::{ContextCompat as _, ensure};
use tracing::{info, instrument, warn};

use super::files::read_json;
use crate::common::RootEncoding;

/// Verify a proof bundle against an allowlist configuration.
///
/// The bundle must use the configuration's hash function and root. Every entry
/// (or only the entry for `address`) must have a leaf equal to the hash of its
/// address and a sibling path that folds to the root.
///
/// # Errors
/// Returns an error if either file cannot be read, the bundle does not belong to
/// the configuration, or any checked proof is invalid.
#[instrument(skip_all, fields(proofs = %proofs_file.display()))]
pub async fn verify_proofs(
    configuration_file: PathBuf,
    proofs_file: PathBuf,
    address: Option<Address>,
) -> eyre::Result<()> {
    let configuration: AllowlistConfiguration =
        read_json(&configuration_file, "allowlist configuration").await?;
    let bundle: AllowlistProofs = read_json(&proofs_file, "proof bundle").await?;

    ensure!(
        bundle.hash_function == configuration.hash_function,
        "Proof bundle uses {}, configuration uses {}",
        bundle.hash_function.as_str_name(),
        configuration.hash_function.as_str_name()
    );
    ensure!(
        bundle.root == configuration.root,
        "Proof bundle root {} does not match configuration root {}",
        RootEncoding::Hex.encode(&bundle.root),
        RootEncoding::Hex.encode(&configuration.root)
    );

    let entries: Vec<&MembershipProof> = match address {
        Some(address) => vec![
            bundle
                .find(&address)
                .with_context(|| format!("No proof for {address} in the bundle"))?,
        ],
        None => bundle.proofs.iter().collect(),
    };
    ensure!(!entries.is_empty(), "Proof bundle contains no proofs");

    let mut failures = 0_usize;
    for entry in &entries {
        if verify_membership_proof(&configuration, entry) {
            info!(address = %entry.address, "Proof valid");
        } else {
            warn!(address = %entry.address, "Proof invalid");
            failures = failures.saturating_add(1);
        }
    }

    ensure!(
        failures == 0,
        "{failures} of {} proofs failed verification",
        entries.len()
    );
    info!(count = entries.len(), "All proofs verified");
    Ok(())
}

/// Check a single distribution entry against a configuration.
///
/// Returns `false` on any mismatch; never errors.
#[must_use]
pub fn verify_membership_proof(
    configuration: &AllowlistConfiguration,
    entry: &MembershipProof,
) -> bool {
    let root = MerkleNode::new(configuration.root);
    match configuration.hash_function {
        HashFunction::Keccak256 => verify_entry::<Keccak256Hasher>(&root, entry),
        HashFunction::Sha256 => verify_entry::<Sha256Hasher>(&root, entry),
    }
}

fn verify_entry<H: MerkleHasher>(root: &MerkleNode, entry: &MembershipProof) -> bool {
    let leaf = MerkleNode::leaf::<H>(entry.address.as_ref());
    leaf.to_bytes() == entry.leaf
        && verify_proof::<H>(
            root,
            entry.address.as_ref(),
            &MerkleProof::from(entry.proof.clone()),
        )
}
