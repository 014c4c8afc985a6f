use std::collections::HashSet;
use std::path::PathBuf;

use allowlist_core::base::Address;
use allowlist_core::schema::config::{AllowlistConfiguration, HashFunction, LeafOrder};
use allowlist_core::schema::proofs::{AllowlistProofs, MembershipProof};
use allowlist_merkle::{AllowlistTree, Keccak256Hasher, MerkleHasher, Sha256Hasher};
use eyre::Context as _;
use tracing::{info, instrument, warn};

use super::addresses::load_addresses;
use super::files::write_json;
use super::proof_generate::membership_proof;
use crate::common::{RootEncoding, TreeConfig};

/// Everything produced by one tree build.
struct AllowlistArtifacts {
    configuration: AllowlistConfiguration,
    proofs: AllowlistProofs,
    tree_bytes: Option<Vec<u8>>,
}

/// Build the allowlist Merkle tree from an address file and export the
/// configuration (root), the proof bundle and optionally the serialized tree.
///
/// # Errors
/// Returns an error if the address list is invalid, the tree cannot be built or
/// writing any output fails.
#[instrument(skip_all, fields(
    input = %input.display(),
    hash = config.hash_function.as_str_name(),
    order = config.leaf_order.as_str_name(),
))]
pub async fn build_allowlist(
    input: PathBuf,
    config: TreeConfig,
    configuration_output_file: PathBuf,
    proofs_output_file: PathBuf,
    tree_output_file: Option<PathBuf>,
) -> eyre::Result<()> {
    let addresses = load_addresses(&input).await?;

    let keep_tree = tree_output_file.is_some();
    let artifacts = tokio::task::spawn_blocking(move || match config.hash_function {
        HashFunction::Keccak256 => {
            build_artifacts::<Keccak256Hasher>(&addresses, config.leaf_order, keep_tree)
        }
        HashFunction::Sha256 => {
            build_artifacts::<Sha256Hasher>(&addresses, config.leaf_order, keep_tree)
        }
    })
    .await??;

    info!(
        root = %RootEncoding::Hex.encode(&artifacts.configuration.root),
        leaves = artifacts.configuration.leaf_count,
        "Computed allowlist root"
    );

    write_json(&configuration_output_file, &artifacts.configuration).await?;
    info!(file = ?configuration_output_file, "Exported configuration");

    write_json(&proofs_output_file, &artifacts.proofs).await?;
    info!(
        file = ?proofs_output_file,
        count = artifacts.proofs.proofs.len(),
        "Exported membership proofs"
    );

    if let (Some(path), Some(bytes)) = (tree_output_file, artifacts.tree_bytes) {
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write tree file {}", path.display()))?;
        info!(file = ?path, "Saved allowlist tree");
    }

    Ok(())
}

fn build_artifacts<H: MerkleHasher>(
    addresses: &[Address],
    leaf_order: LeafOrder,
    keep_tree: bool,
) -> eyre::Result<AllowlistArtifacts> {
    let mut last_pct = 0_usize;
    let tree = AllowlistTree::<H>::build_with_progress(addresses, leaf_order, |done, total| {
        if should_report_progress(done, total, &mut last_pct) {
            info!(progress = %format!("{last_pct}%"), "Hashing allowlist tree");
        }
    })?;

    let duplicates = addresses.len().saturating_sub(tree.leaf_count());
    if duplicates > 0 {
        warn!(duplicates, "Duplicate addresses collapsed into a single leaf");
    }

    let root = tree.root()?.to_bytes();
    let leaf_count = u64::try_from(tree.leaf_count()).context("Leaf count does not fit in u64")?;

    let mut seen = HashSet::with_capacity(addresses.len());
    let proofs = addresses
        .iter()
        .filter(|address| seen.insert(**address))
        .map(|address| -> eyre::Result<MembershipProof> {
            let proof = tree.proof(address.as_ref())?;
            Ok(membership_proof::<H>(*address, &proof))
        })
        .collect::<eyre::Result<Vec<_>>>()?;

    Ok(AllowlistArtifacts {
        configuration: AllowlistConfiguration::new(H::FUNCTION, leaf_order, leaf_count, root),
        proofs: AllowlistProofs {
            hash_function: H::FUNCTION,
            root,
            proofs,
        },
        tree_bytes: keep_tree.then(|| tree.to_bytes()),
    })
}

const fn should_report_progress(current: usize, total: usize, last_pct: &mut usize) -> bool {
    if total == 0 {
        return false;
    }
    let pct = current.saturating_mul(100).saturating_div(total);
    if pct >= last_pct.saturating_add(10) {
        *last_pct = pct;
        true
    } else {
        false
    }
}
