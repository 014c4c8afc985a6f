//! Membership proofs and their verification.

use crate::core::PAIR_PREIMAGE_LEN;
use crate::hasher::MerkleHasher;
use crate::node::MerkleNode;

/// Sibling hashes ordered from the leaf layer up to the root.
///
/// A node carried up from an odd layer has no sibling at that layer, so a proof
/// may be shorter than the tree depth.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MerkleProof(Vec<MerkleNode>);

impl MerkleProof {
    /// Create a proof from sibling nodes.
    #[must_use]
    pub const fn new(siblings: Vec<MerkleNode>) -> Self {
        Self(siblings)
    }

    /// Sibling nodes, leaf layer first.
    #[must_use]
    pub fn siblings(&self) -> &[MerkleNode] {
        &self.0
    }

    /// Number of sibling nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof has no siblings (single-leaf tree).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold the proof over `leaf`, returning the implied root.
    #[must_use]
    pub fn compute_root<H: MerkleHasher>(&self, leaf: &MerkleNode) -> MerkleNode {
        self.0
            .iter()
            .fold(*leaf, |current, sibling| MerkleNode::combine::<H>(&current, sibling))
    }

    /// Sibling hashes as raw bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<[u8; 32]> {
        self.0.iter().map(MerkleNode::to_bytes).collect()
    }
}

impl From<Vec<[u8; 32]>> for MerkleProof {
    fn from(siblings: Vec<[u8; 32]>) -> Self {
        Self(siblings.into_iter().map(MerkleNode::from).collect())
    }
}

impl From<MerkleProof> for Vec<MerkleNode> {
    fn from(proof: MerkleProof) -> Self {
        proof.0
    }
}

/// Verify that `identifier` is committed to by `root`.
///
/// Needs no tree: the leaf is recomputed from the identifier and folded with each
/// sibling, sorting every pair before hashing. Any mismatch, including a proof of
/// the wrong length, returns `false`.
///
/// A 64-byte identifier is always rejected: it hashes exactly like an internal
/// node, so a pair of sibling hashes could otherwise pass as a member.
#[must_use]
pub fn verify_proof<H: MerkleHasher>(
    root: &MerkleNode,
    identifier: &[u8],
    proof: &MerkleProof,
) -> bool {
    identifier.len() != PAIR_PREIMAGE_LEN
        && verify_leaf::<H>(root, &MerkleNode::leaf::<H>(identifier), proof)
}

/// Verify a proof for an already hashed leaf.
#[must_use]
pub fn verify_leaf<H: MerkleHasher>(
    root: &MerkleNode,
    leaf: &MerkleNode,
    proof: &MerkleProof,
) -> bool {
    proof.compute_root::<H>(leaf) == *root
}
