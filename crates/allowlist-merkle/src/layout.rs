//! Binary encoding of a fully built allowlist tree.
//!
//! Layout: hash function tag (1 byte), leaf order tag (1 byte), leaf count
//! (u64 LE), then every node of every layer, leaves first, 32 bytes each.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "Sizes are derived from a leaf count validated against the tree capacity"
)]

use allowlist_core::schema::config::{HashFunction, LeafOrder};

use crate::core::{MerkleTreeError, layer_widths, validate_leaf_count};
use crate::hasher::MerkleHasher;
use crate::node::MerkleNode;
use crate::tree::{AllowlistTree, next_layer};

const SERIALIZED_HEADER_BYTES: usize = 10;
const SERIALIZED_NODE_BYTES: usize = 32;

const fn hash_function_tag(function: HashFunction) -> u8 {
    match function {
        HashFunction::Keccak256 => 0,
        HashFunction::Sha256 => 1,
    }
}

const fn hash_function_from_tag(tag: u8) -> Option<HashFunction> {
    match tag {
        0 => Some(HashFunction::Keccak256),
        1 => Some(HashFunction::Sha256),
        _ => None,
    }
}

const fn leaf_order_tag(order: LeafOrder) -> u8 {
    match order {
        LeafOrder::Sorted => 0,
        LeafOrder::Insertion => 1,
    }
}

const fn leaf_order_from_tag(tag: u8) -> Option<LeafOrder> {
    match tag {
        0 => Some(LeafOrder::Sorted),
        1 => Some(LeafOrder::Insertion),
        _ => None,
    }
}

impl<H: MerkleHasher> AllowlistTree<H> {
    /// Serialize every layer of the tree.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let node_count: usize = self.layers().iter().map(Vec::len).sum();
        let mut bytes =
            Vec::with_capacity(SERIALIZED_HEADER_BYTES + node_count * SERIALIZED_NODE_BYTES);
        bytes.push(hash_function_tag(H::FUNCTION));
        bytes.push(leaf_order_tag(self.leaf_order()));
        let leaf_count = u64::try_from(self.leaf_count()).unwrap_or(u64::MAX);
        bytes.extend_from_slice(&leaf_count.to_le_bytes());
        for node in self.layers().iter().flatten() {
            bytes.extend_from_slice(node.as_ref());
        }
        bytes
    }

    /// Decode a tree produced by [`Self::to_bytes`].
    ///
    /// Every internal layer is recomputed from the leaves and compared with the
    /// stored nodes, so a tampered file is rejected rather than yielding bad proofs.
    ///
    /// # Errors
    /// - `MerkleTreeError::HashFunctionMismatch` if the tree was built with another hasher.
    /// - `MerkleTreeError::Encoding` if the bytes are truncated, padded or inconsistent.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MerkleTreeError> {
        let (&header, payload) = bytes
            .split_first_chunk::<SERIALIZED_HEADER_BYTES>()
            .ok_or(MerkleTreeError::Encoding("tree file is too short"))?;
        let [function_tag, order_tag, count @ ..] = header;

        let found = hash_function_from_tag(function_tag)
            .ok_or(MerkleTreeError::Encoding("unknown hash function tag"))?;
        if found != H::FUNCTION {
            return Err(MerkleTreeError::HashFunctionMismatch {
                expected: H::FUNCTION,
                found,
            });
        }
        let leaf_order = leaf_order_from_tag(order_tag)
            .ok_or(MerkleTreeError::Encoding("unknown leaf order tag"))?;

        let leaf_count = usize::try_from(u64::from_le_bytes(count))
            .map_err(|_| MerkleTreeError::Encoding("leaf count does not fit into usize"))?;
        if leaf_count == 0 {
            return Err(MerkleTreeError::Encoding("tree has no leaves"));
        }
        validate_leaf_count(leaf_count)?;
        let widths = layer_widths(leaf_count);
        let total_nodes: usize = widths.iter().sum();
        if payload.len() != total_nodes * SERIALIZED_NODE_BYTES {
            return Err(MerkleTreeError::Encoding("tree file length mismatch"));
        }

        let mut nodes = payload.chunks_exact(SERIALIZED_NODE_BYTES).map(|chunk| {
            let mut node = [0_u8; SERIALIZED_NODE_BYTES];
            node.copy_from_slice(chunk);
            MerkleNode::from(node)
        });
        let layers: Vec<Vec<MerkleNode>> = widths
            .iter()
            .map(|width| nodes.by_ref().take(*width).collect())
            .collect();

        validate_layers::<H>(&layers, leaf_order)?;
        Ok(Self::from_layers(leaf_order, layers))
    }
}

fn validate_layers<H: MerkleHasher>(
    layers: &[Vec<MerkleNode>],
    leaf_order: LeafOrder,
) -> Result<(), MerkleTreeError> {
    let leaves = layers
        .first()
        .ok_or(MerkleTreeError::Encoding("tree has no leaf layer"))?;
    let canonical = match leaf_order {
        LeafOrder::Sorted => leaves.windows(2).all(|pair| matches!(pair, [a, b] if a < b)),
        LeafOrder::Insertion => {
            let mut seen = std::collections::HashSet::with_capacity(leaves.len());
            leaves.iter().all(|leaf| seen.insert(*leaf))
        }
    };
    if !canonical {
        return Err(MerkleTreeError::Encoding("leaves are not in canonical order"));
    }

    let consistent = layers.windows(2).all(|pair| match pair {
        [child, parent] => next_layer::<H>(child) == *parent,
        _ => false,
    });
    if !consistent {
        return Err(MerkleTreeError::Encoding("stored nodes do not match leaves"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::{Keccak256Hasher, Sha256Hasher};

    fn sample_tree() -> AllowlistTree<Keccak256Hasher> {
        let identifiers: Vec<[u8; 20]> = (1..=5_u8).map(|byte| [byte; 20]).collect();
        AllowlistTree::build(identifiers, LeafOrder::Sorted).expect("tree should build")
    }

    #[test]
    fn roundtrip_preserves_root_and_proofs() {
        let tree = sample_tree();
        let encoded = tree.to_bytes();
        assert_eq!(encoded.len(), SERIALIZED_HEADER_BYTES + 11 * SERIALIZED_NODE_BYTES);

        let decoded =
            AllowlistTree::<Keccak256Hasher>::from_bytes(&encoded).expect("tree should decode");
        assert_eq!(decoded.root(), tree.root());
        assert_eq!(decoded.leaf_order(), LeafOrder::Sorted);
        assert_eq!(decoded.proof(&[3_u8; 20]), tree.proof(&[3_u8; 20]));
    }

    #[test]
    fn wrong_hasher_is_rejected() {
        let encoded = sample_tree().to_bytes();
        assert_eq!(
            AllowlistTree::<Sha256Hasher>::from_bytes(&encoded).map(|tree| tree.leaf_count()),
            Err(MerkleTreeError::HashFunctionMismatch {
                expected: HashFunction::Sha256,
                found: HashFunction::Keccak256,
            })
        );
    }

    #[test]
    fn truncated_is_rejected() {
        let encoded = sample_tree().to_bytes();
        let truncated = encoded.get(..encoded.len() - 1).expect("non-empty encoding");
        assert_eq!(
            AllowlistTree::<Keccak256Hasher>::from_bytes(truncated).map(|tree| tree.leaf_count()),
            Err(MerkleTreeError::Encoding("tree file length mismatch"))
        );
        assert_eq!(
            AllowlistTree::<Keccak256Hasher>::from_bytes(&[0_u8; 3]).map(|tree| tree.leaf_count()),
            Err(MerkleTreeError::Encoding("tree file is too short"))
        );
    }

    #[test]
    fn tampered_node_is_rejected() {
        let mut encoded = sample_tree().to_bytes();
        let last = encoded.last_mut().expect("non-empty encoding");
        *last ^= 0x01;
        assert_eq!(
            AllowlistTree::<Keccak256Hasher>::from_bytes(&encoded).map(|tree| tree.leaf_count()),
            Err(MerkleTreeError::Encoding("stored nodes do not match leaves"))
        );
    }

    #[test]
    fn zero_leaves_is_rejected() {
        let mut encoded = vec![0_u8, 0_u8];
        encoded.extend_from_slice(&0_u64.to_le_bytes());
        assert_eq!(
            AllowlistTree::<Keccak256Hasher>::from_bytes(&encoded).map(|tree| tree.leaf_count()),
            Err(MerkleTreeError::Encoding("tree has no leaves"))
        );
    }
}
