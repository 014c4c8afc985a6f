//! Allowlist Merkle tree construction and proof generation.
//!
//! The tree keeps every layer in memory. Layer 0 holds the canonical leaves and
//! each following layer pairs adjacent nodes left to right:
//!
//! - each pair is sorted before hashing (see [`MerkleNode::combine`])
//! - the last node of an odd layer is carried up unchanged
//!
//! Duplicate identifiers collapse to a single leaf.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "Index math is bounded by layer widths validated at construction"
)]

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use allowlist_core::schema::config::{HashFunction, LeafOrder};

use crate::core::{MerkleTreeError, PAIR_PREIMAGE_LEN, layer_widths, validate_leaf_count};
use crate::hasher::{Keccak256Hasher, MerkleHasher};
use crate::node::MerkleNode;
use crate::proof::MerkleProof;

/// An immutable Merkle tree over a fixed set of identifiers.
///
/// # Usage
///
/// 1. Build the tree with [`AllowlistTree::build`]
/// 2. Publish the root from [`AllowlistTree::root`]
/// 3. Hand out proofs from [`AllowlistTree::proof`]
/// 4. Anyone holding the root checks them with [`crate::verify_proof`]
///
/// The tree must be rebuilt when the identifier set changes.
#[derive(Debug, Clone)]
pub struct AllowlistTree<H = Keccak256Hasher> {
    leaf_order: LeafOrder,
    /// Layers from the leaves (index 0) up to the root.
    layers: Vec<Vec<MerkleNode>>,
    /// Leaf node to its position in layer 0.
    positions: HashMap<MerkleNode, usize>,
    hasher: PhantomData<H>,
}

impl<H> Default for AllowlistTree<H> {
    fn default() -> Self {
        Self {
            leaf_order: LeafOrder::default(),
            layers: Vec::new(),
            positions: HashMap::new(),
            hasher: PhantomData,
        }
    }
}

impl<H: MerkleHasher> AllowlistTree<H> {
    /// Build a tree from identifiers.
    ///
    /// # Errors
    /// - `MerkleTreeError::EmptyInput` if no identifiers are supplied.
    /// - `MerkleTreeError::IdentifierLength` if identifiers differ in length.
    /// - `MerkleTreeError::PairSizedIdentifier` if identifiers are 64 bytes long.
    /// - `MerkleTreeError::LeavesOverflow` if there are 2^32 leaves or more.
    pub fn build<I>(identifiers: I, leaf_order: LeafOrder) -> Result<Self, MerkleTreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Self::build_with_progress(identifiers, leaf_order, |_, _| {})
    }

    /// Build a tree from identifiers, reporting `(hashed_nodes, total_nodes)` after
    /// every internal layer.
    ///
    /// # Errors
    /// Same as [`Self::build`].
    pub fn build_with_progress<I>(
        identifiers: I,
        leaf_order: LeafOrder,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Self, MerkleTreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let leaves = canonical_leaves(hash_leaves::<H, I>(identifiers)?, leaf_order);
        validate_leaf_count(leaves.len())?;

        let total_nodes: usize = layer_widths(leaves.len()).iter().sum();
        let mut hashed_nodes = leaves.len();
        let mut layers = vec![leaves];
        loop {
            let next = match layers.last() {
                Some(current) if current.len() > 1 => next_layer::<H>(current),
                Some(_) | None => break,
            };
            hashed_nodes += next.len();
            layers.push(next);
            progress(hashed_nodes, total_nodes);
        }

        Ok(Self::from_layers(leaf_order, layers))
    }

    /// Assemble a tree from already computed layers.
    pub(crate) fn from_layers(leaf_order: LeafOrder, layers: Vec<Vec<MerkleNode>>) -> Self {
        let positions = layers
            .first()
            .map(|leaves| {
                leaves
                    .iter()
                    .enumerate()
                    .map(|(position, leaf)| (*leaf, position))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            leaf_order,
            layers,
            positions,
            hasher: PhantomData,
        }
    }

    /// Returns the root of the tree.
    ///
    /// # Errors
    /// Returns `MerkleTreeError::EmptyTree` if the tree holds no nodes.
    pub fn root(&self) -> Result<MerkleNode, MerkleTreeError> {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .ok_or(MerkleTreeError::EmptyTree)
    }

    /// Hash function the tree is built with.
    #[must_use]
    pub const fn hash_function(&self) -> HashFunction {
        H::FUNCTION
    }

    /// Leaf ordering the tree was built with.
    #[must_use]
    pub const fn leaf_order(&self) -> LeafOrder {
        self.leaf_order
    }

    /// Returns the number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Number of layers above the leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Canonical leaves in tree order.
    #[must_use]
    pub fn leaves(&self) -> &[MerkleNode] {
        self.layers.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// All layers, leaves first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<MerkleNode>] {
        &self.layers
    }

    /// Leaf position of `identifier`, if it is part of the tree.
    #[must_use]
    pub fn position(&self, identifier: &[u8]) -> Option<usize> {
        self.positions
            .get(&MerkleNode::leaf::<H>(identifier))
            .copied()
    }

    /// Whether `identifier` is part of the tree.
    #[must_use]
    pub fn contains(&self, identifier: &[u8]) -> bool {
        self.position(identifier).is_some()
    }

    /// Generate the membership proof for `identifier`.
    ///
    /// # Errors
    /// Returns `MerkleTreeError::NotFound` if the identifier is not in the tree.
    pub fn proof(&self, identifier: &[u8]) -> Result<MerkleProof, MerkleTreeError> {
        let position = self
            .position(identifier)
            .ok_or_else(|| MerkleTreeError::NotFound(hex::encode(identifier)))?;
        self.proof_at(position)
    }

    /// Generate the membership proof for the leaf at `position`.
    ///
    /// At every layer the sibling at `index ^ 1` is recorded when it exists. A node
    /// carried up from an odd layer records nothing for that layer.
    ///
    /// # Errors
    /// Returns `MerkleTreeError::PositionOutOfBounds` if `position` is not a leaf.
    pub fn proof_at(&self, position: usize) -> Result<MerkleProof, MerkleTreeError> {
        if position >= self.leaf_count() {
            return Err(MerkleTreeError::PositionOutOfBounds(position));
        }

        let mut index = position;
        let mut siblings = Vec::with_capacity(self.depth());
        for layer in self.layers.iter().take(self.depth()) {
            if let Some(sibling) = layer.get(index ^ 1) {
                siblings.push(*sibling);
            }
            index /= 2;
        }
        Ok(MerkleProof::new(siblings))
    }
}

/// Hash every identifier into a leaf, checking they all share one length
/// and none could be mistaken for an internal node preimage.
fn hash_leaves<H, I>(identifiers: I) -> Result<Vec<MerkleNode>, MerkleTreeError>
where
    H: MerkleHasher,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut first_len = None;
    identifiers
        .into_iter()
        .enumerate()
        .map(|(index, identifier)| {
            let bytes = identifier.as_ref();
            if bytes.len() == PAIR_PREIMAGE_LEN {
                return Err(MerkleTreeError::PairSizedIdentifier { index });
            }
            let expected = *first_len.get_or_insert(bytes.len());
            if bytes.len() != expected {
                return Err(MerkleTreeError::IdentifierLength {
                    index,
                    expected,
                    actual: bytes.len(),
                });
            }
            Ok(MerkleNode::leaf::<H>(bytes))
        })
        .collect()
}

/// Apply the leaf ordering and drop duplicate leaves.
fn canonical_leaves(mut leaves: Vec<MerkleNode>, leaf_order: LeafOrder) -> Vec<MerkleNode> {
    match leaf_order {
        LeafOrder::Sorted => {
            leaves.sort_unstable();
            leaves.dedup();
        }
        LeafOrder::Insertion => {
            let mut seen = HashSet::with_capacity(leaves.len());
            leaves.retain(|leaf| seen.insert(*leaf));
        }
    }
    leaves
}

/// Pair adjacent nodes, carrying the last node of an odd layer.
pub(crate) fn next_layer<H: MerkleHasher>(layer: &[MerkleNode]) -> Vec<MerkleNode> {
    layer
        .chunks(2)
        .filter_map(|pair| match *pair {
            [left, right] => Some(MerkleNode::combine::<H>(&left, &right)),
            [carried] => Some(carried),
            _ => None,
        })
        .collect()
}
