//! Shared allowlist tree errors and helpers.

use allowlist_core::schema::config::HashFunction;
use thiserror::Error;

/// Maximum number of leaves a tree may hold (exclusive).
pub const MAX_LEAVES: u64 = 1_u64 << 32;

/// Length of the `lo || hi` preimage of an internal node.
///
/// Identifiers of this length could pass an internal node off as a leaf.
pub const PAIR_PREIMAGE_LEN: usize = 64;

/// Errors that can occur when working with the allowlist tree.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// No identifiers were supplied to build the tree.
    #[error("No identifiers supplied for the allowlist tree")]
    EmptyInput,

    /// The tree holds no nodes, so it has no root.
    #[error("The allowlist tree has no nodes")]
    EmptyTree,

    /// The identifier is not part of the tree.
    #[error("Identifier 0x{0} is not part of the allowlist tree")]
    NotFound(String),

    /// The leaf position is outside the leaf layer.
    #[error("Leaf position {0} is out of bounds")]
    PositionOutOfBounds(usize),

    /// All identifiers of one tree must have the same length.
    #[error("Identifier {index} is {actual} bytes long, expected {expected}")]
    IdentifierLength {
        /// Index of the offending identifier in the input.
        index: usize,
        /// Length of the first identifier.
        expected: usize,
        /// Length of the offending identifier.
        actual: usize,
    },

    /// Identifiers may not be as long as an internal node preimage.
    #[error("Identifier {index} is {PAIR_PREIMAGE_LEN} bytes long, the size of an internal node preimage")]
    PairSizedIdentifier {
        /// Index of the offending identifier in the input.
        index: usize,
    },

    /// The tree can support up to 2^32 leaves.
    #[error("Leaves {0} exceeds maximum supported leaves (2^32)")]
    LeavesOverflow(usize),

    /// A serialized tree was built with a different hash function.
    #[error("Tree was built with {found:?}, expected {expected:?}")]
    HashFunctionMismatch {
        /// Hash function of the decoding tree type.
        expected: HashFunction,
        /// Hash function recorded in the encoding.
        found: HashFunction,
    },

    /// A serialized tree is malformed.
    #[error("Invalid tree encoding: {0}")]
    Encoding(&'static str),
}

/// Validate that a leaf count is valid for an allowlist tree.
///
/// # Errors
/// Returns an error if the count is zero or exceeds the tree capacity.
pub fn validate_leaf_count(leaf_count: usize) -> Result<(), MerkleTreeError> {
    if leaf_count == 0 {
        return Err(MerkleTreeError::EmptyInput);
    }
    let fits = u64::try_from(leaf_count).is_ok_and(|count| count < MAX_LEAVES);
    if !fits {
        return Err(MerkleTreeError::LeavesOverflow(leaf_count));
    }
    Ok(())
}

/// Widths of every layer for `leaf_count` leaves, from the leaf layer up to the root.
///
/// Odd layers carry their last node up, so each layer is `ceil(width / 2)` wide.
pub fn layer_widths(leaf_count: usize) -> Vec<usize> {
    let mut widths = Vec::new();
    let mut width = leaf_count;
    while width > 0 {
        widths.push(width);
        if width == 1 {
            break;
        }
        width = width.div_ceil(2);
    }
    widths
}
