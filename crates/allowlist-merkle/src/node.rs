//! Allowlist Merkle tree node type.

use std::fmt;

use crate::hasher::MerkleHasher;

/// A node in the allowlist Merkle tree.
///
/// This is a 32-byte value that represents either:
/// - A leaf: hash of the raw identifier bytes
/// - An internal node: hash of its two children, smaller child first
///
/// Nodes order as byte sequences, which is the order used to sort sibling pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MerkleNode([u8; 32]);

impl MerkleNode {
    /// The zero node (all zeros).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a new node from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Create the leaf node for an identifier.
    #[must_use]
    pub fn leaf<H: MerkleHasher>(identifier: &[u8]) -> Self {
        Self(H::hash(identifier))
    }

    /// Combine two sibling nodes into their parent.
    ///
    /// The pair is sorted ascending before hashing, so `combine(a, b) == combine(b, a)`.
    #[must_use]
    pub fn combine<H: MerkleHasher>(lhs: &Self, rhs: &Self) -> Self {
        let (low, high) = if lhs <= rhs { (lhs, rhs) } else { (rhs, lhs) };
        Self(H::hash_pair(&low.0, &high.0))
    }
}

impl fmt::Display for MerkleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for MerkleNode {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<MerkleNode> for [u8; 32] {
    fn from(node: MerkleNode) -> Self {
        node.0
    }
}

impl AsRef<[u8]> for MerkleNode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
