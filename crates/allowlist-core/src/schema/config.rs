use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::base::PrefixedHex;

/// Configuration published alongside the contract: the committed allowlist root
/// and the parameters needed to reproduce it.
#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AllowlistConfiguration {
    /// Hash function used for leaves and internal nodes.
    pub hash_function: HashFunction,
    /// Leaf ordering used before the tree was built.
    #[serde(default)]
    pub leaf_order: LeafOrder,
    /// Number of distinct leaves committed to by `root`.
    pub leaf_count: u64,
    /// Merkle root of the allowlist.
    #[serde_as(as = "PrefixedHex")]
    #[schemars(with = "String")]
    pub root: [u8; 32],
}

impl AllowlistConfiguration {
    /// Create a new allowlist configuration.
    #[must_use]
    pub const fn new(
        hash_function: HashFunction,
        leaf_order: LeafOrder,
        leaf_count: u64,
        root: [u8; 32],
    ) -> Self {
        Self {
            hash_function,
            leaf_order,
            leaf_count,
            root,
        }
    }
}

/// Hash function pinned for an allowlist tree.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    /// Keccak-256, as computed by the EVM `keccak256` opcode.
    #[default]
    Keccak256,
    /// SHA-256.
    Sha256,
}

impl HashFunction {
    /// Parse from CLI string.
    #[must_use]
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "keccak256" => Some(Self::Keccak256),
            "sha256" => Some(Self::Sha256),
            _ => None,
        }
    }

    /// Name used in CLI arguments and JSON.
    #[must_use]
    pub const fn as_str_name(self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }
}

/// How leaves are ordered before the tree is built.
///
/// In both modes duplicate leaves collapse to a single leaf.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeafOrder {
    /// Leaves sorted ascending. The root does not depend on input order.
    #[default]
    Sorted,
    /// Leaves kept in first-seen input order.
    ///
    /// Matches merkletreejs without `sortLeaves` only for duplicate-free lists,
    /// since merkletreejs keeps duplicate leaves.
    Insertion,
}

impl LeafOrder {
    /// Parse from CLI string.
    #[must_use]
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "sorted" => Some(Self::Sorted),
            "insertion" => Some(Self::Insertion),
            _ => None,
        }
    }

    /// Name used in CLI arguments and JSON.
    #[must_use]
    pub const fn as_str_name(self) -> &'static str {
        match self {
            Self::Sorted => "sorted",
            Self::Insertion => "insertion",
        }
    }
}
