//! CLI-independent configuration types.

use allowlist_core::schema::config::{HashFunction, LeafOrder};
use base64::Engine as _;

/// Parameters the allowlist tree is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Hash function for leaves and internal nodes.
    pub hash_function: HashFunction,
    /// Leaf ordering applied before building.
    pub leaf_order: LeafOrder,
}

/// Text encoding used when printing a root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootEncoding {
    /// `0x`-prefixed lowercase hex.
    #[default]
    Hex,
    /// Standard padded base64.
    Base64,
}

impl RootEncoding {
    /// Encode a 32-byte root.
    #[must_use]
    pub fn encode(self, root: &[u8; 32]) -> String {
        match self {
            Self::Hex => format!("0x{}", hex::encode(root)),
            Self::Base64 => base64::engine::general_purpose::STANDARD.encode(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use allowlist_core::base::Address;
    use allowlist_merkle::{AllowlistTree, Keccak256Hasher};

    use super::*;

    #[test]
    fn encode_root() {
        let root = [0xff_u8; 32];
        assert_eq!(RootEncoding::Hex.encode(&root), format!("0x{}", "ff".repeat(32)));
        assert_eq!(
            RootEncoding::Base64.encode(&root),
            "//////////////////////////////////////////8="
        );
    }

    #[test]
    fn base64_root_of_two_addresses() {
        let members: Vec<Address> = [
            "0x3733bDCA4daBf8aFE2C7fd513812d8343165E8ed",
            "0x06A3D819149D719D267Afa9FCDC5Eb192A0431CB",
        ]
        .iter()
        .map(|s| s.parse().expect("valid address"))
        .collect();
        let root = AllowlistTree::<Keccak256Hasher>::build(&members, LeafOrder::Sorted)
            .and_then(|tree| tree.root())
            .expect("tree should have a root");

        assert_eq!(
            RootEncoding::Base64.encode(&root.to_bytes()),
            "CIR6y2vwc3D/Ld2l2J6DHVPaywa+4+QAw1VZyIWyPjw="
        );
    }

    #[test]
    fn tree_config_defaults() {
        let config = TreeConfig::default();
        assert_eq!(config.hash_function, HashFunction::Keccak256);
        assert_eq!(config.leaf_order, LeafOrder::Sorted);
    }
}
