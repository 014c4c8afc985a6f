//! Serializable membership proof formats.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::config::HashFunction;
use crate::base::{Address, PrefixedHex};

/// Membership proofs for distribution to allowlisted accounts.
///
/// Every entry verifies against `root` using `hash_function`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AllowlistProofs {
    /// Hash function the proofs were generated with.
    pub hash_function: HashFunction,
    /// Root the proofs verify against.
    #[serde_as(as = "PrefixedHex")]
    #[schemars(with = "String")]
    pub root: [u8; 32],
    /// One proof per allowlisted address.
    pub proofs: Vec<MembershipProof>,
}

/// A single address together with its sibling path.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MembershipProof {
    /// The allowlisted address.
    #[serde_as(as = "DisplayFromStr")]
    #[schemars(with = "String")]
    pub address: Address,
    /// Leaf hash of `address`.
    #[serde_as(as = "PrefixedHex")]
    #[schemars(with = "String")]
    pub leaf: [u8; 32],
    /// Sibling hashes ordered from the leaf layer up to the root.
    #[serde_as(as = "Vec<PrefixedHex>")]
    #[schemars(with = "Vec<String>")]
    pub proof: Vec<[u8; 32]>,
}

impl AllowlistProofs {
    /// Find the proof for `address`, if present.
    #[must_use]
    pub fn find(&self, address: &Address) -> Option<&MembershipProof> {
        self.proofs.iter().find(|entry| &entry.address == address)
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Tests index JSON values directly for concise assertions"
)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_json_format() {
        let json = r#"{
          "hash_function": "keccak256",
          "root": "0x0101010101010101010101010101010101010101010101010101010101010101",
          "proofs": [
            {
              "address": "0x3733bDCA4daBf8aFE2C7fd513812d8343165E8ed",
              "leaf": "0x0202020202020202020202020202020202020202020202020202020202020202",
              "proof": [
                "0x0303030303030303030303030303030303030303030303030303030303030303"
              ]
            }
          ]
        }"#;

        let proofs: AllowlistProofs =
            serde_json::from_str(json).expect("Failed to deserialize JSON");
        let address: Address = "0x3733bDCA4daBf8aFE2C7fd513812d8343165E8ed"
            .parse()
            .expect("valid address");

        let entry = proofs.find(&address).expect("entry should exist");
        assert_eq!(entry.leaf, [2_u8; 32]);
        assert_eq!(entry.proof, vec![[3_u8; 32]]);
        assert_eq!(proofs.root, [1_u8; 32]);
    }

    #[test]
    fn serialize_uses_lowercase_prefixed_hex() {
        let proofs = AllowlistProofs {
            hash_function: HashFunction::Sha256,
            root: [0xab; 32],
            proofs: vec![MembershipProof {
                address: Address::new([0x11; 20]),
                leaf: [0xcd; 32],
                proof: Vec::new(),
            }],
        };

        let value = serde_json::to_value(&proofs).expect("serialize");
        assert_eq!(value["hash_function"], "sha256");
        assert_eq!(value["proofs"][0]["address"], format!("0x{}", "11".repeat(20)));
        assert_eq!(value["root"], format!("0x{}", "ab".repeat(32)));
    }
}
