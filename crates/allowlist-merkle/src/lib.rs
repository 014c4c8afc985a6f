//! Sorted-pair Merkle tree utilities for allowlist membership proofs.
//!
//! Leaves are the hash of each identifier. Sibling pairs are sorted before they
//! are hashed, so a verifier needs only the sibling hashes, not their positions.
//! The last node of an odd layer is carried up unchanged.

mod core;
mod hasher;
mod layout;
mod node;
mod proof;
mod tree;

pub use core::{MerkleTreeError, PAIR_PREIMAGE_LEN};

pub use hasher::{Keccak256Hasher, MerkleHasher, Sha256Hasher};
pub use node::MerkleNode;
pub use proof::{MerkleProof, verify_leaf, verify_proof};
pub use tree::AllowlistTree;
