//! Hash functions an allowlist tree can be pinned to.

use allowlist_core::schema::config::HashFunction;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// A 256-bit hash function used for leaves and internal nodes.
///
/// The tree type is generic over this trait so the hash function is part of the
/// type, and [`MerkleHasher::FUNCTION`] records it in persisted artifacts.
pub trait MerkleHasher {
    /// Tag recorded alongside roots and serialized trees.
    const FUNCTION: HashFunction;

    /// Hash arbitrary bytes.
    fn hash(data: &[u8]) -> [u8; 32];

    /// Hash the concatenation `left || right`.
    fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32];
}

/// Keccak-256, matching the EVM `keccak256` opcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl MerkleHasher for Keccak256Hasher {
    const FUNCTION: HashFunction = HashFunction::Keccak256;

    fn hash(data: &[u8]) -> [u8; 32] {
        Keccak256::digest(data).into()
    }

    fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
        Keccak256::new()
            .chain_update(left)
            .chain_update(right)
            .finalize()
            .into()
    }
}

/// SHA-256.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    const FUNCTION: HashFunction = HashFunction::Sha256;

    fn hash(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
        Sha256::new()
            .chain_update(left)
            .chain_update(right)
            .finalize()
            .into()
    }
}
