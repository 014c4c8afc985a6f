//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Common
pub const ALLOWLIST_CONFIG_FILE: &str = "ALLOWLIST_CONFIG_FILE";
pub const ALLOWLIST_INPUT_FILE: &str = "ALLOWLIST_INPUT_FILE";
pub const ALLOWLIST_TREE_FILE: &str = "ALLOWLIST_TREE_FILE";
pub const ALLOWLIST_PROOFS_FILE: &str = "ALLOWLIST_PROOFS_FILE";
pub const ALLOWLIST_ADDRESS: &str = "ALLOWLIST_ADDRESS";

// Config
pub const ALLOWLIST_HASH: &str = "ALLOWLIST_HASH";
pub const ALLOWLIST_LEAF_ORDER: &str = "ALLOWLIST_LEAF_ORDER";
pub const ALLOWLIST_CONFIG_OUT: &str = "ALLOWLIST_CONFIG_OUT";
pub const ALLOWLIST_PROOFS_OUT: &str = "ALLOWLIST_PROOFS_OUT";
pub const ALLOWLIST_TREE_OUT: &str = "ALLOWLIST_TREE_OUT";
pub const ALLOWLIST_ROOT_ENCODING: &str = "ALLOWLIST_ROOT_ENCODING";

// Proof
pub const ALLOWLIST_PROOF_OUT: &str = "ALLOWLIST_PROOF_OUT";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_INPUT_FILE: &str = "allowlist.txt";
pub const DEFAULT_CONFIG_FILE: &str = "allowlist-config.json";
pub const DEFAULT_PROOFS_FILE: &str = "allowlist-proofs.json";

// Parsed values
pub const DEFAULT_HASH: &str = "keccak256";
pub const DEFAULT_LEAF_ORDER: &str = "sorted";
pub const DEFAULT_ROOT_ENCODING: &str = "hex";
