//! Foundational primitive types and byte/serde helpers.

mod address;
mod utils;

pub use address::{ADDRESS_SIZE, Address, AddressError, parse_address_list};
pub use utils::{PrefixedHex, strip_hex_prefix};
