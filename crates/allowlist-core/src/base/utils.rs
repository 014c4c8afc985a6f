//! Utility functions for core primitive types.

use serde::Deserialize as _;
use serde::de::Error as _;

/// Strip an optional `0x`/`0X` prefix from a hex string.
#[must_use]
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// A `serde_as` adapter that hex encodes fixed-size byte arrays with a `0x` prefix.
///
/// This is the format EVM tooling expects for roots, leaves and proof entries.
/// Deserialization accepts input with or without the prefix.
pub struct PrefixedHex;

impl<const N: usize> serde_with::SerializeAs<[u8; N]> for PrefixedHex {
    fn serialize_as<S>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }
}

impl<'de, const N: usize> serde_with::DeserializeAs<'de, [u8; N]> for PrefixedHex {
    fn deserialize_as<D>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let mut bytes = [0_u8; N];
        hex::decode_to_slice(strip_hex_prefix(&encoded), &mut bytes).map_err(D::Error::custom)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;

    use super::*;

    #[serde_as]
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    struct Wrapper {
        #[serde_as(as = "PrefixedHex")]
        value: [u8; 4],
    }

    #[test]
    fn strip_prefix_variants() {
        assert_eq!(strip_hex_prefix("0xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("0Xabcd"), "abcd");
        assert_eq!(strip_hex_prefix("abcd"), "abcd");
    }

    #[test]
    fn prefixed_hex_serde() {
        let wrapper = Wrapper {
            value: [0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_string(&wrapper).expect("serialize");
        assert_eq!(json, r#"{"value":"0xdeadbeef"}"#);

        let parsed: Wrapper = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, wrapper);

        let unprefixed: Wrapper =
            serde_json::from_str(r#"{"value":"deadbeef"}"#).expect("deserialize without prefix");
        assert_eq!(unprefixed, wrapper);
    }

    #[test]
    fn prefixed_hex_rejects_wrong_length() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"value":"0xdead"}"#);
        assert!(result.is_err());
    }
}
