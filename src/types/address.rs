//! Account and contract addresses.
//!
//! Addresses are 20 raw bytes, rendered as `0x`-prefixed hex. The all-zero
//! address is the null account: an order whose `taker` is
//! [`Address::ZERO`] may be filled by anyone.

use std::fmt;

/// A 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null account (all zero bytes).
    pub const ZERO: Address = Address([0u8; 20]);

    /// Build an address from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Check whether this is the null account.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Raw bytes of the address.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a hex address, with or without a `0x` prefix.
    ///
    /// Returns `None` unless the string decodes to exactly 20 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use nix_engine::types::Address;
    ///
    /// let addr = Address::from_hex("0x0000000000000000000000000000000000000001").unwrap();
    /// assert!(!addr.is_zero());
    /// assert!(Address::from_hex("0xbad").is_none());
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).ok()?;
        let raw: [u8; 20] = bytes.try_into().ok()?;
        Some(Address(raw))
    }

    /// Deterministic throwaway address for demos and tests: byte `n`
    /// repeated across all 20 positions.
    pub const fn repeat(n: u8) -> Self {
        Address([n; 20])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::repeat(1).is_zero());
        assert_eq!(Address::default(), Address::ZERO);
    }

    #[test]
    fn test_hex_roundtrip() {
        let addr = Address::repeat(0xAB);
        let text = addr.to_string();

        assert_eq!(text, format!("0x{}", "ab".repeat(20)));
        assert_eq!(Address::from_hex(&text), Some(addr));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        // Wrong length
        assert_eq!(Address::from_hex("0x00"), None);
        // Not hex
        assert_eq!(Address::from_hex(&"zz".repeat(20)), None);
        // 32 bytes (too long)
        assert_eq!(Address::from_hex(&"00".repeat(32)), None);
    }

    #[test]
    fn test_from_hex_accepts_unprefixed() {
        let addr = Address::from_hex(&"11".repeat(20)).unwrap();
        assert_eq!(addr, Address::repeat(0x11));
    }
}
