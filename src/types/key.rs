//! Deterministic order keys.
//!
//! ## Construction
//!
//! An [`OrderKey`] is the SHA-256 digest of the SSZ serialization of the
//! order's immutable fields plus the store's creation nonce. SSZ gives an
//! unambiguous byte encoding (no separator tricks, no length prefixes to
//! get wrong); SHA-256 gives the 32-byte fingerprint. The nonce makes keys
//! unique even for two orders with byte-identical fields.
//!
//! The key is the order's external handle: stable for the order's lifetime,
//! resolvable back to an index through the store.

use std::fmt;

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::error::Error;
use crate::types::{Address, OrderType};

/// Maximum token ids an order may name.
///
/// This is the capacity of the SSZ list in the key material; creation
/// rejects longer lists up front.
pub const MAX_ORDER_TOKEN_IDS: usize = 128;

// ============================================================================
// Key material
// ============================================================================

/// The immutable fields that feed the key hash, in raw form.
///
/// Field order here IS the key format; reordering fields changes every key.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
struct KeyMaterial {
    maker: [u8; 20],
    taker: [u8; 20],
    token: [u8; 20],
    token_ids: List<u64, MAX_ORDER_TOKEN_IDS>,
    settlement_amount: u64,
    order_type: u8,
    expiry: u64,
    nonce: u64,
}

// ============================================================================
// OrderKey
// ============================================================================

/// Content-derived fingerprint identifying one order instance.
///
/// ## Example
///
/// ```
/// use nix_engine::types::{Address, OrderKey, OrderType};
///
/// let key = OrderKey::compute(
///     Address::repeat(1),
///     Address::ZERO,
///     Address::repeat(9),
///     &[1],
///     1_234_560_000,
///     OrderType::SellAny,
///     0,
///     0,
/// )
/// .unwrap();
///
/// // Same inputs, same key; different nonce, different key.
/// let same = OrderKey::compute(
///     Address::repeat(1),
///     Address::ZERO,
///     Address::repeat(9),
///     &[1],
///     1_234_560_000,
///     OrderType::SellAny,
///     0,
///     0,
/// )
/// .unwrap();
/// assert_eq!(key, same);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct OrderKey([u8; 32]);

impl OrderKey {
    /// Compute the key for an order's immutable fields.
    ///
    /// Fails with `InvalidOrder` if `token_ids` exceeds
    /// [`MAX_ORDER_TOKEN_IDS`].
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        maker: Address,
        taker: Address,
        token: Address,
        token_ids: &[u64],
        settlement_amount: u64,
        order_type: OrderType,
        expiry: u64,
        nonce: u64,
    ) -> crate::error::Result<Self> {
        let ids = List::<u64, MAX_ORDER_TOKEN_IDS>::try_from(token_ids.to_vec())
            .map_err(|_| Error::InvalidOrder("order names more than 128 token ids"))?;

        let material = KeyMaterial {
            maker: maker.0,
            taker: taker.0,
            token: token.0,
            token_ids: ids,
            settlement_amount,
            order_type: order_type.to_u8(),
            expiry,
            nonce,
        };

        let encoded = ssz_rs::serialize(&material)
            .map_err(|_| Error::InvalidOrder("order fields are not encodable"))?;

        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        let result = hasher.finalize();

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&result);
        Ok(OrderKey(bytes))
    }

    /// Wrap raw digest bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        OrderKey(bytes)
    }

    /// Raw digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Abbreviated form for tables: `0x` plus the first 8 hex digits.
    pub fn short(&self) -> String {
        format!("0x{}", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
