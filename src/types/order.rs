//! Order types for the Nix swap engine.
//!
//! ## Raw Enum Storage
//!
//! `OrderType` and `OrderStatus` are stored inside [`Order`] as raw `u8`
//! discriminants with typed accessors. The raw bytes feed the deterministic
//! key and state-root encodings directly, so the stored form and the hashed
//! form can never drift apart.
//!
//! ## Mutability
//!
//! After creation exactly two things about an order may change: its status,
//! and (for Any-type orders) the remaining unfilled token-id subset. The
//! key, counterparties, price, and candidate id list are fixed for life.

use crate::types::{Address, OrderKey};

// ============================================================================
// OrderType enum
// ============================================================================

/// The four swap variants.
///
/// Buy variants commit the maker's settlement asset against token ids the
/// taker supplies; Sell variants commit the maker's token ids against the
/// taker's settlement asset. Any variants may be consumed across several
/// fills; All variants settle their whole id set in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    /// Maker buys any subset of the listed ids.
    #[default]
    BuyAny,
    /// Maker sells any subset of the listed ids (or any owned id, if the
    /// list is empty).
    SellAny,
    /// Maker buys the entire listed id set in one fill.
    BuyAll,
    /// Maker sells the entire listed id set in one fill.
    SellAll,
}

impl OrderType {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::BuyAny => 0,
            OrderType::SellAny => 1,
            OrderType::BuyAll => 2,
            OrderType::SellAll => 3,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderType::BuyAny),
            1 => Some(OrderType::SellAny),
            2 => Some(OrderType::BuyAll),
            3 => Some(OrderType::SellAll),
            _ => None,
        }
    }

    /// True for BuyAny and BuyAll.
    pub fn is_buy(self) -> bool {
        matches!(self, OrderType::BuyAny | OrderType::BuyAll)
    }

    /// True for SellAny and SellAll.
    pub fn is_sell(self) -> bool {
        !self.is_buy()
    }

    /// True for the partially-fillable variants.
    pub fn is_any(self) -> bool {
        matches!(self, OrderType::BuyAny | OrderType::SellAny)
    }

    /// True for the atomic whole-set variants.
    pub fn is_all(self) -> bool {
        !self.is_any()
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Order status. `Active` is the only initial state; the other three are
/// terminal and never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Open for fills (subject to expiry and remaining ids).
    #[default]
    Active,
    /// Withdrawn by its maker.
    Cancelled,
    /// Fully consumed by one or more fills.
    Executed,
    /// Found expired at execution time; permanently unfillable.
    NotExecutable,
}

impl OrderStatus {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderStatus::Active => 0,
            OrderStatus::Cancelled => 1,
            OrderStatus::Executed => 2,
            OrderStatus::NotExecutable => 3,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderStatus::Active),
            1 => Some(OrderStatus::Cancelled),
            2 => Some(OrderStatus::Executed),
            3 => Some(OrderStatus::NotExecutable),
            _ => None,
        }
    }

    /// Everything except `Active` is terminal.
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Active)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// One maker intent, retained forever once appended to the store.
///
/// ## Example
///
/// ```
/// use nix_engine::types::{Address, Order, OrderKey, OrderStatus, OrderType};
///
/// let order = Order::new(
///     Address::repeat(1),      // maker
///     Address::ZERO,           // taker: unrestricted
///     Address::repeat(9),      // token collection
///     vec![1],                 // token ids
///     1_234_560_000,           // settlement amount: 12.3456
///     OrderType::SellAny,
///     0,                       // expiry: none
///     0,                       // nonce
///     OrderKey::default(),
/// );
/// assert_eq!(order.status(), OrderStatus::Active);
/// assert_eq!(order.remaining(), &[1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Account that created the order; sole authority to cancel.
    pub maker: Address,

    /// Restricted filler, or [`Address::ZERO`] for anyone.
    pub taker: Address,

    /// Address of the non-fungible collection in scope.
    pub token: Address,

    /// Candidate token ids recorded at creation. Empty means "any id the
    /// maker owns" for SellAny.
    pub token_ids: Vec<u64>,

    /// Unfilled subset of `token_ids`, consumed by Any-type fills.
    pub remaining_ids: Vec<u64>,

    /// Committed settlement quantity, in smallest units (10^8 fixed-point).
    pub settlement_amount: u64,

    /// Order type as u8 (0=BuyAny, 1=SellAny, 2=BuyAll, 3=SellAll)
    pub order_type_raw: u8,

    /// Unix timestamp after which the order is unfillable; 0 = no expiry.
    pub expiry: u64,

    /// Order status as u8 (0=Active, 1=Cancelled, 2=Executed, 3=NotExecutable)
    pub status_raw: u8,

    /// Creation sequence number folded into the key.
    pub nonce: u64,

    /// Content-derived fingerprint, fixed at creation.
    pub key: OrderKey,
}

impl Order {
    /// Create a new order in the `Active` state with its full id set
    /// remaining.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        maker: Address,
        taker: Address,
        token: Address,
        token_ids: Vec<u64>,
        settlement_amount: u64,
        order_type: OrderType,
        expiry: u64,
        nonce: u64,
        key: OrderKey,
    ) -> Self {
        let remaining_ids = token_ids.clone();
        Self {
            maker,
            taker,
            token,
            token_ids,
            remaining_ids,
            settlement_amount,
            order_type_raw: order_type.to_u8(),
            expiry,
            status_raw: OrderStatus::Active.to_u8(),
            nonce,
            key,
        }
    }

    /// Get the order type
    pub fn order_type(&self) -> OrderType {
        OrderType::from_u8(self.order_type_raw).unwrap_or_default()
    }

    /// Get the order status
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_u8(self.status_raw).unwrap_or_default()
    }

    /// Set the order status
    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status_raw = status.to_u8();
    }

    /// Unfilled token ids.
    #[inline]
    pub fn remaining(&self) -> &[u64] {
        &self.remaining_ids
    }

    /// Whether the order named concrete candidate ids at creation.
    #[inline]
    pub fn has_explicit_ids(&self) -> bool {
        !self.token_ids.is_empty()
    }

    /// A SellAny order with no id list: fillable against any id the maker
    /// currently owns, never exhausted by fills.
    pub fn is_open_offer(&self) -> bool {
        self.order_type() == OrderType::SellAny && self.token_ids.is_empty()
    }

    /// Whether expiry has passed at ledger time `now`. An expiry of 0 never
    /// passes; `expiry == now` counts as expired.
    #[inline]
    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry != 0 && now >= self.expiry
    }

    /// Remove filled ids from the remaining set.
    pub(crate) fn consume_ids(&mut self, filled: &[u64]) {
        self.remaining_ids.retain(|id| !filled.contains(id));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
