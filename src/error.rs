//! Error taxonomy for the Nix engine.
//!
//! Every failure aborts the whole call with no partial mutation. The one
//! deliberate exception: executing an expired order persists the
//! `NotExecutable` status before returning [`Error::ExpiredOrder`], so later
//! callers short-circuit without re-deriving staleness.
//!
//! Underlying asset failures (insufficient balance, missing approval,
//! nonexistent token) are a separate enum, [`TokenError`], wrapped
//! transparently: the engine propagates them as-is rather than
//! re-interpreting asset accounting.

use thiserror::Error;

use crate::types::{Address, OrderKey, OrderStatus};

/// Failures raised by the underlying asset interfaces.
///
/// These originate in a [`FungibleToken`](crate::gateway::FungibleToken) or
/// [`NonFungibleToken`](crate::gateway::NonFungibleToken) implementation and
/// pass through the gateway unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Holder's fungible balance cannot cover the transfer.
    #[error("{holder} holds {available} of the settlement asset, {required} required")]
    InsufficientBalance {
        holder: Address,
        available: u64,
        required: u64,
    },

    /// Spender's allowance from the holder cannot cover the transfer.
    #[error("allowance from {owner} to {spender} is {allowance}, {required} required")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: u64,
        required: u64,
    },

    /// Operator has no bulk-transfer approval from the owner.
    #[error("{operator} is not an approved operator for {owner}")]
    NotApproved { owner: Address, operator: Address },

    /// The token id has never been minted.
    #[error("token id {0} does not exist")]
    NonexistentToken(u64),

    /// The account a transfer pulls from does not own the token.
    #[error("{expected} does not own token id {token_id} (owner is {actual})")]
    NotOwner {
        token_id: u64,
        expected: Address,
        actual: Address,
    },
}

/// Engine-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed creation arguments.
    #[error("invalid order: {0}")]
    InvalidOrder(&'static str),

    /// Expiry lies in the past, at creation or at execution time.
    #[error("order expired at {expiry} (ledger time {now})")]
    ExpiredOrder { expiry: u64, now: u64 },

    /// An order with the same key is already recorded.
    #[error("an order with key {0} already exists")]
    DuplicateOrder(OrderKey),

    /// No order at the given index.
    #[error("no order at index {0}")]
    NotFound(u64),

    /// No order recorded under the given key.
    #[error("no order recorded for key {0}")]
    KeyNotFound(OrderKey),

    /// Caller is neither the maker (cancel) nor the restricted taker (fill).
    #[error("caller {caller} is not authorized")]
    Unauthorized { caller: Address },

    /// Operation requires an active order.
    #[error("order is {0:?}; operation requires an active order")]
    InvalidState(OrderStatus),

    /// All-type order filled with a strict subset of its token ids.
    #[error("order requires filling the complete token id set")]
    PartialFillNotAllowed,

    /// Fill id set is empty, has duplicates, or is not covered by the
    /// order's remaining ids.
    #[error("invalid fill token ids: {0}")]
    InvalidTokenIds(&'static str),

    /// Supplied fill amount differs from the price owed for the fill.
    #[error("fill amount {supplied} does not match the price owed")]
    PriceMismatch { supplied: u64 },

    /// The gateway is wired to a different collection than the order names.
    #[error("gateway serves collection {gateway}, order names {order}")]
    CollectionMismatch { gateway: Address, order: Address },

    /// Underlying asset failure, surfaced unchanged.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Engine-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
