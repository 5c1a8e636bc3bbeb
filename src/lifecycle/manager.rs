//! Order creation, cancellation, and status transitions.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::store::{EngineEvent, OrderStore};
use crate::types::{
    Address, Order, OrderKey, OrderStatus, OrderType, MAX_ORDER_TOKEN_IDS,
};

/// Maker-supplied creation arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderParams {
    /// Account creating the order.
    pub maker: Address,
    /// Restricted filler, or [`Address::ZERO`] for anyone.
    pub taker: Address,
    /// Non-fungible collection in scope.
    pub token: Address,
    /// Candidate token ids; empty is only meaningful for Sell variants.
    pub token_ids: Vec<u64>,
    /// Committed settlement quantity, in smallest units.
    pub settlement_amount: u64,
    /// Swap variant.
    pub order_type: OrderType,
    /// Unix expiry timestamp; 0 = no expiry.
    pub expiry: u64,
}

/// Maker-side validation and the status rules every other component defers
/// to. Stateless; the store is passed explicitly to every operation.
#[derive(Debug, Default)]
pub struct OrderLifecycle;

impl OrderLifecycle {
    /// Create a new lifecycle component.
    pub fn new() -> Self {
        Self
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Validate and persist a new order. Returns its index and key.
    ///
    /// Validation per the order-type contract:
    /// - `token` must be non-null
    /// - Buy variants must name candidate ids; Sell variants may pass an
    ///   empty list (SellAny: "any id the maker owns")
    /// - ids must be unique and at most [`MAX_ORDER_TOKEN_IDS`]
    /// - `expiry` must be 0 or strictly in the future
    pub fn create(
        &self,
        store: &mut OrderStore,
        params: OrderParams,
        now: u64,
    ) -> Result<(u64, OrderKey)> {
        let OrderParams {
            maker,
            taker,
            token,
            token_ids,
            settlement_amount,
            order_type,
            expiry,
        } = params;

        if token.is_zero() {
            return Err(Error::InvalidOrder("token contract is the null address"));
        }
        if order_type.is_buy() && token_ids.is_empty() {
            return Err(Error::InvalidOrder(
                "buy orders must name candidate token ids",
            ));
        }
        if token_ids.len() > MAX_ORDER_TOKEN_IDS {
            return Err(Error::InvalidOrder("order names more than 128 token ids"));
        }
        let mut seen = HashSet::new();
        if !token_ids.iter().all(|id| seen.insert(*id)) {
            return Err(Error::InvalidOrder("token ids contain duplicates"));
        }
        if expiry != 0 && expiry <= now {
            return Err(Error::ExpiredOrder { expiry, now });
        }

        let nonce = store.next_nonce();
        let key = OrderKey::compute(
            maker,
            taker,
            token,
            &token_ids,
            settlement_amount,
            order_type,
            expiry,
            nonce,
        )?;

        let order = Order::new(
            maker,
            taker,
            token,
            token_ids,
            settlement_amount,
            order_type,
            expiry,
            nonce,
            key,
        );

        // The nonce makes collisions unreachable; append still checks.
        let index = store.append(order)?;
        Ok((index, key))
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Cancel an active order. Maker-only; no assets move (nothing was
    /// escrowed at creation).
    pub fn cancel(&self, store: &mut OrderStore, index: u64, caller: Address) -> Result<()> {
        let order = store.get_mut(index)?;

        if order.maker != caller {
            return Err(Error::Unauthorized { caller });
        }
        if order.status() != OrderStatus::Active {
            return Err(Error::InvalidState(order.status()));
        }

        order.set_status(OrderStatus::Cancelled);
        store.record(EngineEvent::OrderCancelled { index });
        Ok(())
    }

    // ========================================================================
    // Fillability and post-fill transitions
    // ========================================================================

    /// Whether the order can currently be filled: Active, unexpired, and
    /// (for Any variants with an explicit list) ids still remaining.
    pub fn is_fillable(&self, order: &Order, now: u64) -> bool {
        if order.status() != OrderStatus::Active || order.is_expired(now) {
            return false;
        }
        if order.order_type().is_any() && order.has_explicit_ids() {
            return !order.remaining().is_empty();
        }
        true
    }

    /// Persist the `NotExecutable` transition for an order found expired at
    /// execution time.
    pub(crate) fn mark_not_executable(&self, store: &mut OrderStore, index: u64) -> Result<()> {
        store.get_mut(index)?.set_status(OrderStatus::NotExecutable);
        Ok(())
    }

    /// Commit the state effects of a validated fill: consume ids and mark
    /// Executed when the order is exhausted. Returns the resulting status.
    pub(crate) fn settle_fill(
        &self,
        store: &mut OrderStore,
        index: u64,
        filled: &[u64],
    ) -> Result<OrderStatus> {
        let order = store.get_mut(index)?;

        if order.order_type().is_all() {
            order.set_status(OrderStatus::Executed);
        } else if order.has_explicit_ids() {
            order.consume_ids(filled);
            if order.remaining().is_empty() {
                order.set_status(OrderStatus::Executed);
            }
        }
        // An open offer has no finite set to exhaust; it stays Active.

        Ok(order.status())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
