//! Execution receipt returned by every successful fill.

use crate::types::{Address, OrderKey};

/// Summary of one executed fill.
///
/// The receipt identifies the order by both handles (index and key), the
/// account that filled it, and exactly what moved: the token ids and the
/// settlement amount, at the ledger time of execution. The same data is
/// journaled as an `OrderExecuted` event on the store; the receipt is the
/// caller's copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// Sequential index of the filled order.
    pub order_index: u64,

    /// Content-derived key of the filled order.
    pub order_key: OrderKey,

    /// Account that executed the fill.
    pub taker: Address,

    /// Token ids moved by this fill.
    pub token_ids: Vec<u64>,

    /// Settlement amount moved by this fill, in smallest units.
    pub settlement_amount: u64,

    /// Ledger timestamp of execution.
    pub timestamp: u64,
}

impl ExecutionReceipt {
    /// Create a new receipt
    pub fn new(
        order_index: u64,
        order_key: OrderKey,
        taker: Address,
        token_ids: Vec<u64>,
        settlement_amount: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            order_index,
            order_key,
            taker,
            token_ids,
            settlement_amount,
            timestamp,
        }
    }

    /// Number of token ids moved by this fill.
    pub fn token_count(&self) -> usize {
        self.token_ids.len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
