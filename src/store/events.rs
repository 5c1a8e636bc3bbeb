//! Typed events journaled by the order store.
//!
//! Each state transition records exactly one event. The journal replaces
//! dynamic log introspection: observers match on the enum instead of
//! decoding opaque log entries.

use crate::types::{Address, OrderKey, OrderType};

/// One observable state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A maker appended a new order.
    OrderCreated {
        index: u64,
        key: OrderKey,
        maker: Address,
        order_type: OrderType,
    },

    /// A taker filled an order (possibly partially, for Any variants).
    OrderExecuted {
        index: u64,
        key: OrderKey,
        taker: Address,
        token_ids: Vec<u64>,
        settlement_amount: u64,
    },

    /// A maker withdrew an order.
    OrderCancelled { index: u64 },
}

impl EngineEvent {
    /// Index of the order this event concerns.
    pub fn order_index(&self) -> u64 {
        match self {
            EngineEvent::OrderCreated { index, .. } => *index,
            EngineEvent::OrderExecuted { index, .. } => *index,
            EngineEvent::OrderCancelled { index } => *index,
        }
    }
}
