//! The authoritative order store.
//!
//! ## Architecture
//!
//! - **Slab**: arena holding every order ever created. Orders are never
//!   removed, so slab keys are handed out sequentially and double as the
//!   external order indices.
//! - **HashMap**: order-key → index mapping for O(1) key resolution, no
//!   scan.
//! - **Event journal**: a `Vec<EngineEvent>` appended to by every state
//!   transition.
//!
//! The store owns storage and lookup consistency only; validation and
//! status rules live in the lifecycle and engine components, which take the
//! store as an explicit `&mut` dependency. There is no global instance.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::error::{Error, Result};
use crate::store::EngineEvent;
use crate::types::{Order, OrderKey};

/// Append-only order collection with key index and event journal.
///
/// ## Example
///
/// ```
/// use nix_engine::store::OrderStore;
///
/// let store = OrderStore::with_capacity(1_000);
/// assert_eq!(store.len(), 0);
/// assert!(store.get(0).is_err());
/// ```
#[derive(Debug, Default)]
pub struct OrderStore {
    /// Arena of all orders, indexed by assignment order.
    orders: Slab<Order>,

    /// Order key to index mapping.
    key_index: HashMap<OrderKey, u64>,

    /// Creation counter folded into each order's key.
    next_nonce: u64,

    /// Journal of observable state transitions.
    events: Vec<EngineEvent>,
}

impl OrderStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            key_index: HashMap::with_capacity(order_capacity),
            next_nonce: 0,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Size and capacity
    // ========================================================================

    /// Number of orders ever created.
    #[inline]
    pub fn len(&self) -> u64 {
        self.orders.len() as u64
    }

    /// Whether no orders have been created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Pre-allocated slot count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    // ========================================================================
    // Append and lookup
    // ========================================================================

    /// Append an order, assigning the next sequential index.
    ///
    /// Fails with `DuplicateOrder` if the order's key is already indexed.
    /// Records an `OrderCreated` event on success.
    pub(crate) fn append(&mut self, order: Order) -> Result<u64> {
        if self.key_index.contains_key(&order.key) {
            return Err(Error::DuplicateOrder(order.key));
        }

        let key = order.key;
        let maker = order.maker;
        let order_type = order.order_type();

        let index = self.orders.insert(order) as u64;
        self.key_index.insert(key, index);

        self.events.push(EngineEvent::OrderCreated {
            index,
            key,
            maker,
            order_type,
        });

        Ok(index)
    }

    /// Get an order by index.
    pub fn get(&self, index: u64) -> Result<&Order> {
        self.orders
            .get(index as usize)
            .ok_or(Error::NotFound(index))
    }

    /// Get a mutable order by index. Mutation is reserved for the
    /// lifecycle/engine components.
    pub(crate) fn get_mut(&mut self, index: u64) -> Result<&mut Order> {
        self.orders
            .get_mut(index as usize)
            .ok_or(Error::NotFound(index))
    }

    /// Resolve an order key to its index. Single map lookup, no scan.
    pub fn find_by_key(&self, key: &OrderKey) -> Result<u64> {
        self.key_index
            .get(key)
            .copied()
            .ok_or(Error::KeyNotFound(*key))
    }

    /// Whether any order carries this key.
    #[inline]
    pub fn contains_key(&self, key: &OrderKey) -> bool {
        self.key_index.contains_key(key)
    }

    /// Iterate orders in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Order)> {
        self.orders.iter().map(|(i, order)| (i as u64, order))
    }

    /// Hand out the next creation nonce.
    pub(crate) fn next_nonce(&mut self) -> u64 {
        let nonce = self.next_nonce;
        self.next_nonce += 1;
        nonce
    }

    // ========================================================================
    // Event journal
    // ========================================================================

    /// All recorded events, oldest first.
    #[inline]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Drain the journal.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record an event.
    pub(crate) fn record(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    // ========================================================================
    // Audit digest
    // ========================================================================

    /// SHA-256 digest of the full order state, in index order.
    ///
    /// Covers each order's key (which commits to every immutable field),
    /// its status byte, and its remaining-id set. Two stores that processed
    /// the same call sequence produce identical roots.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for (_, order) in self.iter() {
            hasher.update(order.key.as_bytes());
            hasher.update([order.status_raw]);
            hasher.update((order.remaining_ids.len() as u64).to_le_bytes());
            for id in &order.remaining_ids {
                hasher.update(id.to_le_bytes());
            }
        }

        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
