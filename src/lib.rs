//! # Nix Engine
//!
//! Deterministic on-ledger NFT swap order book.
//!
//! ## Architecture
//!
//! The engine consists of:
//! - **Types**: Core data structures (Order, OrderKey, ExecutionReceipt)
//! - **Store**: Append-only order arena with key index and event journal
//! - **Lifecycle**: Maker-side creation, cancellation, status transitions
//! - **Engine**: Taker-side fill validation and settlement
//! - **Gateway**: Capability boundary to the external asset contracts
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating Point**: Settlement amounts are u64 smallest units (10^8 scaling)
//! 3. **Explicit State**: The store is passed to every operation; no globals
//! 4. **No Custody**: Assets stay with their owners until a fill pulls both
//!    legs under pre-granted approvals
//!
//! ## Order Variants
//!
//! | Variant  | Fill granularity        | Pricing                    |
//! |----------|-------------------------|----------------------------|
//! | SellAny  | any remaining subset    | proportional (or per-id)   |
//! | BuyAny   | any remaining subset    | proportional               |
//! | SellAll  | entire set, one call    | full settlement amount     |
//! | BuyAll   | entire set, one call    | full settlement amount     |

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy: engine failures and propagated asset failures
pub mod error;

/// Core data types: Address, Order, OrderKey, ExecutionReceipt
pub mod types;

/// Order store: slab arena with key index and event journal
pub mod store;

/// Order lifecycle: creation, cancellation, status transitions
pub mod lifecycle;

/// Matching engine: fill validation and settlement
pub mod engine;

/// Token gateway: asset capability traits and reference implementations
pub mod gateway;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::MatchingEngine;
pub use error::{Error, Result, TokenError};
pub use gateway::{FungibleToken, NonFungibleToken, TokenBank, TokenCollection, TokenGateway};
pub use lifecycle::{OrderLifecycle, OrderParams};
pub use store::{EngineEvent, OrderStore};
pub use types::{Address, ExecutionReceipt, Order, OrderKey, OrderStatus, OrderType};
