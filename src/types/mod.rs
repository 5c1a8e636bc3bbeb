//! Core data types for the Nix engine
//!
//! All hashing inputs use deterministic SSZ encoding; all settlement
//! quantities use fixed-point representation (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Address`]: 20-byte account/contract identity
//! - [`Order`]: one maker intent, retained forever
//! - [`OrderType`]: BuyAny / SellAny / BuyAll / SellAll
//! - [`OrderStatus`]: Active / Cancelled / Executed / NotExecutable
//! - [`OrderKey`]: content-derived order fingerprint
//! - [`ExecutionReceipt`]: per-fill settlement summary

mod address;
mod key;
mod order;
mod receipt;
pub mod amount;

// Re-export all types at module level
pub use address::Address;
pub use key::{OrderKey, MAX_ORDER_TOKEN_IDS};
pub use order::{Order, OrderStatus, OrderType};
pub use receipt::ExecutionReceipt;
