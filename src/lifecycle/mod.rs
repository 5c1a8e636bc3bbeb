//! Order lifecycle: maker-side creation and the status rules.
//!
//! ## Responsibilities
//!
//! 1. **Creation**: validate maker arguments, compute the order key,
//!    persist through the store
//! 2. **Cancellation**: maker-only withdrawal of an active order
//! 3. **Fillability**: the single predicate the execution path consults
//! 4. **Transitions**: commit post-fill remaining-id and status changes
//!
//! Status transitions are monotone: `Active` is the only initial state,
//! and `Cancelled` / `Executed` / `NotExecutable` are terminal.
//!
//! ## Example
//!
//! ```
//! use nix_engine::lifecycle::{OrderLifecycle, OrderParams};
//! use nix_engine::store::OrderStore;
//! use nix_engine::types::{Address, OrderType};
//!
//! let lifecycle = OrderLifecycle::new();
//! let mut store = OrderStore::new();
//!
//! let (index, key) = lifecycle
//!     .create(
//!         &mut store,
//!         OrderParams {
//!             maker: Address::repeat(1),
//!             taker: Address::ZERO,
//!             token: Address::repeat(9),
//!             token_ids: vec![1],
//!             settlement_amount: 1_234_560_000,
//!             order_type: OrderType::SellAny,
//!             expiry: 0,
//!         },
//!         1_700_000_000,
//!     )
//!     .unwrap();
//!
//! assert_eq!(store.find_by_key(&key).unwrap(), index);
//! ```

pub mod manager;

pub use manager::{OrderLifecycle, OrderParams};
