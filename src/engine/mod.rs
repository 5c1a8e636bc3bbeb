//! Matching engine module for the Nix swap engine.
//!
//! ## Design Principles
//!
//! The execution path is designed for:
//!
//! 1. **Determinism**: Same call sequence always produces the same state
//! 2. **Integer Math**: Proportional pricing via exact u128 cross-multiplication
//! 3. **Synchronous Execution**: One fill runs to completion, no interleaving
//! 4. **All-or-Nothing Calls**: Every precondition is checked before the
//!    first transfer
//!
//! ## Fill Rules
//!
//! - **Any variants** consume a chosen subset of the remaining ids at the
//!   proportional price; the rest stays fillable
//! - **All variants** settle their whole id set in one call at the full
//!   settlement amount
//! - **Open offers** (SellAny, empty list) price per id against whatever
//!   the maker currently owns
//!
//! ## Example
//!
//! ```
//! use nix_engine::engine::MatchingEngine;
//! use nix_engine::gateway::{TokenBank, TokenCollection, TokenGateway};
//! use nix_engine::lifecycle::{OrderLifecycle, OrderParams};
//! use nix_engine::store::OrderStore;
//! use nix_engine::types::{Address, OrderStatus, OrderType};
//!
//! let (maker, taker, operator) = (Address::repeat(1), Address::repeat(2), Address::repeat(3));
//! let collection_addr = Address::repeat(9);
//!
//! let mut store = OrderStore::new();
//! let mut bank = TokenBank::new();
//! let mut collection = TokenCollection::new(collection_addr);
//!
//! // Maker lists token id 0; taker funds the purchase. Both approve the
//! // engine's operator address up front.
//! let id = collection.mint(maker);
//! collection.set_approval_for_all(maker, operator, true);
//! bank.mint(taker, 100_000_000);
//! bank.approve(taker, operator, 100_000_000);
//!
//! let lifecycle = OrderLifecycle::new();
//! let (index, _) = lifecycle
//!     .create(
//!         &mut store,
//!         OrderParams {
//!             maker,
//!             taker: Address::ZERO,
//!             token: collection_addr,
//!             token_ids: vec![id],
//!             settlement_amount: 100_000_000,
//!             order_type: OrderType::SellAny,
//!             expiry: 0,
//!         },
//!         1_000,
//!     )
//!     .unwrap();
//!
//! let engine = MatchingEngine::new();
//! let mut gateway = TokenGateway::new(operator, &mut bank, &mut collection);
//! engine
//!     .execute(&mut store, &mut gateway, index, &[id], 100_000_000, taker, 1_001)
//!     .unwrap();
//!
//! assert_eq!(store.get(index).unwrap().status(), OrderStatus::Executed);
//! ```

pub mod executor;

pub use executor::MatchingEngine;
