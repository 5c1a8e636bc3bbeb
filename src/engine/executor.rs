//! Taker-side order execution.

use crate::error::{Error, Result};
use crate::gateway::TokenGateway;
use crate::lifecycle::OrderLifecycle;
use crate::store::{EngineEvent, OrderStore};
use crate::types::{Address, ExecutionReceipt, Order, OrderStatus};

/// The execution path: validates a fill against an order's type, remaining
/// ids, and price, settles both legs through the gateway, and commits the
/// resulting state.
///
/// Every call is all-or-nothing. Validation and every gateway precondition
/// run before the first transfer, so nothing moves and nothing is recorded
/// unless the whole fill can settle. The single intentional exception: an
/// order found expired here is marked `NotExecutable` before the call
/// fails, so later callers short-circuit on status alone.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    lifecycle: OrderLifecycle,
}

impl MatchingEngine {
    /// Create a new matching engine.
    pub fn new() -> Self {
        Self {
            lifecycle: OrderLifecycle::new(),
        }
    }

    /// Execute a fill against the order at `index`.
    ///
    /// `fill_token_ids` and `fill_amount` are the taker's exact terms for
    /// this call; both are validated against the order before anything
    /// moves. Returns the settlement receipt on success.
    #[allow(clippy::too_many_arguments)]
    pub fn execute(
        &self,
        store: &mut OrderStore,
        gateway: &mut TokenGateway<'_>,
        index: u64,
        fill_token_ids: &[u64],
        fill_amount: u64,
        caller: Address,
        now: u64,
    ) -> Result<ExecutionReceipt> {
        let order = store.get(index)?.clone();

        // Taker restriction gates filling only; reads stay open to all.
        if !order.taker.is_zero() && caller != order.taker {
            return Err(Error::Unauthorized { caller });
        }

        if order.status() != OrderStatus::Active {
            return Err(Error::InvalidState(order.status()));
        }
        if order.is_expired(now) {
            // Persisted so future callers fail fast on status.
            self.lifecycle.mark_not_executable(store, index)?;
            return Err(Error::ExpiredOrder {
                expiry: order.expiry,
                now,
            });
        }
        if !self.lifecycle.is_fillable(&order, now) {
            return Err(Error::InvalidState(order.status()));
        }

        validate_fill_ids(&order, fill_token_ids)?;
        validate_fill_amount(&order, fill_token_ids.len(), fill_amount)?;

        self.settle(gateway, &order, fill_token_ids, fill_amount, caller)?;

        self.lifecycle.settle_fill(store, index, fill_token_ids)?;
        store.record(EngineEvent::OrderExecuted {
            index,
            key: order.key,
            taker: caller,
            token_ids: fill_token_ids.to_vec(),
            settlement_amount: fill_amount,
        });

        Ok(ExecutionReceipt::new(
            index,
            order.key,
            caller,
            fill_token_ids.to_vec(),
            fill_amount,
            now,
        ))
    }

    /// Move both legs of the swap: tokens one way, settlement asset the
    /// other. All gateway preconditions are checked before the first
    /// transfer.
    fn settle(
        &self,
        gateway: &mut TokenGateway<'_>,
        order: &Order,
        fill_token_ids: &[u64],
        fill_amount: u64,
        caller: Address,
    ) -> Result<()> {
        if gateway.collection_address() != order.token {
            return Err(Error::CollectionMismatch {
                gateway: gateway.collection_address(),
                order: order.token,
            });
        }

        // Sell: tokens maker→caller, payment caller→maker. Buy: reverse.
        let (token_from, token_to) = if order.order_type().is_sell() {
            (order.maker, caller)
        } else {
            (caller, order.maker)
        };
        let (payer, payee) = (token_to, token_from);

        for &id in fill_token_ids {
            gateway.ensure_owner(token_from, id)?;
        }
        gateway.ensure_approved(token_from)?;
        gateway.ensure_spendable(payer, fill_amount)?;

        for &id in fill_token_ids {
            gateway.transfer_non_fungible(token_from, token_to, id)?;
        }
        gateway.transfer_fungible(payer, payee, fill_amount)?;

        Ok(())
    }
}

// ============================================================================
// Fill validation
// ============================================================================

/// Check the fill id set against the order-type rules.
fn validate_fill_ids(order: &Order, fill: &[u64]) -> Result<()> {
    if fill.is_empty() {
        return Err(Error::InvalidTokenIds("fill names no token ids"));
    }
    for (i, id) in fill.iter().enumerate() {
        if fill[..i].contains(id) {
            return Err(Error::InvalidTokenIds("fill ids contain duplicates"));
        }
    }

    if order.order_type().is_all() {
        if !fill.iter().all(|id| order.token_ids.contains(id)) {
            return Err(Error::InvalidTokenIds("fill id outside the order's id set"));
        }
        if fill.len() < order.token_ids.len() {
            return Err(Error::PartialFillNotAllowed);
        }
    } else if order.has_explicit_ids()
        && !fill.iter().all(|id| order.remaining().contains(id))
    {
        return Err(Error::InvalidTokenIds("fill id not among remaining ids"));
    }
    // An open offer constrains nothing here; ownership is enforced at the
    // gateway.

    Ok(())
}

/// Check the supplied amount equals the price owed for `fill_count` ids.
///
/// - All variants: the full settlement amount, exactly.
/// - Any variants with an explicit list of n ids: proportional. A k-id
///   fill must satisfy `supplied * n == settlement_amount * k`, compared in
///   u128 so no rounding ever enters.
/// - Open offers: `settlement_amount` is the per-id price.
fn validate_fill_amount(order: &Order, fill_count: usize, supplied: u64) -> Result<()> {
    let owed_exactly = if order.order_type().is_all() {
        supplied == order.settlement_amount
    } else if order.has_explicit_ids() {
        let n = order.token_ids.len() as u128;
        let k = fill_count as u128;
        (supplied as u128) * n == (order.settlement_amount as u128) * k
    } else {
        match order.settlement_amount.checked_mul(fill_count as u64) {
            Some(owed) => supplied == owed,
            None => false,
        }
    };

    if owed_exactly {
        Ok(())
    } else {
        Err(Error::PriceMismatch { supplied })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{FungibleToken, NonFungibleToken, TokenBank, TokenCollection};
    use crate::lifecycle::OrderParams;
    use crate::types::OrderType;

    const NOW: u64 = 1_700_000_000;
    const OPERATOR: Address = Address::repeat(0xEE);
    const MAKER: Address = Address::repeat(1);
    const TAKER: Address = Address::repeat(2);
    const COLLECTION: Address = Address::repeat(9);

    struct Harness {
        engine: MatchingEngine,
        lifecycle: OrderLifecycle,
        store: OrderStore,
        bank: TokenBank,
        nft: TokenCollection,
    }

    impl Harness {
        /// Maker owns token ids 0..count with full approvals; taker holds
        /// `funds` with full allowance.
        fn new(minted_to_maker: usize, taker_funds: u64) -> Self {
            let mut bank = TokenBank::new();
            let mut nft = TokenCollection::new(COLLECTION);

            for _ in 0..minted_to_maker {
                nft.mint(MAKER);
            }
            nft.set_approval_for_all(MAKER, OPERATOR, true);
            nft.set_approval_for_all(TAKER, OPERATOR, true);

            bank.mint(TAKER, taker_funds);
            bank.approve(TAKER, OPERATOR, taker_funds);

            Self {
                engine: MatchingEngine::new(),
                lifecycle: OrderLifecycle::new(),
                store: OrderStore::new(),
                bank,
                nft,
            }
        }

        fn add_order(&mut self, params: OrderParams) -> u64 {
            let (index, _) = self.lifecycle.create(&mut self.store, params, NOW).unwrap();
            index
        }

        fn execute(
            &mut self,
            index: u64,
            ids: &[u64],
            amount: u64,
            caller: Address,
            now: u64,
        ) -> Result<ExecutionReceipt> {
            let mut gateway = TokenGateway::new(OPERATOR, &mut self.bank, &mut self.nft);
            self.engine
                .execute(&mut self.store, &mut gateway, index, ids, amount, caller, now)
        }

        fn status(&self, index: u64) -> OrderStatus {
            self.store.get(index).unwrap().status()
        }
    }

    fn sell_order(ids: Vec<u64>, amount: u64, order_type: OrderType) -> OrderParams {
        OrderParams {
            maker: MAKER,
            taker: Address::ZERO,
            token: COLLECTION,
            token_ids: ids,
            settlement_amount: amount,
            order_type,
            expiry: 0,
        }
    }

    #[test]
    fn test_sell_any_single_listing_fill() {
        let price = 1_234_560_000; // 12.3456
        let mut h = Harness::new(2, price);
        let index = h.add_order(sell_order(vec![1], price, OrderType::SellAny));

        let receipt = h.execute(index, &[1], price, TAKER, NOW).unwrap();

        assert_eq!(receipt.order_index, index);
        assert_eq!(receipt.token_ids, vec![1]);
        assert_eq!(receipt.settlement_amount, price);

        // Both legs settled
        assert_eq!(h.nft.owner_of(1).unwrap(), TAKER);
        assert_eq!(h.bank.balance_of(MAKER), price);
        assert_eq!(h.bank.balance_of(TAKER), 0);

        // Fully consumed
        assert_eq!(h.status(index), OrderStatus::Executed);
        assert!(h.store.get(index).unwrap().remaining().is_empty());
    }

    #[test]
    fn test_sell_any_proportional_partial_fills() {
        let price = 300_000_000; // 3.0 across three ids
        let mut h = Harness::new(3, price);
        let index = h.add_order(sell_order(vec![0, 1, 2], price, OrderType::SellAny));

        // One of three ids at a third of the price
        h.execute(index, &[0], price / 3, TAKER, NOW).unwrap();
        assert_eq!(h.status(index), OrderStatus::Active);
        assert_eq!(h.store.get(index).unwrap().remaining(), &[1, 2]);

        // Refilling a consumed id is rejected
        assert!(matches!(
            h.execute(index, &[0], price / 3, TAKER, NOW),
            Err(Error::InvalidTokenIds(_))
        ));

        // The remainder at two thirds
        h.execute(index, &[1, 2], 2 * price / 3, TAKER, NOW).unwrap();
        assert_eq!(h.status(index), OrderStatus::Executed);
        assert_eq!(h.bank.balance_of(MAKER), price);
    }

    #[test]
    fn test_sell_any_rejects_disproportionate_amount() {
        let price = 300_000_000;
        let mut h = Harness::new(3, price);
        let index = h.add_order(sell_order(vec![0, 1, 2], price, OrderType::SellAny));

        let supplied = price / 3 + 1;
        assert!(matches!(
            h.execute(index, &[0], supplied, TAKER, NOW),
            Err(Error::PriceMismatch { supplied: s }) if s == supplied
        ));
        assert_eq!(h.status(index), OrderStatus::Active);
    }

    #[test]
    fn test_sell_all_rejects_subset() {
        let price = 200_000_000;
        let mut h = Harness::new(2, price);
        let index = h.add_order(sell_order(vec![0, 1], price, OrderType::SellAll));

        assert!(matches!(
            h.execute(index, &[0], price / 2, TAKER, NOW),
            Err(Error::PartialFillNotAllowed)
        ));
        assert_eq!(h.status(index), OrderStatus::Active);
        assert_eq!(h.nft.owner_of(0).unwrap(), MAKER);

        // The full set settles in one call
        h.execute(index, &[0, 1], price, TAKER, NOW).unwrap();
        assert_eq!(h.status(index), OrderStatus::Executed);
        assert_eq!(h.nft.owner_of(0).unwrap(), TAKER);
        assert_eq!(h.nft.owner_of(1).unwrap(), TAKER);
    }

    #[test]
    fn test_sell_all_rejects_foreign_id_and_wrong_price() {
        let price = 200_000_000;
        let mut h = Harness::new(3, price);
        let index = h.add_order(sell_order(vec![0, 1], price, OrderType::SellAll));

        assert!(matches!(
            h.execute(index, &[0, 2], price, TAKER, NOW),
            Err(Error::InvalidTokenIds(_))
        ));
        assert!(matches!(
            h.execute(index, &[0, 1], price - 1, TAKER, NOW),
            Err(Error::PriceMismatch { .. })
        ));
    }

    #[test]
    fn test_buy_any_fill() {
        let price = 500_000_000;
        let mut h = Harness::new(0, 0);

        // Taker holds the tokens; maker holds and approves the funds.
        let id_a = h.nft.mint(TAKER);
        let id_b = h.nft.mint(TAKER);
        h.bank.mint(MAKER, price);
        h.bank.approve(MAKER, OPERATOR, price);

        let index = h.add_order(OrderParams {
            maker: MAKER,
            taker: Address::ZERO,
            token: COLLECTION,
            token_ids: vec![id_a, id_b],
            settlement_amount: price,
            order_type: OrderType::BuyAny,
            expiry: 0,
        });

        h.execute(index, &[id_a], price / 2, TAKER, NOW).unwrap();

        assert_eq!(h.nft.owner_of(id_a).unwrap(), MAKER);
        assert_eq!(h.nft.owner_of(id_b).unwrap(), TAKER);
        assert_eq!(h.bank.balance_of(TAKER), price / 2);
        assert_eq!(h.status(index), OrderStatus::Active);

        h.execute(index, &[id_b], price / 2, TAKER, NOW).unwrap();
        assert_eq!(h.status(index), OrderStatus::Executed);
        assert_eq!(h.bank.balance_of(TAKER), price);
        assert_eq!(h.bank.balance_of(MAKER), 0);
    }

    #[test]
    fn test_restricted_taker() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price);
        let stranger = Address::repeat(7);
        h.bank.mint(stranger, price);
        h.bank.approve(stranger, OPERATOR, price);

        let index = h.add_order(OrderParams {
            taker: TAKER,
            ..sell_order(vec![0], price, OrderType::SellAny)
        });

        assert!(matches!(
            h.execute(index, &[0], price, stranger, NOW),
            Err(Error::Unauthorized { caller }) if caller == stranger
        ));

        h.execute(index, &[0], price, TAKER, NOW).unwrap();
        assert_eq!(h.nft.owner_of(0).unwrap(), TAKER);
    }

    #[test]
    fn test_expired_order_becomes_not_executable() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price);
        let mut params = sell_order(vec![0], price, OrderType::SellAny);
        params.expiry = NOW + 60;
        let index = h.add_order(params);

        let late = NOW + 61;
        assert!(matches!(
            h.execute(index, &[0], price, TAKER, late),
            Err(Error::ExpiredOrder { .. })
        ));
        // The transition persists...
        assert_eq!(h.status(index), OrderStatus::NotExecutable);

        // ...so the next attempt short-circuits on status
        assert!(matches!(
            h.execute(index, &[0], price, TAKER, late),
            Err(Error::InvalidState(OrderStatus::NotExecutable))
        ));
        // Nothing ever moved
        assert_eq!(h.nft.owner_of(0).unwrap(), MAKER);
        assert_eq!(h.bank.balance_of(TAKER), price);
    }

    #[test]
    fn test_missing_approval_propagates_without_state_change() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price);
        // Maker never granted the operator approval on the collection
        h.nft.set_approval_for_all(MAKER, OPERATOR, false);
        let index = h.add_order(sell_order(vec![0], price, OrderType::SellAny));

        let root_before = h.store.state_root();
        assert!(matches!(
            h.execute(index, &[0], price, TAKER, NOW),
            Err(Error::Token(crate::error::TokenError::NotApproved { .. }))
        ));

        assert_eq!(h.status(index), OrderStatus::Active);
        assert_eq!(h.store.state_root(), root_before);
        assert_eq!(h.bank.balance_of(TAKER), price);
        assert_eq!(h.nft.owner_of(0).unwrap(), MAKER);
    }

    #[test]
    fn test_insufficient_funds_propagates() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price - 1);
        let index = h.add_order(sell_order(vec![0], price, OrderType::SellAny));

        assert!(matches!(
            h.execute(index, &[0], price, TAKER, NOW),
            Err(Error::Token(crate::error::TokenError::InsufficientBalance { .. }))
        ));
        assert_eq!(h.status(index), OrderStatus::Active);
    }

    #[test]
    fn test_open_offer_fills_per_id() {
        let unit_price = 123_456_000; // 1.23456 per id
        let mut h = Harness::new(3, 3 * unit_price);
        let index = h.add_order(sell_order(vec![], unit_price, OrderType::SellAny));

        // Two maker-owned ids at twice the unit price
        h.execute(index, &[0, 2], 2 * unit_price, TAKER, NOW).unwrap();
        assert_eq!(h.nft.owner_of(0).unwrap(), TAKER);
        assert_eq!(h.nft.owner_of(2).unwrap(), TAKER);

        // Open offers never exhaust
        assert_eq!(h.status(index), OrderStatus::Active);

        // An id the maker no longer owns is refused at the gateway
        assert!(matches!(
            h.execute(index, &[0], unit_price, TAKER, NOW),
            Err(Error::Token(crate::error::TokenError::NotOwner { .. }))
        ));

        // Wrong per-id total is a price mismatch
        assert!(matches!(
            h.execute(index, &[1], unit_price + 1, TAKER, NOW),
            Err(Error::PriceMismatch { .. })
        ));
    }

    #[test]
    fn test_fill_id_set_hygiene() {
        let price = 200_000_000;
        let mut h = Harness::new(2, price);
        let index = h.add_order(sell_order(vec![0, 1], price, OrderType::SellAny));

        assert!(matches!(
            h.execute(index, &[], price, TAKER, NOW),
            Err(Error::InvalidTokenIds(_))
        ));
        assert!(matches!(
            h.execute(index, &[0, 0], price, TAKER, NOW),
            Err(Error::InvalidTokenIds(_))
        ));
    }

    #[test]
    fn test_collection_mismatch() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price);
        let mut params = sell_order(vec![0], price, OrderType::SellAny);
        params.token = Address::repeat(8); // not the wired collection
        let index = h.add_order(params);

        assert!(matches!(
            h.execute(index, &[0], price, TAKER, NOW),
            Err(Error::CollectionMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_index() {
        let mut h = Harness::new(0, 0);
        assert!(matches!(
            h.execute(42, &[1], 1, TAKER, NOW),
            Err(Error::NotFound(42))
        ));
    }

    #[test]
    fn test_execute_records_event() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price);
        let index = h.add_order(sell_order(vec![0], price, OrderType::SellAny));
        let key = h.store.get(index).unwrap().key;

        h.execute(index, &[0], price, TAKER, NOW).unwrap();

        assert_eq!(
            h.store.events().last().unwrap(),
            &EngineEvent::OrderExecuted {
                index,
                key,
                taker: TAKER,
                token_ids: vec![0],
                settlement_amount: price,
            }
        );
    }

    #[test]
    fn test_cancelled_order_rejects_fills() {
        let price = 100_000_000;
        let mut h = Harness::new(1, price);
        let index = h.add_order(sell_order(vec![0], price, OrderType::SellAny));
        h.lifecycle.cancel(&mut h.store, index, MAKER).unwrap();

        assert!(matches!(
            h.execute(index, &[0], price, TAKER, NOW),
            Err(Error::InvalidState(OrderStatus::Cancelled))
        ));
    }
}
