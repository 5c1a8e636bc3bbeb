//! Nix Engine - Binary Entry Point
//!
//! Walks the reference scenario end to end: a maker lists one NFT and one
//! open offer, a taker fills the listing, and the final order table and
//! state root are printed.

use nix_engine::types::amount::{from_fixed_trimmed, to_fixed};
use nix_engine::{
    Address, FungibleToken, MatchingEngine, OrderLifecycle, OrderParams, OrderStore, OrderType,
    Result, TokenBank, TokenCollection, TokenGateway,
};

fn short(address: Address) -> String {
    let text = address.to_string();
    text[..8].to_string()
}

fn print_orders(label: &str, store: &OrderStore) {
    println!("--- {} - orders: {} ---", label, store.len());
    println!(
        "  {:>3} {:<8} {:<8} {:>12} {:<8} {:>10} {:<13} {:<10} remaining",
        "#", "maker", "taker", "amount", "type", "expiry", "status", "key"
    );
    for (index, order) in store.iter() {
        println!(
            "  {:>3} {:<8} {:<8} {:>12} {:<8?} {:>10} {:<13?} {:<10} {:?}",
            index,
            short(order.maker),
            if order.taker.is_zero() {
                "(any)".to_string()
            } else {
                short(order.taker)
            },
            from_fixed_trimmed(order.settlement_amount),
            order.order_type(),
            order.expiry,
            order.status(),
            order.key.short(),
            order.remaining(),
        );
    }
    println!();
}

fn main() -> Result<()> {
    println!("===========================================");
    println!("  Nix Engine - swap order book demo");
    println!("===========================================");
    println!();

    let maker = Address::repeat(0x10);
    let taker = Address::repeat(0x20);
    let operator = Address::repeat(0xEE);
    let collection_addr = Address::repeat(0x90);

    // Asset setup: four NFTs to the maker, 100 units of the settlement
    // asset to the taker.
    let mut bank = TokenBank::new();
    let mut collection = TokenCollection::new(collection_addr);
    for _ in 0..4 {
        collection.mint(maker);
    }
    bank.mint(taker, to_fixed("100").unwrap_or(0));

    // Approve-then-pull: both sides grant the engine's operator address
    // transfer rights before anything can settle.
    collection.set_approval_for_all(maker, operator, true);
    let taker_funds = bank.balance_of(taker);
    bank.approve(taker, operator, taker_funds);

    let lifecycle = OrderLifecycle::new();
    let engine = MatchingEngine::new();
    let mut store = OrderStore::with_capacity(16);

    let now = 1_700_000_000u64;

    // Order #0: sell token id 1 for 12.3456, no expiry.
    let price = to_fixed("12.3456").unwrap_or(0);
    lifecycle.create(
        &mut store,
        OrderParams {
            maker,
            taker: Address::ZERO,
            token: collection_addr,
            token_ids: vec![1],
            settlement_amount: price,
            order_type: OrderType::SellAny,
            expiry: 0,
        },
        now,
    )?;

    // Order #1: open offer - any owned id at 1.23456 each, 24h expiry.
    lifecycle.create(
        &mut store,
        OrderParams {
            maker,
            taker: Address::ZERO,
            token: collection_addr,
            token_ids: vec![],
            settlement_amount: to_fixed("1.23456").unwrap_or(0),
            order_type: OrderType::SellAny,
            expiry: now + 60 * 60 * 24,
        },
        now,
    )?;

    print_orders("After maker added orders", &store);

    // The taker fills order #0 at the exact listed price.
    let mut gateway = TokenGateway::new(operator, &mut bank, &mut collection);
    let receipt = engine.execute(&mut store, &mut gateway, 0, &[1], price, taker, now + 5)?;
    println!(
        "Executed order #{} ({}): ids {:?} for {}",
        receipt.order_index,
        receipt.order_key.short(),
        receipt.token_ids,
        from_fixed_trimmed(receipt.settlement_amount),
    );
    println!();

    print_orders("After taker executed order #0", &store);

    println!("Balances:");
    println!(
        "  maker: {} units, tokens {:?}",
        from_fixed_trimmed(bank.balance_of(maker)),
        collection.tokens_of(maker),
    );
    println!(
        "  taker: {} units, tokens {:?}",
        from_fixed_trimmed(bank.balance_of(taker)),
        collection.tokens_of(taker),
    );
    println!();
    println!("State root: {}", hex::encode(store.state_root()));

    Ok(())
}
