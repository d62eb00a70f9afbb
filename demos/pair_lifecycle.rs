//! Exchange pair lifecycle example.
//!
//! Opens a pool over an in-memory ledger, seeds it, trades in both
//! directions with both exact sides, moves shares between providers, and
//! drains the pool back to empty.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=exchange_pair=debug cargo run --example pair_lifecycle
//! ```

use exchange_pair::prelude::*;
use tracing_subscriber::EnvFilter;

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Exchange Pair (x · y = k, 0.30% fee) ===\n");

    // ── 1. Describe the pool ────────────────────────────────────────────
    let base = Address::from_bytes([1u8; 32]);
    let paired = Address::from_bytes([2u8; 32]);
    let pool_account = Address::from_bytes([0xEE; 32]);
    let alice = Address::from_bytes([0xA0; 32]);
    let bob = Address::from_bytes([0xB0; 32]);

    let pair = AssetPair::new(base, paired)?;
    let meta = AssetMetadata::new("DAI", "Dai Stablecoin")?;
    let config = PoolConfig::new(pair, pool_account, ShareToken::for_paired_asset(&meta))?;
    println!(
        "Share token: {} ({})",
        config.share_token().symbol(),
        config.share_token().name()
    );

    // ── 2. Fund accounts and approve the pool ───────────────────────────
    let mut ledger = InMemoryLedger::new();
    for who in [alice, bob] {
        for asset in [base, paired] {
            ledger.mint(&asset, &who, Amount::new(1_000 * E18))?;
            ledger.approve(&asset, &who, &pool_account, Amount::MAX);
        }
    }

    let clock = ManualClock::at(Timestamp::new(1_700_000_000));
    let deadline = Timestamp::new(1_700_000_600);
    let mut pool = ExchangePool::new(config, ledger, clock.clone(), EventLog::new())?;
    println!("State: {}", pool.state());

    // ── 3. First deposit fixes the ratio ────────────────────────────────
    let seeded = pool.deposit(
        alice,
        Deposit::new(Amount::new(100 * E18), Shares::ZERO, Amount::new(100 * E18), deadline),
    )?;
    println!("\n--- Seed ---");
    println!("  Deposited:   {} A + {} B", seeded.amount_a(), seeded.amount_b());
    println!("  Shares:      {}", seeded.shares_minted());
    println!("  Reserves:    {}", pool.reserves());

    // ── 4. Exact-input swap: sell 10 A ──────────────────────────────────
    let quoted = pool.quote_exact_input(&base, Amount::new(10 * E18), &paired)?;
    let sold = pool.sell_base_exact(bob, Amount::new(10 * E18), quoted, deadline)?;
    println!("\n--- Sell 10 A ---");
    println!("  Paid:        {}", sold.amount_in());
    println!("  Received:    {}", sold.amount_out());
    println!("  Reserves:    {}", pool.reserves());

    // ── 5. Exact-output swap: buy 1 A ───────────────────────────────────
    let cost = pool.quote_exact_output(&paired, &base, Amount::new(E18))?;
    let bought = pool.buy_base_exact(bob, Amount::new(E18), cost, deadline)?;
    println!("\n--- Buy 1 A ---");
    println!("  Paid:        {}", bought.amount_in());
    println!("  Received:    {}", bought.amount_out());

    // ── 6. A second provider joins at the current ratio ─────────────────
    let (needed_a, expected) = pool.quote_deposit(Amount::new(10 * E18))?;
    let joined = pool.deposit(
        bob,
        Deposit::new(Amount::new(10 * E18), expected, needed_a, deadline),
    )?;
    println!("\n--- Bob deposits 10 B ---");
    println!("  Paid A:      {}", joined.amount_a());
    println!("  Shares:      {}", joined.shares_minted());

    // ── 7. A late request is refused ────────────────────────────────────
    clock.advance(3_600);
    let late = pool.sell_paired_exact(bob, Amount::new(E18), Amount::ZERO, deadline);
    println!("\n--- After the deadline ---");
    println!("  Result:      {late:?}");
    clock.set(deadline);

    // ── 8. Everyone leaves ──────────────────────────────────────────────
    for who in [bob, alice] {
        let held = pool.shares_of(&who);
        let out = pool.withdraw(who, Withdraw::new(held, Amount::ZERO, Amount::ZERO, deadline))?;
        let (a, b) = out.amounts();
        println!("\n--- Withdraw {held} shares ---");
        println!("  Received:    {a} A + {b} B");
    }
    println!("\nState: {} reserves {}", pool.state(), pool.reserves());

    println!("\n--- Events ---");
    for event in pool.events().events() {
        println!("  {}", event.name());
    }

    println!("\n=== Done ===");
    Ok(())
}
