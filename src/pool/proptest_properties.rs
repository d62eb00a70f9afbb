//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Product preservation**: `reserveA * reserveB` never decreases over
//!    any sequence of swaps, and the cache always matches the ledger.
//! 2. **Inverse consistency**: pricing an output back to its input never
//!    asks for more than was paid.
//! 3. **No bonus**: a swap moves exactly the priced amounts.
//! 4. **Ratio preservation**: deposits move the reserve ratio by less than
//!    one rounding unit and never against existing holders.
//! 5. **Liquidity round trip**: deposit then withdraw returns no more than
//!    was put in.
//! 6. **Deadline**: an expired operation changes nothing.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::domain::{Amount, Deposit, Shares, SwapExactInput, SwapExactOutput, Withdraw};
use crate::error::ExchangeError;
use crate::pricing::{input_given_output, output_given_input};
use crate::traits::AssetLedger;

use super::fixtures::{alice, base, bob, paired, pool_account, seeded_pool, TestPool, DEADLINE};

/// Funds handed to the trader in every property.
const TRADER_FUNDS: u128 = 1_000_000_000_000_000_000_000_000_000_000;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserve sizes from dust-sensitive to 18-decimal scale.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// One swap: direction, exact side, and size as per-mille of the input reserve.
fn swap_strategy() -> impl Strategy<Value = (bool, bool, u128)> {
    (any::<bool>(), any::<bool>(), 1u128..=500u128)
}

fn trader_balances(pool: &TestPool) -> (Amount, Amount) {
    (
        pool.ledger().balance_of(&base(), &bob()),
        pool.ledger().balance_of(&paired(), &bob()),
    )
}

// ---------------------------------------------------------------------------
// Property 1: Product preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in prop::collection::vec(swap_strategy(), 1..12),
    ) {
        let mut pool = seeded_pool(ra, rb, TRADER_FUNDS);
        for (sell_base, exact_out, per_mille) in swaps {
            let before = pool.reserves();
            let (asset_in, asset_out) = if sell_base {
                (base(), paired())
            } else {
                (paired(), base())
            };
            let reserve_in = if sell_base { before.reserve_a() } else { before.reserve_b() };
            let reserve_out = if sell_base { before.reserve_b() } else { before.reserve_a() };

            let result = if exact_out {
                let amount = Amount::new((reserve_out.get() / 1_000 * per_mille).max(1));
                pool.swap_exact_output(
                    bob(),
                    SwapExactOutput::new(asset_in, asset_out, amount, Amount::MAX, DEADLINE),
                )
            } else {
                let amount = Amount::new((reserve_in.get() / 1_000 * per_mille).max(1));
                pool.swap_exact_input(
                    bob(),
                    SwapExactInput::new(asset_in, amount, asset_out, Amount::ZERO, DEADLINE),
                )
            };

            let after = pool.reserves();
            if result.is_err() {
                prop_assert_eq!(after, before);
            }
            prop_assert!(after.product() >= before.product());
            prop_assert_eq!(after, pool.observed_reserves());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Inverse consistency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_inverse_never_exceeds_input(
        x in reserve_strategy(),
        y in reserve_strategy(),
        a in 1u128..=1_000_000_000_000_000_000_000_000u128,
    ) {
        let Ok(out) = output_given_input(Amount::new(a), Amount::new(x), Amount::new(y)) else {
            return Ok(());
        };
        if out.is_zero() {
            return Ok(());
        }
        let Ok(back) = input_given_output(out, Amount::new(x), Amount::new(y)) else {
            panic!("a priced output is always below the reserve");
        };
        prop_assert!(back.get() <= a, "inverse {} exceeds input {}", back, a);
    }
}

// ---------------------------------------------------------------------------
// Property 3: No bonus
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_moves_exactly_priced_amounts(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        per_mille in 1u128..=1_000u128,
    ) {
        let mut pool = seeded_pool(ra, rb, TRADER_FUNDS);
        let amount_in = Amount::new((rb / 1_000 * per_mille).max(1));
        let (base_before, paired_before) = trader_balances(&pool);
        let pool_before = pool.reserves();

        let request = SwapExactInput::new(paired(), amount_in, base(), Amount::ZERO, DEADLINE);
        let Ok(receipt) = pool.swap_exact_input(bob(), request) else {
            return Ok(());
        };
        let (base_after, paired_after) = trader_balances(&pool);

        prop_assert_eq!(paired_before.get() - paired_after.get(), amount_in.get());
        prop_assert_eq!(base_after.get() - base_before.get(), receipt.amount_out().get());
        let Ok(priced) = output_given_input(amount_in, pool_before.reserve_b(), pool_before.reserve_a()) else {
            panic!("swap succeeded so pricing succeeds");
        };
        prop_assert_eq!(receipt.amount_out(), priced);
        prop_assert_eq!(
            pool.reserves().reserve_a().get(),
            pool_before.reserve_a().get() - priced.get()
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4: Ratio preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_deposit_preserves_ratio(
        ra in 1_000u128..=1_000_000_000_000u128,
        rb in 1_000u128..=1_000_000_000_000u128,
        db in 1u128..=1_000_000_000_000u128,
    ) {
        let mut pool = seeded_pool(ra, rb, TRADER_FUNDS);
        // Required base stays far below the trader's funds in this range.
        let request = Deposit::new(Amount::new(db), Shares::ZERO, Amount::MAX, DEADLINE);
        let Ok(_) = pool.deposit(bob(), request) else {
            panic!("funded deposit into an active pool succeeds");
        };
        let after = pool.reserves();
        let (ra2, rb2) = (after.reserve_a().get(), after.reserve_b().get());

        // ra2 / rb2 >= ra / rb, and by less than one base unit per rb.
        let lhs = ra2 * rb;
        let rhs = ra * rb2;
        prop_assert!(lhs >= rhs);
        prop_assert!(lhs - rhs < rb);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Liquidity round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_withdraw_never_profits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        db in 1u128..=1_000_000_000_000_000_000_000_000u128,
    ) {
        let mut pool = seeded_pool(ra, rb, TRADER_FUNDS);
        let quote = pool.quote_deposit(Amount::new(db));
        prop_assume!(!matches!(quote, Err(ExchangeError::Overflow(_))));
        let Ok((required_a, _)) = quote else {
            panic!("an active pool quotes deposits");
        };
        prop_assume!(required_a.get() <= TRADER_FUNDS);

        let request = Deposit::new(Amount::new(db), Shares::ZERO, Amount::MAX, DEADLINE);
        let Ok(deposited) = pool.deposit(bob(), request) else {
            panic!("funded deposit into an active pool succeeds");
        };
        let shares = deposited.shares_minted();
        let Ok(withdrawn) = pool.withdraw(bob(), Withdraw::new(shares, Amount::ZERO, Amount::ZERO, DEADLINE)) else {
            panic!("withdrawing freshly minted shares succeeds");
        };
        prop_assert!(withdrawn.amount_a() <= deposited.amount_a());
        prop_assert!(withdrawn.amount_b() <= deposited.amount_b());
        prop_assert_eq!(pool.shares_of(&bob()), Shares::ZERO);
        prop_assert_eq!(pool.total_shares(), pool.shares_of(&alice()));
    }
}

// ---------------------------------------------------------------------------
// Property 6: Deadline
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_expired_operations_change_nothing(
        late_by in 1u64..=1_000_000u64,
        op in 0u8..4u8,
    ) {
        let mut pool = seeded_pool(1_000_000, 1_000_000, TRADER_FUNDS);
        pool.clock().set(DEADLINE.saturating_add(late_by));
        let reserves = pool.reserves();
        let total = pool.total_shares();
        let ledger = pool.ledger().clone();
        let events = pool.events().len();

        let result = match op {
            0 => pool
                .swap_exact_input(
                    bob(),
                    SwapExactInput::new(base(), Amount::new(1_000), paired(), Amount::ZERO, DEADLINE),
                )
                .map(|_| ()),
            1 => pool
                .swap_exact_output(
                    bob(),
                    SwapExactOutput::new(base(), paired(), Amount::new(1_000), Amount::MAX, DEADLINE),
                )
                .map(|_| ()),
            2 => pool
                .deposit(
                    bob(),
                    Deposit::new(Amount::new(1_000), Shares::ZERO, Amount::MAX, DEADLINE),
                )
                .map(|_| ()),
            _ => pool
                .withdraw(
                    alice(),
                    Withdraw::new(Shares::new(1_000), Amount::ZERO, Amount::ZERO, DEADLINE),
                )
                .map(|_| ()),
        };

        let expired = matches!(
            result,
            Err(ExchangeError::TransactionExpired { deadline, .. }) if deadline == DEADLINE
        );
        prop_assert!(expired);
        prop_assert_eq!(pool.reserves(), reserves);
        prop_assert_eq!(pool.total_shares(), total);
        prop_assert_eq!(pool.ledger(), &ledger);
        prop_assert_eq!(pool.events().len(), events);
        prop_assert_eq!(
            pool.ledger().balance_of(&base(), &pool_account()),
            reserves.reserve_a()
        );
    }
}
