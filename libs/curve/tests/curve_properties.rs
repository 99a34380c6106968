//! Curve shape property tests
//!
//! These validate properties that must hold for every parameter choice:
//! the branch is monotonically decreasing and convex, and the
//! feasibility check agrees exactly with the rounded-up evaluator.

use jitswap_curve::{BondingCurve, CurveParams, ONE_E18};
use proptest::prelude::*;

prop_compose! {
    /// Parameter ranges keep the price ratio within 1e6 and reserves
    /// within 1e9 so every evaluation stays far from the amount
    /// ceiling.
    fn arb_curve()(
        price_x in 1_000_000_000_000_000u128..=1_000_000_000_000_000_000_000u128,
        price_y in 1_000_000_000_000_000u128..=1_000_000_000_000_000_000_000u128,
        concentration_x in 0u128..=ONE_E18,
        concentration_y in 0u128..=ONE_E18,
        equilibrium_reserve0 in 1_000u128..=1_000_000_000u128,
        equilibrium_reserve1 in 1_000u128..=1_000_000_000u128,
    ) -> CurveParams {
        CurveParams {
            price_x,
            price_y,
            concentration_x,
            concentration_y,
            equilibrium_reserve0,
            equilibrium_reserve1,
        }
    }
}

/// Maps a per-mille fraction onto `[x0 / 1000, x0]`, the slice of the
/// branch the quoter actually works in.
fn branch_point(x0: u128, per_mille: u128) -> u128 {
    let lower = (x0 / 1_000).max(1);
    lower + (x0 - lower) * per_mille / 1_000
}

proptest! {
    #[test]
    fn required_reserve_decreases_along_the_branch(
        curve in arb_curve(),
        f1 in 0u128..=1_000,
        f2 in 0u128..=1_000,
    ) {
        let x0 = curve.equilibrium_reserve0;
        let x_low = branch_point(x0, f1.min(f2));
        let x_high = branch_point(x0, f1.max(f2));

        let y_low = curve.evaluate(x_low, true, true).unwrap();
        let y_high = curve.evaluate(x_high, true, true).unwrap();
        prop_assert!(y_low >= y_high);
    }

    #[test]
    fn branch_is_convex_up_to_rounding(
        curve in arb_curve(),
        f in 0u128..=1_000,
        half_span in 0u128..=100_000,
    ) {
        let x0 = curve.equilibrium_reserve0;
        let x1 = branch_point(x0, f);
        let d = half_span.min((x0 - x1) / 2);
        let x2 = x1 + 2 * d;
        let mid = x1 + d;

        let y1 = curve.evaluate(x1, true, false).unwrap();
        let y2 = curve.evaluate(x2, true, false).unwrap();
        let y_mid = curve.evaluate(mid, true, false).unwrap();
        // Each floored evaluation is within 1 of the real value, so the
        // secant inequality holds with a slack of 4.
        prop_assert!(2 * y_mid <= y1 + y2 + 4);
    }

    #[test]
    fn feasibility_boundary_matches_the_evaluator(
        curve in arb_curve(),
        f in 0u128..=1_000,
    ) {
        let x = branch_point(curve.equilibrium_reserve0, f);
        let y = curve.evaluate(x, true, true).unwrap();

        prop_assert!(curve.on_or_above(x, y));
        prop_assert!(!curve.on_or_above(x, y - 1));
    }

    #[test]
    fn rounding_modes_differ_by_at_most_one(
        curve in arb_curve(),
        f in 0u128..=1_000,
    ) {
        let x = branch_point(curve.equilibrium_reserve0, f);
        let up = curve.evaluate(x, true, true).unwrap();
        let down = curve.evaluate(x, true, false).unwrap();
        prop_assert!(up >= down && up - down <= 1);
    }
}
