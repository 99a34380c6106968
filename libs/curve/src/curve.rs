//! Piecewise blended bonding curve
//!
//! The curve joins two branches at the equilibrium point `(x0, y0)`,
//! where it is continuous and differentiable. On the branch below
//! equilibrium the minimum acceptable counter-reserve is
//!
//! ```text
//! y = y0 + (px / py) * (x0 - x) * (cx + (1 - cx) * (x0 / x))
//! ```
//!
//! with the symmetric form (swapping prices and concentration) solving
//! `x` from `y` on the other branch. A concentration of `1e18`
//! degenerates to constant-sum, `0` to constant-product; intermediate
//! values blend the two per branch.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};
use crate::math::{ceil_div, mul_div, MAX_AMOUNT, MAX_PRICE, ONE_E18};

/// Immutable curve parameters, fixed at pool creation.
///
/// `price_x` / `price_y` are plain integers in `[1, 1e25]`; only their
/// ratio matters. Concentrations use the 1e18 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    pub price_x: u128,
    pub price_y: u128,
    pub concentration_x: u128,
    pub concentration_y: u128,
    pub equilibrium_reserve0: u128,
    pub equilibrium_reserve1: u128,
}

/// Curve capability interface. The engine and quoter only depend on
/// this; additional curve shapes are further implementations, not
/// variants of the existing one.
pub trait BondingCurve {
    /// Minimum acceptable counter-reserve for a known reserve on one
    /// branch. `known_is_x` selects the branch: the known reserve must
    /// lie in `(0, equilibrium]` on its own axis.
    ///
    /// Sufficiency checks must pass `round_up = true`; rounding down
    /// would let the invariant accept too little input.
    fn evaluate(&self, known: u128, known_is_x: bool, round_up: bool) -> Result<u128>;

    /// Whether the point lies on or outside the feasible region.
    fn on_or_above(&self, reserve0: u128, reserve1: u128) -> bool;
}

impl CurveParams {
    pub fn validate(&self) -> Result<()> {
        for (name, price) in [("price_x", self.price_x), ("price_y", self.price_y)] {
            if price == 0 || price > MAX_PRICE {
                return Err(CurveError::InvalidParams {
                    message: format!("{name} must be in [1, 1e25], got {price}"),
                });
            }
        }
        for (name, c) in [
            ("concentration_x", self.concentration_x),
            ("concentration_y", self.concentration_y),
        ] {
            if c > ONE_E18 {
                return Err(CurveError::InvalidParams {
                    message: format!("{name} must be at most 1e18, got {c}"),
                });
            }
        }
        for (name, r) in [
            ("equilibrium_reserve0", self.equilibrium_reserve0),
            ("equilibrium_reserve1", self.equilibrium_reserve1),
        ] {
            if r > MAX_AMOUNT {
                return Err(CurveError::InvalidParams {
                    message: format!("{name} exceeds the amount ceiling, got {r}"),
                });
            }
        }
        Ok(())
    }
}

impl BondingCurve for CurveParams {
    fn evaluate(&self, known: u128, known_is_x: bool, round_up: bool) -> Result<u128> {
        let (px, py, known_eq, other_eq, c) = if known_is_x {
            (
                self.price_x,
                self.price_y,
                self.equilibrium_reserve0,
                self.equilibrium_reserve1,
                self.concentration_x,
            )
        } else {
            (
                self.price_y,
                self.price_x,
                self.equilibrium_reserve1,
                self.equilibrium_reserve0,
                self.concentration_y,
            )
        };

        if known == 0 || known > known_eq {
            return Err(CurveError::Domain);
        }

        let x = U256::from(known);
        let x0 = U256::from(known_eq);
        let c = U256::from(c);
        let one = U256::from(ONE_E18);

        // v = px * (x0 - x) * (c * x + (1e18 - c) * x0) / (x * 1e18),
        // as one fused multiply-divide over the full-width product.
        let a = U256::from(px)
            .checked_mul(x0 - x)
            .ok_or(CurveError::Overflow)?;
        let blend = c
            .checked_mul(x)
            .and_then(|cx| (one - c).checked_mul(x0).and_then(|r| cx.checked_add(r)))
            .ok_or(CurveError::Overflow)?;
        let v = mul_div(a, blend, x * one, round_up)?;

        let py = U256::from(py);
        let scaled = if round_up { ceil_div(v, py)? } else { v / py };

        let required = U256::from(other_eq)
            .checked_add(scaled)
            .ok_or(CurveError::AmountOutOfRange)?;
        let required = u128::try_from(required).map_err(|_| CurveError::AmountOutOfRange)?;
        if required > MAX_AMOUNT {
            return Err(CurveError::AmountOutOfRange);
        }
        Ok(required)
    }

    fn on_or_above(&self, reserve0: u128, reserve1: u128) -> bool {
        if reserve0 > MAX_AMOUNT || reserve1 > MAX_AMOUNT {
            return false;
        }
        if reserve0 >= self.equilibrium_reserve0 {
            if reserve1 >= self.equilibrium_reserve1 {
                return true;
            }
            // reserve1 is deficient: solve the minimum reserve0 from it.
            // A domain or out-of-range requirement means the point sits
            // past an asymptote and cannot be acceptable.
            match self.evaluate(reserve1, false, true) {
                Ok(required0) => reserve0 >= required0,
                Err(_) => false,
            }
        } else {
            if reserve1 < self.equilibrium_reserve1 {
                return false;
            }
            match self.evaluate(reserve0, true, true) {
                Ok(required1) => reserve1 >= required1,
                Err(_) => false,
            }
        }
    }
}
