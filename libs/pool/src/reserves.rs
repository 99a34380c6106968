//! Virtual reserve tracking
//!
//! Reserves are an accounting quantity, not a token balance: they move
//! only by the exact input/output deltas of committed swaps and are
//! never re-derived from vault state. Drift between virtual reserves
//! and the vault's real balance/debt is an operational signal for
//! administrators, not something this core resynchronizes.

use jitswap_curve::{BondingCurve, MAX_AMOUNT};

use crate::error::SwapError;

/// The pool's virtual reserve pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualReserves {
    reserve0: u128,
    reserve1: u128,
}

impl VirtualReserves {
    pub(crate) fn new(reserve0: u128, reserve1: u128) -> Self {
        Self { reserve0, reserve1 }
    }

    pub fn current(&self) -> (u128, u128) {
        (self.reserve0, self.reserve1)
    }

    /// Commits a new reserve pair after re-verifying the curve.
    /// Only the swap engine calls this; a rejected commit leaves the
    /// stored pair untouched.
    pub(crate) fn commit(
        &mut self,
        new_reserve0: u128,
        new_reserve1: u128,
        curve: &dyn BondingCurve,
    ) -> Result<(), SwapError> {
        if new_reserve0 > MAX_AMOUNT || new_reserve1 > MAX_AMOUNT {
            return Err(SwapError::Bounds);
        }
        if !curve.on_or_above(new_reserve0, new_reserve1) {
            return Err(SwapError::InvariantViolation);
        }
        self.reserve0 = new_reserve0;
        self.reserve1 = new_reserve1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitswap_curve::{CurveParams, ONE_E18};

    fn curve() -> CurveParams {
        CurveParams {
            price_x: ONE_E18,
            price_y: ONE_E18,
            concentration_x: ONE_E18 / 2,
            concentration_y: ONE_E18 / 2,
            equilibrium_reserve0: 1_000_000,
            equilibrium_reserve1: 1_000_000,
        }
    }

    #[test]
    fn commit_accepts_points_on_or_above() {
        let mut reserves = VirtualReserves::new(1_000_000, 1_000_000);
        reserves.commit(1_010_051, 990_000, &curve()).unwrap();
        assert_eq!(reserves.current(), (1_010_051, 990_000));
    }

    #[test]
    fn rejected_commit_leaves_reserves_untouched() {
        let mut reserves = VirtualReserves::new(1_000_000, 1_000_000);
        let err = reserves.commit(1_010_050, 990_000, &curve()).unwrap_err();
        assert_eq!(err, SwapError::InvariantViolation);
        assert_eq!(reserves.current(), (1_000_000, 1_000_000));
    }

    #[test]
    fn commit_rejects_out_of_range_reserves() {
        let mut reserves = VirtualReserves::new(1_000_000, 1_000_000);
        let err = reserves
            .commit(MAX_AMOUNT + 1, 1_000_000, &curve())
            .unwrap_err();
        assert_eq!(err, SwapError::Bounds);
    }
}
