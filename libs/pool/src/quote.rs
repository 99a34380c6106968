//! Read-only quoting
//!
//! Quotes replay the swap arithmetic against current state without
//! touching the vaults. Because the closed-form inverse of the curve is
//! not exact under integer rounding, both directions bisect over the
//! feasibility predicate the swap commit itself uses, so a quoted trade
//! submitted against unchanged state always clears.
//!
//! Quotes are advisory: pool state can shift between quoting and
//! execution, so callers must enforce their own slippage bounds rather
//! than trusting a quote as a firm price.

use jitswap_curve::math::mul_div_u128;
use jitswap_curve::{BondingCurve, MAX_AMOUNT, ONE_E18};

use crate::error::QuoteError;
use crate::pool::{Pool, TokenSide};
use crate::vault::Vault;

impl<V: Vault> Pool<V> {
    /// Greatest output the pool can pay for exactly `amount_in` of the
    /// input asset, after fees and clamped by what the output vault can
    /// actually source.
    pub fn quote_exact_input(
        &self,
        token_in: TokenSide,
        amount_in: u128,
    ) -> Result<u128, QuoteError> {
        if !self.active {
            return Err(QuoteError::NotActivated);
        }
        if amount_in > MAX_AMOUNT {
            return Err(QuoteError::Bounds);
        }

        let fee = self.quote_fee(amount_in)?;
        let net_in = amount_in - fee;
        let (reserve_in, reserve_out) = self.oriented_reserves(token_in);
        let new_reserve_in = reserve_in.checked_add(net_in).ok_or(QuoteError::Bounds)?;
        if new_reserve_in > MAX_AMOUNT {
            return Err(QuoteError::Bounds);
        }

        let mut lo = 0u128;
        let mut hi = reserve_out.min(self.output_ceiling(token_in));
        let mut best = None;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            if self.clears_curve(token_in, new_reserve_in, reserve_out - mid) {
                best = Some(mid);
                lo = mid + 1;
            } else {
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            }
        }
        best.ok_or(QuoteError::Unreachable)
    }

    /// Least gross input (fee included) that lets the pool pay exactly
    /// `amount_out` of the other asset.
    pub fn quote_exact_output(
        &self,
        token_in: TokenSide,
        amount_out: u128,
    ) -> Result<u128, QuoteError> {
        if !self.active {
            return Err(QuoteError::NotActivated);
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(token_in);
        if amount_out >= reserve_out {
            return Err(QuoteError::Unreachable);
        }
        if amount_out > self.output_ceiling(token_in) {
            return Err(QuoteError::VaultRejected);
        }

        let new_reserve_out = reserve_out - amount_out;
        let feasible = |gross: u128| -> bool {
            let fee = match mul_div_u128(gross, self.config.fee, ONE_E18, false) {
                Ok(fee) => fee,
                Err(_) => return false,
            };
            let new_reserve_in = match reserve_in.checked_add(gross - fee) {
                Some(value) if value <= MAX_AMOUNT => value,
                _ => return false,
            };
            self.clears_curve(token_in, new_reserve_in, new_reserve_out)
        };

        let mut lo = 0u128;
        let mut hi = MAX_AMOUNT;
        let mut best = None;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            if feasible(mid) {
                best = Some(mid);
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            } else {
                lo = mid + 1;
            }
        }
        best.ok_or(QuoteError::Unreachable)
    }

    fn quote_fee(&self, amount: u128) -> Result<u128, QuoteError> {
        if amount == 0 || self.config.fee == 0 {
            return Ok(0);
        }
        mul_div_u128(amount, self.config.fee, ONE_E18, false).map_err(|_| QuoteError::Bounds)
    }

    fn oriented_reserves(&self, token_in: TokenSide) -> (u128, u128) {
        let (reserve0, reserve1) = self.reserves.current();
        match token_in {
            TokenSide::Token0 => (reserve0, reserve1),
            TokenSide::Token1 => (reserve1, reserve0),
        }
    }

    /// How much of the output asset the vault can actually deliver:
    /// capped by its liquid cash and by the owner's deposit plus
    /// remaining borrow headroom.
    fn output_ceiling(&self, token_in: TokenSide) -> u128 {
        let owner = &self.config.owner;
        let vault = match token_in.other() {
            TokenSide::Token0 => &self.vault0,
            TokenSide::Token1 => &self.vault1,
        };
        vault.max_withdrawable().min(
            vault
                .available_balance(owner)
                .saturating_add(vault.max_borrowable(owner)),
        )
    }

    fn clears_curve(&self, token_in: TokenSide, new_reserve_in: u128, new_reserve_out: u128) -> bool {
        let (new_reserve0, new_reserve1) = match token_in {
            TokenSide::Token0 => (new_reserve_in, new_reserve_out),
            TokenSide::Token1 => (new_reserve_out, new_reserve_in),
        };
        self.config.curve.on_or_above(new_reserve0, new_reserve1)
    }
}
