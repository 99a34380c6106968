//! Fixed-point helpers with full 512-bit intermediates
//!
//! The curve evaluator multiplies a price-weighted reserve delta by a
//! concentration blend before dividing, so the intermediate product can
//! exceed 256 bits. `mul_div` keeps the full product and divides once,
//! which avoids the truncation error a divide-then-multiply sequence
//! would amplify by the price ratio.

use alloy_primitives::U256;

use crate::error::{CurveError, Result};

/// Representable amount ceiling for reserves and swap amounts.
pub const MAX_AMOUNT: u128 = (1u128 << 112) - 1;

/// Scale for concentration parameters and fee fractions.
pub const ONE_E18: u128 = 1_000_000_000_000_000_000;

/// Upper bound for `price_x` / `price_y`; only their ratio is meaningful.
pub const MAX_PRICE: u128 = 10_000_000_000_000_000_000_000_000;

/// Computes `a * b / denominator` with the product carried at full
/// 512-bit width, rounding the quotient up when `round_up` is set.
///
/// Errors with [`CurveError::Overflow`] when the quotient itself does not
/// fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256, round_up: bool) -> Result<U256> {
    if denominator.is_zero() {
        return Err(CurveError::DivisionByZero);
    }

    let remainder = a.mul_mod(b, denominator);

    // 512-bit product as [prod1 prod0], via mulmod over 2^256 - 1.
    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);
    let mut prod1 = mm.wrapping_sub(prod0);
    if mm < prod0 {
        prod1 = prod1.wrapping_sub(U256::from(1u8));
    }

    if prod1.is_zero() {
        let mut result = prod0 / denominator;
        if round_up && !remainder.is_zero() {
            result = result
                .checked_add(U256::from(1u8))
                .ok_or(CurveError::Overflow)?;
        }
        return Ok(result);
    }

    if prod1 >= denominator {
        return Err(CurveError::Overflow);
    }

    // Make the 512-bit dividend an exact multiple of the denominator.
    if remainder > prod0 {
        prod1 = prod1.wrapping_sub(U256::from(1u8));
    }
    prod0 = prod0.wrapping_sub(remainder);

    // Factor powers of two out of the denominator.
    let twos = denominator & denominator.wrapping_neg();
    let denom = denominator / twos;
    prod0 /= twos;

    // Fold the bits shifted out of prod1 back into prod0.
    let shift = (twos.wrapping_neg() / twos).wrapping_add(U256::from(1u8));
    prod0 |= prod1.wrapping_mul(shift);

    // Modular inverse of the (now odd) denominator over 2^256,
    // seeded correct to 4 bits and doubled by each Newton step.
    let mut inv = U256::from(3u8).wrapping_mul(denom) ^ U256::from(2u8);
    for _ in 0..6 {
        inv = inv.wrapping_mul(U256::from(2u8).wrapping_sub(denom.wrapping_mul(inv)));
    }

    let mut result = prod0.wrapping_mul(inv);
    if round_up && !remainder.is_zero() {
        result = result
            .checked_add(U256::from(1u8))
            .ok_or(CurveError::Overflow)?;
    }
    Ok(result)
}

/// `a * b / denominator` over u128 operands, carried at wide precision
/// internally. Errors with [`CurveError::Overflow`] when the quotient
/// does not fit in u128.
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, round_up: bool) -> Result<u128> {
    let wide = mul_div(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
        round_up,
    )?;
    u128::try_from(wide).map_err(|_| CurveError::Overflow)
}

/// `a / b`, rounded up.
pub fn ceil_div(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(CurveError::DivisionByZero);
    }
    let quotient = a / b;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        quotient
            .checked_add(U256::from(1u8))
            .ok_or(CurveError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn mul_div_small_values() {
        assert_eq!(mul_div(u(10), u(10), u(3), false).unwrap(), u(33));
        assert_eq!(mul_div(u(10), u(10), u(3), true).unwrap(), u(34));
        assert_eq!(mul_div(u(10), u(10), u(4), true).unwrap(), u(25));
        assert_eq!(mul_div(u(0), u(10), u(4), true).unwrap(), u(0));
    }

    #[test]
    fn mul_div_wide_product() {
        // 2^128 * 2^128 overflows 256 bits; quotient still fits.
        let big = U256::from(1u8) << 128;
        assert_eq!(mul_div(big, big, big, false).unwrap(), big);

        let a = U256::from(1u8) << 200;
        let b = U256::from(3u8) << 100;
        let d = U256::from(1u8) << 150;
        assert_eq!(mul_div(a, b, d, false).unwrap(), U256::from(3u8) << 150);
    }

    #[test]
    fn mul_div_wide_product_odd_denominator() {
        // Exercises the modular-inverse path with prod1 != 0.
        let a = (U256::from(1u8) << 200) + U256::from(7u8);
        let b = (U256::from(1u8) << 100) + U256::from(11u8);
        let d = (U256::from(1u8) << 60) + U256::from(1u8);

        let floor = mul_div(a, b, d, false).unwrap();
        let ceil = mul_div(a, b, d, true).unwrap();

        // The exact remainder decides whether ceil is one above floor.
        let remainder = a.mul_mod(b, d);
        assert!(remainder < d);
        let bump = if remainder.is_zero() { 0u8 } else { 1u8 };
        assert_eq!(ceil, floor + U256::from(bump));

        // Cross-check floor against the remainder identity, folded back
        // into 256 bits: floor * d + remainder == a * b (mod 2^256).
        assert_eq!(
            floor.wrapping_mul(d).wrapping_add(remainder),
            a.wrapping_mul(b)
        );
    }

    #[test]
    fn mul_div_quotient_overflow() {
        let a = U256::MAX;
        let b = U256::from(2u8);
        assert_eq!(mul_div(a, b, U256::from(1u8), false), Err(CurveError::Overflow));
    }

    #[test]
    fn mul_div_zero_denominator() {
        assert_eq!(
            mul_div(u(1), u(1), u(0), false),
            Err(CurveError::DivisionByZero)
        );
    }

    #[test]
    fn mul_div_u128_fee_fractions() {
        // A 1% cut of a near-ceiling amount overflows naive u128 math.
        let fee = ONE_E18 / 100;
        assert_eq!(
            mul_div_u128(MAX_AMOUNT, fee, ONE_E18, false).unwrap(),
            MAX_AMOUNT / 100
        );
        assert_eq!(mul_div_u128(10_154, fee, ONE_E18, false).unwrap(), 101);
    }

    #[test]
    fn ceil_div_rounds_up() {
        assert_eq!(ceil_div(u(10), u(3)).unwrap(), u(4));
        assert_eq!(ceil_div(u(9), u(3)).unwrap(), u(3));
        assert_eq!(ceil_div(u(0), u(3)).unwrap(), u(0));
    }
}
