//! Type conversion and formatting utilities.
//!
//! Functions for converting between numeric types (U256, I256, BigInt,
//! BigDecimal) with proper decimal handling and precision preservation.
//! Raw on-chain integer amounts are scaled to human-readable decimals with
//! BigDecimal so no precision is lost beyond the f64 mantissa.

use alloy::primitives::{I256, U256};
use bigdecimal::{BigDecimal, Zero};
use num_bigint::{BigInt, BigUint};
use once_cell::sync::Lazy;

// ============================================
// Wide integer -> bignum bridges
// ============================================

/// Convert an unsigned 256-bit value to BigInt via its big-endian bytes.
pub fn u256_to_bigint(value: U256) -> BigInt {
    BigInt::from(BigUint::from_bytes_be(&value.to_be_bytes::<32>()))
}

/// Convert a signed 256-bit value to BigInt, preserving the sign.
pub fn i256_to_bigint(value: I256) -> BigInt {
    let magnitude = BigInt::from(BigUint::from_bytes_be(
        &value.unsigned_abs().to_be_bytes::<32>(),
    ));
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

// ============================================
// Decimal scaling
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub fn big_pow10(exp: u32) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp))
    }
}

/// Scale a raw token amount down by the token's decimals.
///
/// Exact: dividing by a power of ten only shifts the decimal point.
pub fn convert_token_to_decimal(amount: &BigInt, decimals: u32) -> BigDecimal {
    if decimals == 0 {
        return BigDecimal::from(amount.clone());
    }
    BigDecimal::from(amount.clone()) / big_pow10(decimals)
}

/// Divide two decimals, returning zero when the divisor is zero.
pub fn safe_div(amount0: &BigDecimal, amount1: &BigDecimal) -> BigDecimal {
    if amount1.is_zero() {
        BigDecimal::zero()
    } else {
        amount0 / amount1
    }
}

/// Raise `base` to an integer power by binary decomposition.
///
/// Used for per-tick geometric prices (1.0001^tick); negative exponents take
/// the reciprocal of the positive power.
pub fn fast_exponentiation(base: &BigDecimal, exponent: i32) -> BigDecimal {
    if exponent == 0 {
        return BigDecimal::from(1);
    }
    if exponent < 0 {
        let result = fast_exponentiation(base, -exponent);
        return safe_div(&BigDecimal::from(1), &result);
    }

    let mut result = BigDecimal::from(1);
    let mut acc = base.clone();
    let mut remaining = exponent as u32;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= &acc;
        }
        remaining >>= 1;
        if remaining > 0 {
            acc = &acc * &acc;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn converts_raw_amounts_exactly() {
        let raw = BigInt::from_str("295530108791371696809").unwrap();
        assert_eq!(
            convert_token_to_decimal(&raw, 18),
            BigDecimal::from_str("295.530108791371696809").unwrap()
        );

        let negative = BigInt::from_str("-2367391256").unwrap();
        assert_eq!(
            convert_token_to_decimal(&negative, 18),
            BigDecimal::from_str("-0.000000002367391256").unwrap()
        );
    }

    #[test]
    fn zero_decimals_is_identity() {
        let raw = BigInt::from(42);
        assert_eq!(convert_token_to_decimal(&raw, 0), BigDecimal::from(42));
    }

    #[test]
    fn wide_integers_round_trip_through_bigint() {
        let value = U256::from_str("228441206771431211303324095474").unwrap();
        assert_eq!(
            u256_to_bigint(value),
            BigInt::from_str("228441206771431211303324095474").unwrap()
        );

        let signed = I256::from_str("-171307279129958064896084173").unwrap();
        assert_eq!(
            i256_to_bigint(signed),
            BigInt::from_str("-171307279129958064896084173").unwrap()
        );
        assert_eq!(i256_to_bigint(I256::ZERO), BigInt::from(0));
    }

    #[test]
    fn safe_div_swallows_zero_divisor() {
        let one = BigDecimal::from(1);
        assert_eq!(safe_div(&one, &BigDecimal::zero()), BigDecimal::zero());
        assert_eq!(
            safe_div(&BigDecimal::from(10), &BigDecimal::from(4)),
            BigDecimal::from_str("2.5").unwrap()
        );
    }

    #[test]
    fn fast_exponentiation_matches_repeated_multiplication() {
        let base = BigDecimal::from_str("1.0001").unwrap();
        let mut expected = BigDecimal::from(1);
        for _ in 0..13 {
            expected *= &base;
        }
        assert_eq!(fast_exponentiation(&base, 13), expected);
    }

    #[test]
    fn negative_exponent_is_reciprocal() {
        let base = BigDecimal::from_str("2").unwrap();
        assert_eq!(
            fast_exponentiation(&base, -3),
            BigDecimal::from_str("0.125").unwrap()
        );
    }
}
