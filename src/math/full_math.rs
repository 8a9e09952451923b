//! Full-precision multiply-divide helpers.
//!
//! Products of two 256-bit operands are carried in 512 bits before the
//! division, so no intermediate overflow is possible for inputs in the
//! valid tick/liquidity domain. Results must fit back into 256 bits;
//! a result that does not is a caller bug and panics.

use alloy::primitives::{U256, U512};

/// Compute `a * b / denominator` with full 512-bit intermediate precision,
/// truncating the result toward zero (floor division).
///
/// Panics if `denominator` is zero or the result does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> U256 {
    assert!(!denominator.is_zero(), "mul_div: division by zero");
    let product = U512::from(a) * U512::from(b);
    (product / U512::from(denominator)).to::<U256>()
}

/// Compute `a * b / denominator`, rounding the result up when the division
/// leaves a remainder.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> U256 {
    assert!(
        !denominator.is_zero(),
        "mul_div_rounding_up: division by zero"
    );
    let product = U512::from(a) * U512::from(b);
    let denominator = U512::from(denominator);
    let mut result = product / denominator;
    if product % denominator != U512::ZERO {
        result += U512::from(1u64);
    }
    result.to::<U256>()
}

/// Compute `numerator / denominator`, rounding up on a non-zero remainder.
pub fn div_rounding_up(numerator: U256, denominator: U256) -> U256 {
    assert!(
        !denominator.is_zero(),
        "div_rounding_up: division by zero"
    );
    let quotient = numerator / denominator;
    if numerator % denominator != U256::ZERO {
        quotient + U256::from(1u64)
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_truncates_toward_zero() {
        // 7 * 3 / 2 = 10.5 -> 10
        assert_eq!(
            mul_div(U256::from(7u64), U256::from(3u64), U256::from(2u64)),
            U256::from(10u64)
        );
    }

    #[test]
    fn mul_div_survives_full_width_products() {
        // (2^200) * (2^100) / (2^100) = 2^200; the product alone exceeds 256 bits
        let a = U256::from(1u64) << 200;
        let b = U256::from(1u64) << 100;
        assert_eq!(mul_div(a, b, b), a);
    }

    #[test]
    fn mul_div_rounding_up_adds_one_on_remainder() {
        assert_eq!(
            mul_div_rounding_up(U256::from(7u64), U256::from(3u64), U256::from(2u64)),
            U256::from(11u64)
        );
        // exact division is unchanged
        assert_eq!(
            mul_div_rounding_up(U256::from(6u64), U256::from(3u64), U256::from(2u64)),
            U256::from(9u64)
        );
    }

    #[test]
    fn div_rounding_up_matches_manual_ceil() {
        assert_eq!(
            div_rounding_up(U256::from(100u64), U256::from(33u64)),
            U256::from(4u64)
        );
        assert_eq!(
            div_rounding_up(U256::from(99u64), U256::from(33u64)),
            U256::from(3u64)
        );
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn mul_div_rejects_zero_denominator() {
        mul_div(U256::from(1u64), U256::from(1u64), U256::ZERO);
    }
}
