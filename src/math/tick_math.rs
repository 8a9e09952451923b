//! Tick index <-> sqrt-price conversion.
//!
//! Ticks index a geometric price ladder with ratio 1.0001 per step; the
//! pool's canonical price encoding is sqrt(price) as an unsigned Q64.96.
//! The forward conversion must match the on-chain reference implementation
//! bit for bit, so everything here is integer math - no floating point
//! anywhere on the path.

use alloy::primitives::U256;

/// Minimum tick representable in the 160-bit sqrt-price format.
pub const MIN_TICK: i32 = -887272;
/// Maximum tick representable in the 160-bit sqrt-price format.
pub const MAX_TICK: i32 = 887272;

/// `get_sqrt_ratio_at_tick(MIN_TICK)` = 4295128739.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([0x1000276a3, 0, 0, 0]);
/// `get_sqrt_ratio_at_tick(MAX_TICK)`
/// = 1461446703485210103287273052203988822378723970342.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([0x5d951d5263988d26, 0xefd1fc6a50648849, 0xfffd8963, 0]);

/// 2^128, the starting ratio for an even tick.
const ONE_X128: U256 = U256::from_limbs([0, 0, 1, 0]);

/// sqrt(1.0001)^(-1) as a Q128.128, applied when bit 0 of |tick| is set:
/// 0xfffcb933bd6fad37aa2d162d1a594001.
const FACTOR_BIT_0: U256 =
    U256::from_limbs([0xaa2d162d1a594001, 0xfffcb933bd6fad37, 0, 0]);

/// Per-bit multipliers for bits 1..=19 of |tick|: entry `i` holds
/// sqrt(1.0001)^(-2^(i+1)) as a Q128.128. MAX_TICK < 2^20, so twenty bits
/// (this table plus [`FACTOR_BIT_0`]) cover the whole domain. The 128-bit
/// hex value of each factor is noted alongside its limbs.
const FACTORS: [U256; 19] = [
    // 0xfff97272373d413259a46990580e213a
    U256::from_limbs([0x59a46990580e213a, 0xfff97272373d4132, 0, 0]),
    // 0xfff2e50f5f656932ef12357cf3c7fdcc
    U256::from_limbs([0xef12357cf3c7fdcc, 0xfff2e50f5f656932, 0, 0]),
    // 0xffe5caca7e10e4e61c3624eaa0941cd0
    U256::from_limbs([0x1c3624eaa0941cd0, 0xffe5caca7e10e4e6, 0, 0]),
    // 0xffcb9843d60f6159c9db58835c926644
    U256::from_limbs([0xc9db58835c926644, 0xffcb9843d60f6159, 0, 0]),
    // 0xff973b41fa98c081472e6896dfb254c0
    U256::from_limbs([0x472e6896dfb254c0, 0xff973b41fa98c081, 0, 0]),
    // 0xff2ea16466c96a3843ec78b326b52861
    U256::from_limbs([0x43ec78b326b52861, 0xff2ea16466c96a38, 0, 0]),
    // 0xfe5dee046a99a2a811c461f1969c3053
    U256::from_limbs([0x11c461f1969c3053, 0xfe5dee046a99a2a8, 0, 0]),
    // 0xfcbe86c7900a88aedcffc83b479aa3a4
    U256::from_limbs([0xdcffc83b479aa3a4, 0xfcbe86c7900a88ae, 0, 0]),
    // 0xf987a7253ac413176f2b074cf7815e54
    U256::from_limbs([0x6f2b074cf7815e54, 0xf987a7253ac41317, 0, 0]),
    // 0xf3392b0822b70005940c7a398e4b70f3
    U256::from_limbs([0x940c7a398e4b70f3, 0xf3392b0822b70005, 0, 0]),
    // 0xe7159475a2c29b7443b29c7fa6e889d9
    U256::from_limbs([0x43b29c7fa6e889d9, 0xe7159475a2c29b74, 0, 0]),
    // 0xd097f3bdfd2022b8845ad8f792aa5825
    U256::from_limbs([0x845ad8f792aa5825, 0xd097f3bdfd2022b8, 0, 0]),
    // 0xa9f746462d870fdf8a65dc1f90e061e5
    U256::from_limbs([0x8a65dc1f90e061e5, 0xa9f746462d870fdf, 0, 0]),
    // 0x70d869a156d2a1b890bb3df62baf32f7
    U256::from_limbs([0x90bb3df62baf32f7, 0x70d869a156d2a1b8, 0, 0]),
    // 0x31be135f97d08fd981231505542fcfa6
    U256::from_limbs([0x81231505542fcfa6, 0x31be135f97d08fd9, 0, 0]),
    // 0x9aa508b5b7a84e1c677de54f3e99bc9
    U256::from_limbs([0xc677de54f3e99bc9, 0x9aa508b5b7a84e1, 0, 0]),
    // 0x5d6af8dedb81196699c329225ee604
    U256::from_limbs([0x6699c329225ee604, 0x5d6af8dedb8119, 0, 0]),
    // 0x2216e584f5fa1ea926041bedfe98
    U256::from_limbs([0x1ea926041bedfe98, 0x2216e584f5fa, 0, 0]),
    // 0x48a170391f7dc42444e8fa2
    U256::from_limbs([0x91f7dc42444e8fa2, 0x48a1703, 0, 0]),
];

/// Low 32 bits, the part discarded by the Q128.128 -> Q64.96 truncation.
const LOW_32_MASK: U256 = U256::from_limbs([0xffffffff, 0, 0, 0]);

/// Compute the sqrt-price ratio at `tick` as a Q64.96.
///
/// The ratio is sqrt(1.0001^tick) * 2^96, computed by binary decomposition
/// of |tick| against the precomputed per-bit factors, accumulated in 256-bit
/// Q128.128 precision and truncated to Q64.96 at the end (rounding up when
/// the discarded low bits are non-zero). Monotonically increasing in `tick`.
///
/// Panics if `tick` is outside `[MIN_TICK, MAX_TICK]`. Callers always derive
/// the tick from validated pool state, so an out-of-bounds tick is a
/// programming error, not a recoverable condition.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> U256 {
    assert!(
        (MIN_TICK..=MAX_TICK).contains(&tick),
        "tick {tick} out of bounds"
    );
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        FACTOR_BIT_0
    } else {
        ONE_X128
    };
    for (i, factor) in FACTORS.iter().enumerate() {
        if abs_tick & (0x2 << i) != 0 {
            ratio = (ratio * factor) >> 128;
        }
    }

    // The factors encode negative exponents; invert for positive ticks.
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up on truncation loss so the result
    // agrees with the on-chain encoding.
    let truncated = ratio >> 32;
    if ratio & LOW_32_MASK != U256::ZERO {
        truncated + U256::from(1u64)
    } else {
        truncated
    }
}

/// Recover the tick whose sqrt-price ratio is the largest not exceeding
/// `sqrt_ratio_x96`, i.e. the inverse of [`get_sqrt_ratio_at_tick`] up to
/// truncation.
///
/// Implemented as a binary search over the forward conversion; the exactness
/// requirements here are weaker than for the forward direction (this is used
/// by diagnostics and tests, not by the amount math), so the search is
/// preferred over porting the bit-twiddling logarithm.
///
/// Panics if the ratio is outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn get_tick_at_sqrt_ratio(sqrt_ratio_x96: U256) -> i32 {
    assert!(
        sqrt_ratio_x96 >= MIN_SQRT_RATIO && sqrt_ratio_x96 < MAX_SQRT_RATIO,
        "sqrt ratio {sqrt_ratio_x96} out of bounds"
    );

    let (mut lo, mut hi) = (MIN_TICK, MAX_TICK);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if get_sqrt_ratio_at_tick(mid) <= sqrt_ratio_x96 {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn u256(s: &str) -> U256 {
        U256::from_str(s).unwrap()
    }

    #[test]
    fn tick_zero_is_exactly_one_x96() {
        assert_eq!(get_sqrt_ratio_at_tick(0), U256::from(1u64) << 96);
    }

    #[test]
    fn extreme_ticks_hit_the_published_bounds() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK), MIN_SQRT_RATIO);
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK), MAX_SQRT_RATIO);
        assert_eq!(MIN_SQRT_RATIO, u256("4295128739"));
        assert_eq!(
            MAX_SQRT_RATIO,
            u256("1461446703485210103287273052203988822378723970342")
        );
    }

    #[test]
    fn known_reference_values() {
        // sqrt(1.0001) * 2^96, rounded per the reference contract
        assert_eq!(
            get_sqrt_ratio_at_tick(1),
            u256("79232123823359799118286999568")
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(-1),
            u256("79224201403219477170569942574")
        );
        // regression pin from a production pool state
        assert_eq!(
            get_sqrt_ratio_at_tick(16080),
            u256("177025116846713535491812780880")
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn tick_below_minimum_panics() {
        get_sqrt_ratio_at_tick(MIN_TICK - 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn tick_above_maximum_panics() {
        get_sqrt_ratio_at_tick(MAX_TICK + 1);
    }

    #[test]
    fn ratio_is_strictly_monotonic() {
        let samples = [
            MIN_TICK,
            MIN_TICK + 1,
            -887271,
            -500000,
            -100000,
            -21180,
            -600,
            -2,
            -1,
            0,
            1,
            2,
            600,
            16080,
            21179,
            21180,
            100000,
            500000,
            887271,
            MAX_TICK,
        ];
        for pair in samples.windows(2) {
            assert!(
                get_sqrt_ratio_at_tick(pair[0]) < get_sqrt_ratio_at_tick(pair[1]),
                "ratio not increasing between ticks {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn negative_tick_is_reciprocal_within_one_ulp() {
        // ratio(t) * ratio(-t) ~= 2^192, with at most one unit of rounding
        // slack in the 160-bit representation of each side
        for t in [1, 600, 16080, 50000, 443636, 887272] {
            let pos = get_sqrt_ratio_at_tick(t);
            let neg = get_sqrt_ratio_at_tick(-t);
            let reciprocal = (U256::from(1u64) << 192) / pos;
            let diff = if neg > reciprocal {
                neg - reciprocal
            } else {
                reciprocal - neg
            };
            assert!(diff <= U256::from(1u64), "tick {t}: diff {diff}");
        }
    }

    #[test]
    fn binary_search_round_trips() {
        for t in [
            MIN_TICK,
            -123456,
            -600,
            -1,
            0,
            1,
            600,
            21179,
            123456,
            MAX_TICK - 1,
        ] {
            let ratio = get_sqrt_ratio_at_tick(t);
            assert_eq!(get_tick_at_sqrt_ratio(ratio), t, "round trip at tick {t}");
        }
    }

    #[test]
    fn binary_search_floors_between_ticks() {
        // any ratio strictly between tick 100 and tick 101 resolves to 100
        let ratio = get_sqrt_ratio_at_tick(100) + U256::from(1u64);
        assert!(ratio < get_sqrt_ratio_at_tick(101));
        assert_eq!(get_tick_at_sqrt_ratio(ratio), 100);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn ratio_above_maximum_panics() {
        get_tick_at_sqrt_ratio(MAX_SQRT_RATIO);
    }
}
