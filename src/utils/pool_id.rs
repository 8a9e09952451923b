//! Pool id computation and validation.
//!
//! The pool manager identifies a pool by the keccak256 hash of its ABI-encoded
//! key `(currency0, currency1, fee, tickSpacing, hooks)`. Recomputing the id
//! from the event fields lets handlers reject logs whose claimed id does not
//! match their parameters.

use alloy::primitives::{keccak256, Address};
use alloy::sol_types::SolValue;

/// Compute a pool id from its key parameters.
///
/// Currencies are sorted so the lower address is currency0, matching the
/// manager's ordering; the native token (zero address) therefore always
/// sorts first. Returns the 32-byte id as a lowercase 0x-prefixed hex string.
pub fn compute_pool_id(
    currency_a: Address,
    currency_b: Address,
    fee: u32,
    tick_spacing: i32,
    hooks: Address,
) -> String {
    let (currency0, currency1) = if currency_a < currency_b {
        (currency_a, currency_b)
    } else {
        (currency_b, currency_a)
    };

    // PoolKey layout: (address, address, uint24, int24, address)
    let encoded = (currency0, currency1, fee, tick_spacing, hooks).abi_encode();
    let hash = keccak256(&encoded);

    format!("{hash:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn currency_order_does_not_matter() {
        let usdc = addr("0xbe2a7f5acecdc293bf34445a0021f229dd2edd49");
        let weth = addr("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
        let id1 = compute_pool_id(usdc, weth, 500, 10, Address::ZERO);
        let id2 = compute_pool_id(weth, usdc, 500, 10, Address::ZERO);
        assert_eq!(id1, id2);
    }

    #[test]
    fn hooks_change_the_id() {
        let usdc = addr("0xbe2a7f5acecdc293bf34445a0021f229dd2edd49");
        let plain = compute_pool_id(Address::ZERO, usdc, 3000, 60, Address::ZERO);
        let hooked = compute_pool_id(
            Address::ZERO,
            usdc,
            3000,
            60,
            addr("0x1234567890abcdef1234567890abcdef12345678"),
        );
        assert_ne!(plain, hooked);
    }

    #[test]
    fn id_is_lowercase_hex() {
        let id = compute_pool_id(
            Address::ZERO,
            addr("0xbe2a7f5acecdc293bf34445a0021f229dd2edd49"),
            500,
            10,
            Address::ZERO,
        );
        assert!(id.starts_with("0x"));
        assert_eq!(id.len(), 66);
        assert_eq!(id, id.to_lowercase());
    }
}
