//! Utility functions for the Tidepool indexer.
//!
//! This module is organized into focused submodules:
//!
//! - [`conversion`] - Numeric conversions and decimal scaling helpers
//! - [`id`] - Entity id construction (records, ticks, position token ids)
//! - [`pool_id`] - Pool id computation from pool-key parameters

mod conversion;
mod id;
mod pool_id;

// ============================================
// Common Constants
// ============================================

/// The zero address (0x0000000000000000000000000000000000000000)
/// Used for the native token and empty hook slots.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ============================================
// Re-exports
// ============================================

// Conversion utilities
pub use conversion::{
    big_pow10, convert_token_to_decimal, fast_exponentiation, i256_to_bigint, safe_div,
    u256_to_bigint,
};

// Id utilities
pub use id::{event_id, hex_encode, position_token_id, tick_id};

// Pool id utilities
pub use pool_id::compute_pool_id;
