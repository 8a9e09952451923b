//! Per-chain configuration.
//!
//! All chain-specific addresses and token metadata live in one explicit
//! struct constructed from the chain id at startup and injected into every
//! handler call. Addresses are lowercase throughout; comparisons never
//! re-normalize.

use alloy::primitives::Address;
use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::utils::{hex_encode, ZERO_ADDRESS};

/// Static metadata for a token the indexer may encounter.
///
/// Stands in for on-chain metadata lookups, which belong to the host
/// environment rather than this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDefinition {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
}

/// Metadata for the chain's native token, used when a pool currency is the
/// zero address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeTokenDetails {
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
}

/// Chain-wide configuration injected into every handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,

    /// Pool manager deployment; also the id of the factory aggregate.
    pub pool_manager_address: String,
    /// Lending position manager; liquidity modifications it sends are
    /// tracked as managed positions.
    pub position_manager_address: String,
    /// Migration helper; transactions targeting it mark positions migrated.
    pub migrator_address: String,

    /// Tokens trusted enough that pools pairing them are recorded on the
    /// counterparty token's whitelist-pool list.
    pub whitelist_tokens: Vec<String>,
    /// Pools ignored entirely at creation.
    pub pools_to_skip: Vec<String>,

    /// Known token metadata for this chain.
    pub token_definitions: Vec<TokenDefinition>,
    /// Metadata applied to the zero-address (native) currency.
    pub native_token_details: NativeTokenDetails,
}

impl ChainConfig {
    /// Build the configuration for a supported chain id.
    pub fn for_chain(chain_id: u64) -> anyhow::Result<Self> {
        match chain_id {
            11155111 => Ok(Self::sepolia()),
            _ => bail!("unsupported chain id {chain_id}"),
        }
    }

    fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            pool_manager_address: "0xc021a7deb4a939fd7e661a0669fab5ac7ba2d5d6".to_string(),
            position_manager_address: "0x429ba70129df741b2ca2a85bc3a2a3328e5c09b4".to_string(),
            migrator_address: "0xc78c603644b59ccbc869fa36b72ade24c9e04c40".to_string(),
            whitelist_tokens: vec![
                "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(), // WETH
                "0xbe2a7f5acecdc293bf34445a0021f229dd2edd49".to_string(), // USDC
            ],
            pools_to_skip: vec![],
            token_definitions: vec![
                TokenDefinition {
                    address: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
                    symbol: "WETH".to_string(),
                    name: "Wrapped Ether".to_string(),
                    decimals: 18,
                },
                TokenDefinition {
                    address: "0xbe2a7f5acecdc293bf34445a0021f229dd2edd49".to_string(),
                    symbol: "USDC".to_string(),
                    name: "USD Coin".to_string(),
                    decimals: 18,
                },
            ],
            native_token_details: NativeTokenDetails {
                symbol: "ETH".to_string(),
                name: "Ethereum".to_string(),
                decimals: 18,
            },
        }
    }

    /// Resolve metadata for a currency address; the zero address resolves to
    /// the native token details. Returns None for tokens this chain does not
    /// know, which callers surface as a named skip.
    pub fn token_definition(&self, address: &str) -> Option<TokenDefinition> {
        if address == ZERO_ADDRESS {
            return Some(TokenDefinition {
                address: ZERO_ADDRESS.to_string(),
                symbol: self.native_token_details.symbol.clone(),
                name: self.native_token_details.name.clone(),
                decimals: self.native_token_details.decimals,
            });
        }
        self.token_definitions
            .iter()
            .find(|d| d.address == address)
            .cloned()
    }

    pub fn is_whitelisted(&self, address: &str) -> bool {
        self.whitelist_tokens.iter().any(|t| t == address)
    }

    pub fn should_skip_pool(&self, pool_id: &str) -> bool {
        self.pools_to_skip.iter().any(|p| p == pool_id)
    }

    pub fn is_position_manager(&self, address: Address) -> bool {
        hex_encode(address.as_slice()) == self.position_manager_address
    }

    pub fn is_migrator(&self, address: Address) -> bool {
        hex_encode(address.as_slice()) == self.migrator_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_resolves_to_native_details() {
        let config = ChainConfig::for_chain(11155111).unwrap();
        let native = config.token_definition(ZERO_ADDRESS).unwrap();
        assert_eq!(native.symbol, "ETH");
        assert_eq!(native.decimals, 18);
    }

    #[test]
    fn unknown_token_has_no_definition() {
        let config = ChainConfig::for_chain(11155111).unwrap();
        assert!(config
            .token_definition("0x1111111111111111111111111111111111111111")
            .is_none());
    }

    #[test]
    fn unsupported_chain_is_an_error() {
        assert!(ChainConfig::for_chain(1).is_err());
    }
}
