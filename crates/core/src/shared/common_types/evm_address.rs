use std::{fmt::Display, str::FromStr};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 20-byte account address as reported by the indexer.
///
/// Serialized as a `0x`-prefixed hex string. Display is always lower-case so
/// it compares cleanly with what `chifra` prints.
#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq, Hash, Deserialize)]
pub struct EvmAddress(Address);

impl EvmAddress {
    pub fn new(address: Address) -> Self {
        EvmAddress(address)
    }

    /// Lower-case `0x` hex form of the address.
    pub fn hex(&self) -> String {
        format!("{:#x}", self.0)
    }

    pub fn into_address(self) -> Address {
        self.0
    }

    pub fn zero() -> Self {
        Self(Address::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Address::ZERO
    }
}

impl Display for EvmAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex())
    }
}

#[derive(Debug, Error)]
#[error("invalid EVM address: {0}")]
pub struct ParseEvmAddressError(String);

impl FromStr for EvmAddress {
    type Err = ParseEvmAddressError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        Address::from_str(param).map(EvmAddress).map_err(|e| ParseEvmAddressError(e.to_string()))
    }
}

impl From<EvmAddress> for Address {
    fn from(address: EvmAddress) -> Self {
        address.0
    }
}

impl From<Address> for EvmAddress {
    fn from(address: Address) -> Self {
        EvmAddress(address)
    }
}
