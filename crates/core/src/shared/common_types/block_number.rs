use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BlockNumber(u64);

impl BlockNumber {
    pub fn new(number: u64) -> Self {
        BlockNumber(number)
    }

    pub fn u64(&self) -> u64 {
        self.0
    }
}

impl Display for BlockNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
#[error("invalid block number: {0}")]
pub struct ParseBlockNumberError(String);

impl FromStr for BlockNumber {
    type Err = ParseBlockNumberError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        u64::from_str(param).map(BlockNumber).map_err(|e| ParseBlockNumberError(e.to_string()))
    }
}

impl From<BlockNumber> for u64 {
    fn from(block_number: BlockNumber) -> Self {
        block_number.0
    }
}

impl From<u64> for BlockNumber {
    fn from(block_number: u64) -> Self {
        BlockNumber(block_number)
    }
}
