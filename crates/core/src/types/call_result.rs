use serde::{Deserialize, Serialize};

use crate::{
    common_types::{BlockNumber, EvmAddress, Timestamp},
    types::Function,
};

/// The result of a read-only contract call made at a given block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    pub address: EvmAddress,
    pub articulated_out: Function,
    pub block_number: BlockNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub encoded_arguments: String,
    pub encoding: String,
    pub name: String,
    pub signature: String,
    pub timestamp: Timestamp,
}
