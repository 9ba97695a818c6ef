use serde::{Deserialize, Serialize};

use crate::common_types::BlockNumber;

/// The `meta` block the daemon attaches next to `data`: chain progress at the
/// time the response was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaData {
    pub client: BlockNumber,
    pub finalized: BlockNumber,
    pub staging: BlockNumber,
    pub ripe: BlockNumber,
    pub unripe: BlockNumber,
    pub chain_id: u64,
    pub network_id: u64,
    pub chain: String,
}

