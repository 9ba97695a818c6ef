use serde::{Deserialize, Serialize};

use crate::common_types::EvmAddress;

/// Outcome of de-duplicating one monitor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorClean {
    pub address: EvmAddress,
    pub size_now: i64,
    pub size_then: i64,
    pub dups: i64,
}

impl MonitorClean {
    /// Number of appearances removed by the clean.
    pub fn removed(&self) -> i64 {
        self.size_then - self.size_now
    }
}
