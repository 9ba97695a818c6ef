use serde::{Deserialize, Serialize};

use crate::common_types::EvmAddress;

/// A watched address and the state of its appearance file on the indexer.
///
/// The daemon only emits `fileSize` when it is non-zero, `lastScanned` and
/// `deleted` in verbose mode and the name when the address is known, so those
/// fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub address: EvmAddress,
    pub n_records: i64,
    #[serde(default)]
    pub file_size: i64,
    #[serde(default)]
    pub last_scanned: u32,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, alias = "addressName")]
    pub name: String,
}

impl Monitor {
    pub fn is_empty(&self) -> bool {
        self.n_records == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_minimal_monitor() {
        let monitor: Monitor = serde_json::from_value(json!({
            "address": "0x054993ab0f2b1acc0fdc65405ee203b4271bebe6",
            "nRecords": 0
        }))
        .unwrap();

        assert!(monitor.is_empty());
        assert_eq!(monitor.file_size, 0);
        assert!(!monitor.deleted);
        assert_eq!(monitor.name, "");
    }

    #[test]
    fn decodes_verbose_monitor_with_address_name() {
        let monitor: Monitor = serde_json::from_value(json!({
            "address": "0x054993ab0f2b1acc0fdc65405ee203b4271bebe6",
            "nRecords": 27,
            "fileSize": 224,
            "lastScanned": 18_000_000u32,
            "deleted": true,
            "addressName": "Giveth"
        }))
        .unwrap();

        assert_eq!(monitor.n_records, 27);
        assert_eq!(monitor.file_size, 224);
        assert_eq!(monitor.last_scanned, 18_000_000);
        assert!(monitor.deleted);
        assert_eq!(monitor.name, "Giveth");
    }
}
