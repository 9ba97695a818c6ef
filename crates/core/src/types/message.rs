use serde::{Deserialize, Serialize};

/// Free-form status record returned by state-changing endpoints, for example
/// `chifra monitors --delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<i64>,
}
