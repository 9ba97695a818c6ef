use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use trueblocks_core::types::MetaData;

use crate::api::query::HttpMethod;

/// The set of record shapes an endpoint may answer with.
///
/// `from_data` receives the `data` member of the response and either picks
/// a shape or explains why none fits. The dispatcher turns that explanation
/// into a `DecodeError` carrying the raw body.
pub trait ResultUnion: Sized {
    fn from_data(data: Value) -> Result<Self, String>;
}

/// Endpoints that only ever return one record type.
impl<T: DeserializeOwned> ResultUnion for Vec<T> {
    fn from_data(data: Value) -> Result<Self, String> {
        if !data.is_array() {
            return Err(format!("expected a list of records, got {}", kind_of(&data)));
        }
        serde_json::from_value(data).map_err(|e| e.to_string())
    }
}

/// No narrowing at all: the caller inspects the JSON.
impl ResultUnion for Value {
    fn from_data(data: Value) -> Result<Self, String> {
        Ok(data)
    }
}

/// Compile-time description of one endpoint: where it lives, what it takes
/// and what it may return.
pub trait EndpointSpec {
    const PATH: &'static str;
    const METHOD: HttpMethod;
    type Params: Serialize;
    type Output: ResultUnion;
}

/// A decoded response. The raw JSON is kept so nothing the server sent beyond
/// the declared shape is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: Option<MetaData>,
    raw: Value,
}

impl<T> ApiResponse<T> {
    pub(crate) fn new(data: T, meta: Option<MetaData>, raw: Value) -> Self {
        Self { data, meta, raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse { data: f(self.data), meta: self.meta, raw: self.raw }
    }
}

/// Splits the daemon's `{"data": …, "meta": …}` envelope. A body without a
/// `data` member is taken to be the data itself.
pub(crate) fn split_envelope(body: &Value) -> Result<(Value, Option<MetaData>), String> {
    match body.as_object().and_then(|object| object.get("data").map(|data| (object, data))) {
        Some((object, data)) => {
            let meta = match object.get("meta") {
                Some(Value::Null) | None => None,
                Some(meta) => Some(
                    serde_json::from_value(meta.clone()).map_err(|e| format!("bad meta: {}", e))?,
                ),
            };
            Ok((data.clone(), meta))
        }
        None => Ok((body.clone(), None)),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trueblocks_core::{common_types::BlockNumber, types::Message};

    #[test]
    fn envelope_yields_data_and_meta() {
        let body = json!({
            "data": [{ "msg": "ok" }],
            "meta": { "client": 19000000, "finalized": 18999900, "chain": "mainnet", "chainId": 1 }
        });

        let (data, meta) = split_envelope(&body).unwrap();
        let meta = meta.unwrap();

        assert_eq!(data, json!([{ "msg": "ok" }]));
        assert_eq!(meta.client, BlockNumber::new(19_000_000));
        assert_eq!(meta.chain, "mainnet");
        assert_eq!(meta.chain_id, 1);
    }

    #[test]
    fn bare_body_is_the_data() {
        let body = json!([1, 2, 3]);

        let (data, meta) = split_envelope(&body).unwrap();

        assert_eq!(data, body);
        assert!(meta.is_none());
    }

    #[test]
    fn single_shape_union_requires_a_list() {
        let err = Vec::<Message>::from_data(json!({ "msg": "x" })).unwrap_err();

        assert!(err.contains("an object"));
    }

    #[test]
    fn single_shape_union_decodes_records() {
        let messages = Vec::<Message>::from_data(json!([{ "msg": "a", "num": 2 }])).unwrap();

        assert_eq!(messages, vec![Message { msg: "a".into(), num: Some(2) }]);
    }
}
