use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use trueblocks_core::types::{Message, Monitor, MonitorClean};

use crate::api::{
    http::HttpClient,
    query::{HttpMethod, RequestOptions, finite_float},
    response::{ApiResponse, EndpointSpec, ResultUnion, kind_of},
    types::{ApiResult, ApiSdkError},
};

/// Parameters of `chifra monitors`. `chain` is required by the daemon; every
/// other field is left out of the request when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorsOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addrs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undelete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "finite_float")]
    pub sleep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fmt: Option<String>,
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_header: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decache: Option<bool>,
}

impl MonitorsOptions {
    pub fn new(chain: impl Into<String>) -> Self {
        Self { chain: chain.into(), ..Default::default() }
    }

    pub fn with_addrs<I, S>(mut self, addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.addrs = addrs.into_iter().map(Into::into).collect();
        self
    }
}

impl Display for MonitorsOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(e) => write!(f, "<unserializable options: {}>", e),
        }
    }
}

/// What `/monitors` can answer with.
///
/// Every element of `data` is classified by field presence:
/// `nRecords` marks a [`Monitor`], any of `sizeNow`/`sizeThen`/`dups` a
/// [`MonitorClean`], and `msg` a [`Message`]. All elements must agree.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorsResult {
    Messages(Vec<Message>),
    Clean(Vec<MonitorClean>),
    Monitors(Vec<Monitor>),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonitorsShape {
    Message,
    Clean,
    Monitor,
}

impl MonitorsShape {
    fn classify(record: &Map<String, Value>) -> Option<Self> {
        if record.contains_key("nRecords") {
            Some(MonitorsShape::Monitor)
        } else if ["sizeNow", "sizeThen", "dups"].iter().any(|key| record.contains_key(*key)) {
            Some(MonitorsShape::Clean)
        } else if record.contains_key("msg") {
            Some(MonitorsShape::Message)
        } else {
            None
        }
    }
}

impl MonitorsResult {
    pub fn len(&self) -> usize {
        match self {
            MonitorsResult::Messages(items) => items.len(),
            MonitorsResult::Clean(items) => items.len(),
            MonitorsResult::Monitors(items) => items.len(),
            MonitorsResult::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn variant_name(&self) -> &'static str {
        match self {
            MonitorsResult::Messages(_) => "messages",
            MonitorsResult::Clean(_) => "clean results",
            MonitorsResult::Monitors(_) => "monitors",
            MonitorsResult::Empty => "nothing",
        }
    }
}

impl ResultUnion for MonitorsResult {
    fn from_data(data: Value) -> Result<Self, String> {
        let items = match data {
            Value::Array(items) => items,
            other => return Err(format!("expected a list of records, got {}", kind_of(&other))),
        };

        let mut shape = None;
        for (index, item) in items.iter().enumerate() {
            let record =
                item.as_object().ok_or_else(|| format!("record {} is {}", index, kind_of(item)))?;
            let found = MonitorsShape::classify(record)
                .ok_or_else(|| format!("record {} matches no known monitors shape", index))?;
            match shape {
                None => shape = Some(found),
                Some(expected) if expected != found => {
                    return Err(format!(
                        "record {} is a {:?} but earlier records were {:?}",
                        index, found, expected
                    ));
                }
                Some(_) => {}
            }
        }

        match shape {
            None => Ok(MonitorsResult::Empty),
            Some(MonitorsShape::Message) => decode_all(items).map(MonitorsResult::Messages),
            Some(MonitorsShape::Clean) => decode_all(items).map(MonitorsResult::Clean),
            Some(MonitorsShape::Monitor) => decode_all(items).map(MonitorsResult::Monitors),
        }
    }
}

fn decode_all<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, String> {
    serde_json::from_value(Value::Array(items)).map_err(|e| e.to_string())
}

/// `GET /monitors`.
pub struct MonitorsEndpoint;

impl EndpointSpec for MonitorsEndpoint {
    const PATH: &'static str = "/monitors";
    const METHOD: HttpMethod = HttpMethod::Get;
    type Params = MonitorsOptions;
    type Output = MonitorsResult;
}

#[derive(Debug, Clone)]
pub struct MonitorsApi {
    client: Arc<HttpClient>,
}

impl MonitorsApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Calls `/monitors` and returns whichever shape the daemon answered with.
    pub async fn get_monitors(
        &self,
        options: &MonitorsOptions,
        request_options: Option<RequestOptions>,
    ) -> ApiResult<ApiResponse<MonitorsResult>> {
        self.client.call::<MonitorsEndpoint>(options, request_options).await
    }

    /// Runs a state-changing command (`delete`, `undelete`, `remove`, `watch`)
    /// and expects status messages back.
    pub async fn monitors(&self, options: &MonitorsOptions) -> ApiResult<Vec<Message>> {
        let response = self.get_monitors(options, None).await?;
        narrow(response, |result| match result {
            MonitorsResult::Messages(messages) => Ok(messages),
            MonitorsResult::Empty => Ok(Vec::new()),
            other => Err(other),
        })
    }

    /// Equivalent to `chifra monitors --clean`.
    pub async fn clean(&self, options: &MonitorsOptions) -> ApiResult<Vec<MonitorClean>> {
        let options = MonitorsOptions { clean: Some(true), ..options.clone() };
        let response = self.get_monitors(&options, None).await?;
        narrow(response, |result| match result {
            MonitorsResult::Clean(cleaned) => Ok(cleaned),
            MonitorsResult::Empty => Ok(Vec::new()),
            other => Err(other),
        })
    }

    /// Equivalent to `chifra monitors --list`.
    pub async fn list(&self, options: &MonitorsOptions) -> ApiResult<Vec<Monitor>> {
        let options = MonitorsOptions { list: Some(true), ..options.clone() };
        let response = self.get_monitors(&options, None).await?;
        narrow(response, |result| match result {
            MonitorsResult::Monitors(monitors) => Ok(monitors),
            MonitorsResult::Empty => Ok(Vec::new()),
            other => Err(other),
        })
    }
}

fn narrow<T>(
    response: ApiResponse<MonitorsResult>,
    pick: impl FnOnce(MonitorsResult) -> Result<T, MonitorsResult>,
) -> ApiResult<T> {
    let raw = response.raw().to_string();
    pick(response.into_data()).map_err(|other| {
        let reason = format!("unexpected {} in monitors response", other.variant_name());
        ApiSdkError::decode(reason, raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::{Endpoint, ParameterBag, build};
    use serde_json::json;

    const ADDR_A: &str = "0x054993ab0f2b1acc0fdc65405ee203b4271bebe6";
    const ADDR_B: &str = "0xf503017d7baf7fbc0fff7492b751025c6a78179b";

    #[test]
    fn only_set_fields_reach_the_query() {
        let options = MonitorsOptions {
            clean: Some(true),
            ..MonitorsOptions::new("mainnet").with_addrs(["0xabc", "0xdef"])
        };
        let bag = ParameterBag::from_params(&options).unwrap();

        let descriptor = build(Endpoint::get("/monitors"), Some(&bag), None).unwrap();

        let mut pairs: Vec<(&str, &str)> =
            descriptor.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("addrs", "0xabc"), ("addrs", "0xdef"), ("clean", "true"), ("chain", "mainnet")]
        );

        // same multiset as chain=mainnet&addrs=0xabc&addrs=0xdef&clean=true
        pairs.sort();
        let mut expected =
            vec![("chain", "mainnet"), ("addrs", "0xabc"), ("addrs", "0xdef"), ("clean", "true")];
        expected.sort();
        assert_eq!(pairs, expected);
        for absent in ["delete", "watch", "undelete", "remove", "list", "noHeader"] {
            let present = descriptor.query.iter().any(|(k, _)| k == absent);
            assert!(!present, "{} should be absent", absent);
        }
    }

    #[test]
    fn wire_names_are_camel_case() {
        let options = MonitorsOptions {
            batch_size: Some(8),
            run_count: Some(2),
            sleep: Some(1.5),
            no_header: Some(true),
            ..MonitorsOptions::new("sepolia")
        };
        let bag = ParameterBag::from_params(&options).unwrap();

        let keys: Vec<&str> = bag.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["batchSize", "runCount", "sleep", "chain", "noHeader"]);
    }

    #[test]
    fn non_finite_sleep_fails_instead_of_vanishing() {
        for sleep in [f64::NAN, f64::INFINITY] {
            let options = MonitorsOptions { sleep: Some(sleep), ..MonitorsOptions::new("mainnet") };

            let result = ParameterBag::from_params(&options);

            assert!(
                matches!(result, Err(ApiSdkError::InvalidParameterKind { .. })),
                "{} was accepted: {:?}",
                sleep,
                result
            );
            assert!(options.to_string().starts_with("<unserializable options"));
        }
    }

    #[test]
    fn display_renders_json() {
        let options = MonitorsOptions { watch: Some(true), ..MonitorsOptions::new("mainnet") };

        assert_eq!(options.to_string(), r#"{"watch":true,"chain":"mainnet"}"#);
    }

    #[test]
    fn classifies_monitor_records() {
        let data = json!([
            { "address": ADDR_A, "nRecords": 12, "fileSize": 104 },
            { "address": ADDR_B, "nRecords": 0 }
        ]);

        match MonitorsResult::from_data(data).unwrap() {
            MonitorsResult::Monitors(monitors) => {
                assert_eq!(monitors.len(), 2);
                assert_eq!(monitors[0].n_records, 12);
            }
            other => panic!("expected monitors, got {:?}", other),
        }
    }

    #[test]
    fn classifies_clean_records() {
        let data = json!([{ "address": ADDR_A, "sizeNow": 10, "sizeThen": 12, "dups": 2 }]);

        match MonitorsResult::from_data(data).unwrap() {
            MonitorsResult::Clean(cleaned) => assert_eq!(cleaned[0].removed(), 2),
            other => panic!("expected clean results, got {:?}", other),
        }
    }

    #[test]
    fn classifies_messages() {
        let data = json!([{ "msg": "monitor deleted" }]);

        let result = MonitorsResult::from_data(data).unwrap();

        assert_eq!(
            result,
            MonitorsResult::Messages(vec![Message { msg: "monitor deleted".into(), num: None }])
        );
    }

    #[test]
    fn empty_list_is_empty() {
        let result = MonitorsResult::from_data(json!([])).unwrap();

        assert_eq!(result, MonitorsResult::Empty);
        assert!(result.is_empty());
    }

    #[test]
    fn mixed_shapes_are_rejected() {
        let data = json!([{ "msg": "hi" }, { "address": ADDR_A, "nRecords": 1 }]);

        assert!(MonitorsResult::from_data(data).is_err());
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = MonitorsResult::from_data(json!([{ "error": "not found" }])).unwrap_err();

        assert!(err.contains("record 0"));
    }

    #[test]
    fn non_list_data_is_rejected() {
        assert!(MonitorsResult::from_data(json!({ "error": "not found" })).is_err());
    }

    #[test]
    fn narrowing_mismatch_is_a_decode_error() {
        let raw = json!({ "data": [{ "msg": "x" }] });
        let response = ApiResponse::new(
            MonitorsResult::Messages(vec![Message { msg: "x".into(), num: None }]),
            None,
            raw.clone(),
        );

        let result = narrow(response, |result| match result {
            MonitorsResult::Monitors(monitors) => Ok(monitors),
            other => Err(other),
        });

        match result {
            Err(ApiSdkError::DecodeError { raw: body, .. }) => assert_eq!(body, raw.to_string()),
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }
}
