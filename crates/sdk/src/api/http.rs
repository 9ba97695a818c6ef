use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{
    query::{self, Endpoint, ParameterBag, RequestDescriptor, RequestOptions},
    response::{ApiResponse, EndpointSpec, ResultUnion, split_envelope},
    types::{ApiBaseConfig, ApiResult, ApiSdkError},
};

/// Sends request descriptors to the daemon and decodes what comes back.
///
/// Holds no per-call state; clones share reqwest's connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_config: ApiBaseConfig,
}

impl HttpClient {
    pub fn new(base_config: ApiBaseConfig) -> Self {
        Self { client: Client::new(), base_config }
    }

    pub fn server_url(&self) -> &str {
        &self.base_config.server_url
    }

    /// Builds and dispatches a call to a declared endpoint.
    pub async fn call<E: EndpointSpec>(
        &self,
        params: &E::Params,
        options: Option<RequestOptions>,
    ) -> ApiResult<ApiResponse<E::Output>> {
        let bag = ParameterBag::from_params(params)?;
        let request = query::build(Endpoint::new(E::PATH, E::METHOD), Some(&bag), options)?;
        self.dispatch(request).await
    }

    /// Performs exactly one HTTP request. Nothing is retried or cached; drop
    /// the future to cancel.
    pub async fn dispatch<T: ResultUnion>(
        &self,
        request: RequestDescriptor,
    ) -> ApiResult<ApiResponse<T>> {
        let url = request.url(&self.base_config.server_url)?;
        debug!("{} {}", request.endpoint.method, url);

        let mut builder = self
            .client
            .request(request.endpoint.method.into(), url.clone())
            .headers(request.options.headers);
        if let Some(timeout) = request.options.timeout.or(self.base_config.timeout) {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        // The status line already arrived; keep it even if the body is cut short.
        let text = response.text().await.map_err(|e| ApiSdkError::TransportError {
            status: Some(status.as_u16()),
            body: None,
            message: format!("reading {} response from {} failed: {}", status, url.path(), e),
        })?;
        debug!("{} answered {} ({} bytes)", url, status, text.len());

        if !status.is_success() {
            warn!("{} failed with status {}", url, status);
            return Err(ApiSdkError::TransportError {
                status: Some(status.as_u16()),
                message: format!("{} returned {}", url.path(), status),
                body: Some(text),
            });
        }

        decode_body(&text).inspect_err(|e| warn!("{} {}", url, e))
    }
}

fn decode_body<T: ResultUnion>(text: &str) -> ApiResult<ApiResponse<T>> {
    let raw: Value = serde_json::from_str(text)
        .map_err(|e| ApiSdkError::decode(format!("body is not JSON: {}", e), text))?;

    let (data, meta) = split_envelope(&raw).map_err(|reason| ApiSdkError::decode(reason, text))?;
    let data = T::from_data(data).map_err(|reason| ApiSdkError::decode(reason, text))?;

    Ok(ApiResponse::new(data, meta, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trueblocks_core::types::Message;

    #[test]
    fn decodes_enveloped_messages() {
        let response: ApiResponse<Vec<Message>> =
            decode_body(r#"{"data":[{"msg":"deleted"}],"meta":{"client":1}}"#).unwrap();

        assert_eq!(response.data[0].msg, "deleted");
        assert!(response.meta.is_some());
        assert_eq!(response.raw()["data"][0]["msg"], "deleted");
    }

    #[test]
    fn non_json_body_is_a_decode_error_with_raw_text() {
        let result = decode_body::<Value>("<html>oops</html>");

        match result {
            Err(ApiSdkError::DecodeError { raw, .. }) => assert_eq!(raw, "<html>oops</html>"),
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn shape_mismatch_keeps_the_raw_body() {
        let body = r#"{"data":{"unexpected":true}}"#;

        let result = decode_body::<Vec<Message>>(body);

        match result {
            Err(ApiSdkError::DecodeError { raw, .. }) => assert_eq!(raw, body),
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }
}
