mod api;

pub use api::{
    ApiBaseConfig, ApiResponse, ApiResult, ApiSdkError, DEFAULT_SERVER_URL, EndpointSpec,
    MonitorsApi, MonitorsEndpoint, MonitorsOptions, MonitorsResult, ResultUnion,
    http::HttpClient,
    query::{Endpoint, HttpMethod, ParameterBag, RequestDescriptor, RequestOptions, build},
};
pub use trueblocks_core::{
    common_types::{BlockNumber, EvmAddress, Timestamp},
    types::{CallResult, Function, Message, MetaData, Monitor, MonitorClean, Parameter},
};
use std::sync::Arc;

pub struct SDK {
    pub monitors: MonitorsApi,
    client: Arc<HttpClient>,
}

impl SDK {
    /// Create a new SDK instance talking to the daemon at `server_url`
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::from_config(ApiBaseConfig::new(server_url))
    }

    pub fn from_config(config: ApiBaseConfig) -> Self {
        let client = Arc::new(HttpClient::new(config));

        Self { monitors: MonitorsApi::new(Arc::clone(&client)), client }
    }

    /// Create an SDK configured from `TB_API_URL` / `TB_API_TIMEOUT_MS`
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::from_config(ApiBaseConfig::from_env()?))
    }

    /// Call any declared endpoint
    pub async fn query<E: EndpointSpec>(
        &self,
        params: &E::Params,
        options: Option<RequestOptions>,
    ) -> ApiResult<ApiResponse<E::Output>> {
        self.client.call::<E>(params, options).await
    }

    /// Dispatch an already-built request, decoding into `T`
    pub async fn dispatch<T: ResultUnion>(
        &self,
        request: RequestDescriptor,
    ) -> ApiResult<ApiResponse<T>> {
        self.client.dispatch(request).await
    }
}
