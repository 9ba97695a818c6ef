pub mod http;
mod monitors;
pub mod query;
mod response;
mod types;

pub use monitors::{MonitorsApi, MonitorsEndpoint, MonitorsOptions, MonitorsResult};
pub use response::{ApiResponse, EndpointSpec, ResultUnion};
pub use types::{ApiBaseConfig, ApiResult, ApiSdkError, DEFAULT_SERVER_URL};
