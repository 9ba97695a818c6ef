mod environment;
pub use environment::load_env_from_project_path;
mod logger;
pub use logger::{setup_info_logger, setup_logger};
mod shared;
pub use shared::common_types;
pub mod types;
