mod call_result;
pub use call_result::CallResult;

mod function;
pub use function::{Function, Parameter};

mod message;
pub use message::Message;

mod meta;
pub use meta::MetaData;

mod monitor;
pub use monitor::Monitor;

mod monitor_clean;
pub use monitor_clean::MonitorClean;
