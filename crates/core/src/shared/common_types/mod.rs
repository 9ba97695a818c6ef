mod evm_address;
pub use evm_address::{EvmAddress, ParseEvmAddressError};

mod block_number;
pub use block_number::{BlockNumber, ParseBlockNumberError};

mod timestamp;
pub use timestamp::Timestamp;
