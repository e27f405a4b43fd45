pub mod errors;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError, WebBridgeError};
pub use id::InstanceIdAllocator;
pub use types::{InstanceId, InstanceState, Rect};

pub type Result<T> = std::result::Result<T, BridgeError>;
