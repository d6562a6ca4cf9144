pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

pub use config::{CheckConfig, UplinkConfig};
pub use endpoints::{load_endpoints, parse_endpoints};
pub use error::{ConfigError, InputError};
pub use types::*;
