mod types;
pub use types::{ApiError, ApiErrors, RRSetApi};

pub mod ultradns;
pub use ultradns::{ProviderConfig, UdnsClient};
