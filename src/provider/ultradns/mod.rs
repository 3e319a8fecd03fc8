mod config;
pub use config::{DEFAULT_BASE_URL, ENV_BASE_URL, ENV_PASSWORD, ENV_USERNAME, ProviderConfig};

mod restful_cli;
pub use restful_cli::UdnsClient;
