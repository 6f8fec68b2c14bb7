//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Signing key for flash message cookies; at least 64 bytes.
    pub secret: String,
    pub templates_dir: String,
    /// Base URL of the library API.
    pub api_base_url: String,
    /// Base URL of the blog API, including its `/api` prefix.
    pub blog_api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}
