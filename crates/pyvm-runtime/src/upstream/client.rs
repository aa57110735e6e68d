//! HTTP client construction for source downloads

use reqwest::blocking::Client;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("pyvm/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with the given request timeout
///
/// # Errors
///
/// Returns error if client construction fails (e.g. TLS backend
/// initialization)
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
