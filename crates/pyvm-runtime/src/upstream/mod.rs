//! Upstream source distribution access
//!
//! - HTTP client construction with user-agent and timeout
//! - Source archive URL construction

pub mod client;
pub mod url;

pub use client::{USER_AGENT, build_client};
pub use url::source_archive_url;
