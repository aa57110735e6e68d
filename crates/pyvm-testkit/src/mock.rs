//! Mock server infrastructure for testing
//!
//! A single shared mockito server serves every test in a process. Tests
//! avoid collisions by mocking distinct versions (distinct URL paths).

use lazy_static::lazy_static;
use mockito::{Mock, Server, ServerGuard};
use std::sync::Mutex;

lazy_static! {
    /// Global shared mockito server for all tests
    pub(crate) static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get the shared mock server
///
/// Hold the guard only while creating mocks, not for the whole test, so
/// other tests can keep using the server.
pub(crate) fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Serves `Python-<version>.tgz` at `/<version>/Python-<version>.tgz`
///
/// Returns the mock (assert on it for fetch counts) and the base URL to use
/// as the install source.
pub fn mock_source_archive(version: &str, body: Vec<u8>, expected_hits: usize) -> (Mock, String) {
    let mut server = get_shared_mock_server();
    let mock = server
        .mock(
            "GET",
            format!("/{}/Python-{}.tgz", version, version).as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/x-gzip")
        .with_body(body)
        .expect(expected_hits)
        .create();
    (mock, server.url())
}

/// Answers `/<version>/Python-<version>.tgz` with `status` and no archive
pub fn mock_source_archive_status(version: &str, status: usize) -> (Mock, String) {
    let mut server = get_shared_mock_server();
    let mock = server
        .mock(
            "GET",
            format!("/{}/Python-{}.tgz", version, version).as_str(),
        )
        .with_status(status)
        .with_body("not found")
        .create();
    (mock, server.url())
}
