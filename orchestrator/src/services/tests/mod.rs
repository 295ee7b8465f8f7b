//! Service-specific tests
//!
//! This module contains tests for the real service implementations. The API
//! client runs against a local wiremock server; the audit writer against a
//! temporary directory.


// Common test utilities for services
#[cfg(test)]
pub mod common {
    use std::time::Duration;

    use url::Url;
    use wiremock::MockServer;

    use crate::services::RealPartnerApi;

    /// Standard request timeout for client tests
    pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

    pub const TEST_TOKEN: &str = "test-token";

    /// Client pointed at a mock server
    pub fn client_for(server: &MockServer) -> RealPartnerApi {
        let base = Url::parse(&server.uri()).expect("mock server uri");
        RealPartnerApi::new(base, TEST_TIMEOUT).expect("client")
    }

    pub fn bearer() -> String {
        format!("Bearer {TEST_TOKEN}")
    }
}
