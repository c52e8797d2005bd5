//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with a
//! whole-request timeout. LLM backends occasionally hang mid-response;
//! the timeout bounds how long an analysis request can stall.

use std::time::Duration;

/// Build a `reqwest::Client` with the given whole-request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to build reqwest client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let _client = build_http_client(Duration::from_secs(15));
    }
}
