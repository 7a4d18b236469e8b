//! Configuration options for the BabyTracker client

use std::time::Duration;

/// Configuration options for the BabyTracker client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout. `None` issues requests with no timeout, which
    /// matches the behavior of the reference web client.
    pub request_timeout: Option<Duration>,

    /// The `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            user_agent: format!("babytracker-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the `User-Agent` header
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }
}
