//! Configuration options for the Doctor Assistant client

use std::path::PathBuf;
use std::time::Duration;

/// Configuration options for the Doctor Assistant client
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// The request timeout. The source UI has no timeout on in-flight
    /// requests, so the default is `None`; set one to bound hung requests.
    pub request_timeout: Option<Duration>,

    /// Override for the session file location. When unset, the session is
    /// stored under the platform config directory.
    pub session_file: Option<PathBuf>,

    /// Maximum number of history rows to request on bootstrap
    pub history_limit: Option<usize>,
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the session file location
    pub fn with_session_file(mut self, value: PathBuf) -> Self {
        self.session_file = Some(value);
        self
    }

    /// Set the history fetch limit
    pub fn with_history_limit(mut self, value: usize) -> Self {
        self.history_limit = Some(value);
        self
    }
}
