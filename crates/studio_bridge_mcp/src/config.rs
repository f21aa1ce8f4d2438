//! Bridge configuration and wire defaults.

use std::time::Duration;

/// Server name reported in `initialize`
pub const SERVER_NAME: &str = "roblox-mcp-bridge";

/// Client id used when a poll, ping, or tool call does not name one
pub const DEFAULT_CLIENT_ID: &str = "studio";

/// A client counts as connected while its last poll or ping is younger than this
pub const LIVENESS_WINDOW: Duration = Duration::from_secs(15);

/// Default HTTP port the Studio plugin polls
pub const DEFAULT_HTTP_PORT: u16 = 28650;

/// Default time a `/poll` request is held open before replying with no job
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time the dispatcher waits for a result before cancelling
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings shared by both transports.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// HTTP bind address; empty means all interfaces
    pub http_bind: String,

    /// HTTP port
    pub http_port: u16,

    /// Longest a `/poll` request is held open
    pub poll_timeout: Duration,

    /// Longest the dispatcher waits for a matching result
    pub job_timeout: Duration,

    /// Suppress per-request HTTP access logging
    pub quiet: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            http_bind: String::new(),
            http_port: DEFAULT_HTTP_PORT,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            job_timeout: DEFAULT_JOB_TIMEOUT,
            quiet: false,
        }
    }
}

impl BridgeConfig {
    /// Bind address with the empty-string default made explicit.
    pub fn bind_display(&self) -> &str {
        if self.http_bind.is_empty() {
            "0.0.0.0"
        } else {
            &self.http_bind
        }
    }
}
