//! Client configuration

use std::time::Duration;

/// Request timeout used when the caller does not pick one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one ACOS device
#[derive(Clone)]
pub struct ClientConfig {
    /// Device host name or address, optionally with `:port`
    pub host: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Accept self-signed device certificates.
    ///
    /// Off by default. Most appliances ship with a self-signed certificate,
    /// so operators usually have to turn this on explicitly.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Create a config with the default timeout and certificate validation on
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Opt in to accepting invalid TLS certificates
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Base URL of the AxAPI v3 tree, always ending in `/`
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/axapi/v3/", host)
        } else {
            format!("https://{}/axapi/v3/", host)
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
