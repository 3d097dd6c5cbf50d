// ── Runtime connection configuration ──
//
// These types describe *how* to talk to an admin server. They carry
// credential data and connection tuning, but never touch disk. The TUI
// (via castmin-config) constructs a `ServerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default interval between periodic table reloads.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How to authenticate with the server.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Form login; the session cookie is kept by the HTTP client.
    Session {
        username: String,
        password: SecretString,
    },
    /// No login (reverse proxy handles authentication).
    Anonymous,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed test servers).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single admin server.
///
/// Built by the TUI, passed to `Controller` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server URL (e.g., `https://admin.example.org`).
    pub url: Url,
    /// Authentication method and credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How often pages reload their table while mounted.
    pub poll_interval: Duration,
    /// Rows per table page.
    pub page_size: usize,
}

impl ServerConfig {
    /// A config with default tuning for the given server and credentials.
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
