// HTTP client construction for the admin API.
//
// Every admin-ng request rides the session cookie set by the form login,
// so the built client always owns a cookie jar. Only certificate
// handling and timeouts are configurable.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;
use reqwest::cookie::Jar;

use crate::error::Error;

/// How the server certificate is checked.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    #[default]
    System,
    /// Trust an extra PEM root, e.g. a campus CA.
    CustomCa(PathBuf),
    /// Skip verification. Only for local development servers.
    DangerAcceptInvalid,
}

impl TlsMode {
    fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, Error> {
        match self {
            Self::System => Ok(builder),
            Self::CustomCa(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    Error::Tls(format!("cannot read CA certificate {}: {e}", path.display()))
                })?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| Error::Tls(format!("invalid CA certificate: {e}")))?;
                Ok(builder.add_root_certificate(cert))
            }
            Self::DangerAcceptInvalid => Ok(builder.danger_accept_invalid_certs(true)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Whole-request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a client with a fresh session cookie jar.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout.min(self.timeout))
            .cookie_provider(Arc::new(Jar::default()))
            .user_agent(concat!("castmin/", env!("CARGO_PKG_VERSION")));

        self.tls
            .apply(builder)?
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ca_file_is_a_tls_error() {
        let config = TransportConfig {
            tls: TlsMode::CustomCa(PathBuf::from("/nonexistent/castmin-ca.pem")),
            ..TransportConfig::default()
        };
        let err = config.build_client().err();
        assert!(matches!(err, Some(Error::Tls(ref msg)) if msg.contains("castmin-ca.pem")));
    }

    #[test]
    fn default_config_builds() {
        assert!(TransportConfig::default().build_client().is_ok());
    }
}
