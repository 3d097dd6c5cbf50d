//! Configuration for the castmin TUI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `castmin_core::ServerConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use castmin_core::{AuthCredentials, ServerConfig, TlsVerification};

const KEYRING_SERVICE: &str = "castmin";
const ENV_PREFIX: &str = "CASTMIN_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    #[serde(default)]
    pub hotkeys: Hotkeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
            hotkeys: Hotkeys::default(),
        }
    }
}

impl Config {
    /// Look up a profile by name, falling back to the default profile.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, p)| (k.as_str(), p))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Seconds between table reloads.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Rows per table page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            insecure: false,
            poll_interval: default_poll_interval(),
            page_size: default_page_size(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    5
}
fn default_page_size() -> usize {
    10
}

/// Key bindings that can be remapped.
#[derive(Debug, Deserialize, Serialize)]
pub struct Hotkeys {
    /// Opens the new-event wizard.
    #[serde(default = "default_new_event_key")]
    pub new_event: String,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            new_event: default_new_event_key(),
        }
    }
}

fn default_new_event_key() -> String {
    "n".into()
}

/// A named server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Admin server base URL (e.g., "https://admin.example.org").
    pub server: String,

    /// Login name. Without one the session is anonymous.
    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or `CASTMIN_PASSWORD`).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "castmin", "castmin").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("castmin");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the platform config file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path`, then `CASTMIN_*` variables. Nested keys
/// use a double underscore: `CASTMIN_DEFAULTS__PAGE_SIZE=25`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["PASSWORD", "USERNAME", "LOG"])
                .split("__"),
        );

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve login credentials for a profile.
///
/// The username comes from the profile or `CASTMIN_USERNAME`. The
/// password is looked up in `CASTMIN_PASSWORD`, then the system keyring
/// (`castmin` / `{profile}/password`), then the profile itself. A
/// profile without a username logs in anonymously.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    let Some(username) = profile
        .username
        .clone()
        .or_else(|| std::env::var(format!("{ENV_PREFIX}USERNAME")).ok())
    else {
        return Ok(AuthCredentials::Anonymous);
    };

    // 1. Env var
    if let Ok(pw) = std::env::var(format!("{ENV_PREFIX}PASSWORD")) {
        return Ok(AuthCredentials::Session {
            username,
            password: SecretString::from(pw),
        });
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(AuthCredentials::Session {
                username,
                password: SecretString::from(pw),
            });
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(AuthCredentials::Session {
            username,
            password: SecretString::from(pw.clone()),
        });
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `ServerConfig` from a profile and the global defaults.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ServerConfig, ConfigError> {
    let url: url::Url = profile
        .server
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", profile.server),
        })?;

    if defaults.page_size == 0 {
        return Err(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be at least 1".into(),
        });
    }

    let auth = resolve_auth(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ServerConfig::new(url, auth);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.poll_interval = Duration::from_secs(defaults.poll_interval.max(1));
    config.page_size = defaults.page_size;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("missing.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.defaults.poll_interval, 5);
            assert_eq!(cfg.defaults.page_size, 10);
            assert_eq!(cfg.hotkeys.new_event, "n");
            assert_eq!(cfg.default_profile.as_deref(), Some("default"));
            Ok(())
        });
    }

    #[test]
    fn file_and_env_layer_over_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    default_profile = "campus"

                    [defaults]
                    timeout = 12

                    [hotkeys]
                    new_event = "a"

                    [profiles.campus]
                    server = "https://admin.example.org"
                    username = "admin"
                "#,
            )?;
            jail.set_env("CASTMIN_DEFAULTS__PAGE_SIZE", "25");

            let cfg = load_config_from(&jail.directory().join("config.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.defaults.timeout, 12);
            assert_eq!(cfg.defaults.page_size, 25);
            assert_eq!(cfg.hotkeys.new_event, "a");

            let (name, profile) = cfg.profile(None).map_err(|e| e.to_string())?;
            assert_eq!(name, "campus");
            assert_eq!(profile.username.as_deref(), Some("admin"));
            Ok(())
        });
    }

    #[test]
    fn env_password_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("CASTMIN_PASSWORD", "from-env");
            let profile = Profile {
                server: "https://admin.example.org".into(),
                username: Some("admin".into()),
                password: Some("from-file".into()),
                ca_cert: None,
                insecure: None,
                timeout: None,
            };

            let cfg = profile_to_server_config(&profile, "campus", &Defaults::default())
                .map_err(|e| e.to_string())?;
            match cfg.auth {
                AuthCredentials::Session { username, password } => {
                    assert_eq!(username, "admin");
                    assert_eq!(password.expose_secret(), "from-env");
                }
                AuthCredentials::Anonymous => panic!("expected session credentials"),
            }
            assert_eq!(cfg.poll_interval, Duration::from_secs(5));
            assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
            Ok(())
        });
    }

    #[test]
    fn missing_username_means_anonymous() {
        let profile = Profile {
            server: "https://admin.example.org".into(),
            username: None,
            password: None,
            ca_cert: None,
            insecure: Some(true),
            timeout: Some(3),
        };
        Jail::expect_with(|_| {
            let cfg = profile_to_server_config(&profile, "p", &Defaults::default())
                .map_err(|e| e.to_string())?;
            assert!(matches!(cfg.auth, AuthCredentials::Anonymous));
            assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
            assert_eq!(cfg.timeout, Duration::from_secs(3));
            Ok(())
        });
    }

    #[test]
    fn invalid_url_is_rejected() {
        let profile = Profile {
            server: "not a url".into(),
            username: None,
            password: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        };
        let err = profile_to_server_config(&profile, "p", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "server"));
    }

    #[test]
    fn unknown_profile_is_reported() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile(Some("nope")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }
}
