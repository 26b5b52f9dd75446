//! Application configuration loaded from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Application configuration loaded from environment variables.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Probe Behaviour ===
    /// Seconds after start before `/ready` reports ready.
    #[serde(default = "default_boot_delay")]
    pub boot_delay: u64,

    /// Database connection string. Only checked for non-emptiness.
    #[serde(default)]
    pub db_dsn: String,

    /// Enables the failure-injecting new feature. Case-insensitive `"true"`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub feature_new: bool,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_boot_delay() -> u64 {
    5
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Anything other than a case-insensitive `"true"` disables the flag.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.eq_ignore_ascii_case("true"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boot_delay: default_boot_delay(),
            db_dsn: String::new(),
            feature_new: false,
            port: default_port(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Deserialize configuration from explicit `(KEY, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::from_iter(vars.into_iter().map(|(k, v)| (k.into(), v.into())))
    }

    /// Boot delay as a [`Duration`].
    pub fn boot_delay_duration(&self) -> Duration {
        Duration::from_secs(self.boot_delay)
    }

    /// Whether a database DSN has been provided.
    pub fn db_configured(&self) -> bool {
        !self.db_dsn.is_empty()
    }

    /// DSN safe for logging: keeps the scheme, hides credentials and host.
    pub fn redacted_dsn(&self) -> String {
        if self.db_dsn.is_empty() {
            return "<unset>".to_string();
        }

        match self.db_dsn.split_once("://") {
            Some((scheme, _)) => format!("{}://***", scheme),
            None => "***".to_string(),
        }
    }

    /// Socket address to bind, all interfaces.
    pub fn bind_addr(&self, port_override: Option<u16>) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], port_override.unwrap_or(self.port)))
    }
}
