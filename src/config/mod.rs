//! Configuration handling for the crawler.
//!
//! Everything has a sensible default so the crate works with zero
//! environment setup; `Config::from_env` reads overrides when present.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests and callers
/// refer to them directly.
pub const ENV_USER_AGENT: &str = "MARQUE_USER_AGENT";
pub const ENV_TIMEOUT_SECS: &str = "MARQUE_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "MARQUE_CONNECT_TIMEOUT_SECS";
pub const ENV_MAX_REDIRECTS: &str = "MARQUE_MAX_REDIRECTS";
pub const ENV_DEFAULT_SCHEME: &str = "MARQUE_DEFAULT_SCHEME";

/// Spoofed desktop browser user agent; some sites serve crawler UAs a
/// degraded page.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 5.1; rv:18.0) Gecko/20100101 Firefox/18.0";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Scheme prepended to URLs that lack an `http(s)://` prefix. Callers must
/// pick one mode and stick to it, otherwise the same input normalizes to two
/// different canonical URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeDefault {
    #[default]
    Https,
    /// Legacy mode for installations that normalized to `http://`.
    Http,
}

impl SchemeDefault {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

/// Crawler runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    user_agent: String,
    timeout_secs: u64,
    connect_timeout_secs: u64,
    max_redirects: usize,
    default_scheme: SchemeDefault,
}

impl Config {
    /// Load from environment variables, falling back to defaults. Values
    /// that fail to parse produce a `ConfigError` instead of being silently
    /// replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_agent =
            env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let timeout_secs = parse_env(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
        let connect_timeout_secs =
            parse_env(ENV_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let max_redirects = parse_env(ENV_MAX_REDIRECTS, DEFAULT_MAX_REDIRECTS)?;
        let default_scheme = match env::var(ENV_DEFAULT_SCHEME).as_deref() {
            Ok("http") => SchemeDefault::Http,
            Ok("https") | Err(_) => SchemeDefault::Https,
            Ok(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_DEFAULT_SCHEME,
                    reason: format!("expected 'http' or 'https', got '{}'", other),
                });
            }
        };
        Ok(Self {
            user_agent,
            timeout_secs,
            connect_timeout_secs,
            max_redirects,
            default_scheme,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Overall per-request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
    /// Connect timeout, separate from the overall timeout.
    pub fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout_secs
    }
    /// Redirect hop cap; bounds worst-case latency of redirect loops.
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
    pub fn default_scheme(&self) -> SchemeDefault {
        self.default_scheme
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            default_scheme: SchemeDefault::Https,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            field: key,
            reason: format!("could not parse '{}'", raw),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
