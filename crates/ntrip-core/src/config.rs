//! Caster settings and client configuration.
//!
//! [`NtripConfig`] is the immutable description of one caster request.
//! [`ClientSettings`] is the on-disk client configuration loaded from
//! `~/.config/ntrip/config.toml`, which may also carry a default
//! [`CasterProfile`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::sourcetable::ParseOptions;

/// NTRIP protocol revision to announce to the caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NtripVersion {
    #[serde(rename = "1.0")]
    V1,
    #[default]
    #[serde(rename = "2.0")]
    V2,
}

impl FromStr for NtripVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(NtripVersion::V1),
            "2" | "2.0" => Ok(NtripVersion::V2),
            other => Err(ConfigError::UnknownVersion(other.to_string())),
        }
    }
}

impl fmt::Display for NtripVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NtripVersion::V1 => f.write_str("1.0"),
            NtripVersion::V2 => f.write_str("2.0"),
        }
    }
}

/// Rover position sent to VRS casters as `Ntrip-Position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// One sourcetable request. Never modified by the request path; see
/// [`ResolvedConnection`](crate::request::ResolvedConnection) for the
/// derived, sanitized values.
#[derive(Debug, Clone, PartialEq)]
pub struct NtripConfig {
    /// Caster host as the user gave it (may include a scheme or path).
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub position: Option<Position>,
    pub version: NtripVersion,
    /// Use https instead of plain http.
    pub tls: bool,
}

impl NtripConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
            position: None,
            version: NtripVersion::default(),
            tls: false,
        }
    }

    /// Builds a config from a partially filled profile.
    ///
    /// Fails with [`ConfigError::MissingHost`] / [`ConfigError::MissingPort`]
    /// when the required fields are absent or the host is blank.
    pub fn from_profile(profile: CasterProfile) -> Result<Self, ConfigError> {
        let host = profile
            .host
            .filter(|h| !h.trim().is_empty())
            .ok_or(ConfigError::MissingHost)?;
        let port = profile.port.ok_or(ConfigError::MissingPort)?;
        Ok(Self {
            host,
            port,
            username: profile.username,
            password: profile.password,
            position: profile.position,
            version: profile.version.unwrap_or_default(),
            tls: profile.tls.unwrap_or(false),
        })
    }
}

/// Caster settings where every field may be missing, as read from
/// config.toml or assembled from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CasterProfile {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub version: Option<NtripVersion>,
    #[serde(default)]
    pub tls: Option<bool>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl CasterProfile {
    /// Fills every field missing in `self` from `fallback`.
    pub fn or(self, fallback: &CasterProfile) -> CasterProfile {
        CasterProfile {
            host: self.host.or_else(|| fallback.host.clone()),
            port: self.port.or(fallback.port),
            username: self.username.or_else(|| fallback.username.clone()),
            password: self.password.or_else(|| fallback.password.clone()),
            version: self.version.or(fallback.version),
            tls: self.tls.or(fallback.tls),
            position: self.position.or(fallback.position),
        }
    }
}

fn default_user_agent() -> String {
    format!("NTRIP ntrip-sourcetable/{}", env!("CARGO_PKG_VERSION"))
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

/// Client configuration loaded from `~/.config/ntrip/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Sent as `User-Agent`. Many casters only answer agents starting with "NTRIP".
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Upper bound for the whole request, body included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub sourcetable: ParseOptions,
    /// Caster used when the command line names none.
    #[serde(default)]
    pub caster: Option<CasterProfile>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            sourcetable: ParseOptions::default(),
            caster: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ntrip")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientSettings> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientSettings::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    Ok(load_from(&path)?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ClientSettings, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
