//! Turn an [`NtripConfig`] into the concrete values used on the wire.

use crate::config::NtripConfig;
use crate::error::ConfigError;
use crate::sanitize::sanitize_host;

use super::headers::build_headers;

/// Sanitized, validated request parameters derived from an [`NtripConfig`].
///
/// The input config is left untouched; callers that need the sanitized
/// host read it from here.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConnection {
    /// Host after [`sanitize_host`].
    pub host: String,
    pub port: u16,
    pub tls: bool,
    /// Full sourcetable URL, e.g. `http://caster.example.com:2101/`.
    pub url: String,
    /// Ordered request headers (see [`build_headers`]).
    pub headers: Vec<(String, String)>,
}

impl ResolvedConnection {
    /// Validates `cfg` and derives the request parameters.
    ///
    /// Runs before any network activity; every failure is a [`ConfigError`].
    pub fn resolve(cfg: &NtripConfig, user_agent: &str) -> Result<Self, ConfigError> {
        if cfg.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        let host = sanitize_host(&cfg.host);
        if host.is_empty() {
            return Err(ConfigError::EmptyHost(cfg.host.clone()));
        }
        if cfg.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if let Some(pos) = cfg.position {
            if !pos.lat.is_finite() || !pos.lon.is_finite() {
                return Err(ConfigError::InvalidPosition {
                    lat: pos.lat,
                    lon: pos.lon,
                });
            }
        }

        let url = sourcetable_url(&host, cfg.port, cfg.tls)?;
        Ok(Self {
            host,
            port: cfg.port,
            tls: cfg.tls,
            url,
            headers: build_headers(cfg, user_agent),
        })
    }
}

/// Builds `scheme://host:port/`, rejecting hosts the URL parser would
/// reinterpret (userinfo, query, fragment, embedded port).
fn sourcetable_url(host: &str, port: u16, tls: bool) -> Result<String, ConfigError> {
    let scheme = if tls { "https" } else { "http" };
    // Bare IPv6 literals need brackets in the authority.
    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    let invalid = || ConfigError::InvalidHost(host.to_string());
    let url = url::Url::parse(&format!("{}://{}:{}/", scheme, authority, port)).map_err(|e| {
        tracing::debug!("host {:?} rejected by URL parser: {}", host, e);
        invalid()
    })?;
    if url.host_str().is_none()
        || !url.username().is_empty()
        || url.password().is_some()
        || url.path() != "/"
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(invalid());
    }
    Ok(url.to_string())
}
