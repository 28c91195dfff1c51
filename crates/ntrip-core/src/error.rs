//! Error types for the sourcetable client.
//!
//! The sanitizer and parser never fail. Errors only come from the request
//! path and fall into two groups:
//!
//! - [`ConfigError`]: the caster settings are missing or unusable. Always
//!   reported before any network activity.
//! - [`TransportError`]: the single GET failed (DNS, connect, timeout).
//!   Reported as libcurl surfaced it; never retried.

use std::path::PathBuf;

/// Caster settings that cannot be turned into a request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NTRIP host is required")]
    MissingHost,

    #[error("NTRIP port is required")]
    MissingPort,

    /// Nothing was left after [`sanitize_host`](crate::sanitize::sanitize_host).
    #[error("NTRIP host {0:?} is empty after sanitizing")]
    EmptyHost(String),

    /// The sanitized host cannot be used as a URL host.
    #[error("NTRIP host {0:?} is not a valid hostname")]
    InvalidHost(String),

    #[error("NTRIP port must be between 1 and 65535")]
    InvalidPort,

    #[error("position {lat},{lon} is not a finite coordinate")]
    InvalidPosition { lat: f64, lon: f64 },

    #[error("unknown NTRIP version {0:?} (expected \"1.0\" or \"2.0\")")]
    UnknownVersion(String),

    #[error("cannot read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or a wrong-typed value (e.g. `port = "abc"`).
    #[error("invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Coarse classification of a failed GET, for messages and exit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    /// DNS lookup of the caster (or proxy) failed.
    Resolve,
    /// Connection refused, reset, or dropped mid-transfer.
    Connection,
    Tls,
    Other,
}

/// The sourcetable GET failed in the I/O layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("sourcetable request to {url} failed")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::Curl { source, .. } => classify_curl_error(source),
        }
    }
}

/// Maps libcurl error codes onto [`TransportErrorKind`].
pub fn classify_curl_error(e: &curl::Error) -> TransportErrorKind {
    if e.is_operation_timedout() {
        return TransportErrorKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return TransportErrorKind::Resolve;
    }
    if e.is_couldnt_connect()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportErrorKind::Connection;
    }
    if e.is_ssl_connect_error() || e.is_peer_failed_verification() {
        return TransportErrorKind::Tls;
    }
    TransportErrorKind::Other
}

/// Anything [`fetch_sourcetable`](crate::request::fetch_sourcetable) can return.
#[derive(Debug, thiserror::Error)]
pub enum SourcetableError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
