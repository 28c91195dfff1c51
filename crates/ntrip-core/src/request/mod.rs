//! The one-shot sourcetable request.
//!
//! validate config → sanitize host → one GET → parse body. The I/O itself
//! sits behind the [`Transport`] trait so the flow can run against a fake
//! caster; [`CurlTransport`] is the real one.

mod headers;
mod resolve;
mod transport;

pub use headers::build_headers;
pub use resolve::ResolvedConnection;
pub use transport::CurlTransport;

use crate::config::{ClientSettings, NtripConfig};
use crate::error::{SourcetableError, TransportError};
use crate::sourcetable::{self, Mountpoint};

/// Status and complete body of the caster's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status, or 0 for an NTRIP 1.0 style reply without one.
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs the single GET for a resolved connection.
pub trait Transport {
    fn get(&self, conn: &ResolvedConnection) -> Result<RawResponse, TransportError>;
}

/// Fetches and parses a caster's sourcetable using libcurl.
pub fn fetch_sourcetable(
    cfg: &NtripConfig,
    settings: &ClientSettings,
) -> Result<Vec<Mountpoint>, SourcetableError> {
    fetch_with(&CurlTransport::new(settings), cfg, settings)
}

/// Fetches and parses a caster's sourcetable over the given transport.
///
/// Config problems are reported before the transport is touched. The body
/// is parsed whatever the status; an error page simply yields no records.
pub fn fetch_with(
    transport: &dyn Transport,
    cfg: &NtripConfig,
    settings: &ClientSettings,
) -> Result<Vec<Mountpoint>, SourcetableError> {
    let conn = ResolvedConnection::resolve(cfg, &settings.user_agent)?;
    // Header values may carry credentials; log names only.
    let header_names: Vec<&str> = conn.headers.iter().map(|(k, _)| k.as_str()).collect();
    tracing::debug!(
        host = %conn.host,
        port = conn.port,
        tls = conn.tls,
        headers = ?header_names,
        "requesting sourcetable from {}",
        conn.url
    );

    let response = transport.get(&conn)?;
    if response.status != 0 && !(200..300).contains(&response.status) {
        tracing::warn!(
            "caster {} answered HTTP {}; parsing body anyway",
            conn.url,
            response.status
        );
    }

    let mountpoints = sourcetable::parse_bytes(&response.body, &settings.sourcetable);
    tracing::info!(
        "sourcetable from {}: {} bytes, {} mountpoints",
        conn.url,
        response.body.len(),
        mountpoints.len()
    );
    Ok(mountpoints)
}
