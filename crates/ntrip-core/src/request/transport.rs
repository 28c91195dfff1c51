//! libcurl-backed [`Transport`].

use curl::easy::{Easy, List};
use std::time::Duration;

use crate::config::ClientSettings;
use crate::error::TransportError;

use super::{RawResponse, ResolvedConnection, Transport};

/// Performs the sourcetable GET with the curl crate (libcurl).
///
/// One attempt, no redirects, no retries. Runs in the current thread; call
/// from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, conn: &ResolvedConnection) -> Result<RawResponse, TransportError> {
        let curl_err = |source: curl::Error| TransportError::Curl {
            url: conn.url.clone(),
            source,
        };
        let mut body: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        easy.url(&conn.url).map_err(curl_err)?;
        easy.get(true).map_err(curl_err)?;
        easy.connect_timeout(self.connect_timeout).map_err(curl_err)?;
        easy.timeout(self.timeout).map_err(curl_err)?;
        // NTRIP 1.0 casters reply with "SOURCETABLE 200 OK" instead of an HTTP
        // status line; libcurl only accepts that as an HTTP/0.9 response.
        easy.http_09_allowed(true).map_err(curl_err)?;

        let mut list = List::new();
        for (name, value) in &conn.headers {
            list.append(&format!("{}: {}", name, value))
                .map_err(curl_err)?;
        }
        easy.http_headers(list).map_err(curl_err)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        // 0 when the caster answered without an HTTP status line.
        let status = easy.response_code().map_err(curl_err)?;
        Ok(RawResponse { status, body })
    }
}
