//! NTRIP request headers.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::{NtripConfig, NtripVersion};

/// Builds the ordered header list for a sourcetable GET.
///
/// - `User-Agent` always.
/// - `Ntrip-Version: Ntrip/2.0` only for NTRIP 2.0.
/// - `Authorization: Basic ...` only when both username and password are set.
/// - `Ntrip-Position: <lat>,<lon>` only when a position is given.
pub fn build_headers(cfg: &NtripConfig, user_agent: &str) -> Vec<(String, String)> {
    let mut headers = vec![("User-Agent".to_string(), user_agent.trim().to_string())];

    if cfg.version == NtripVersion::V2 {
        headers.push(("Ntrip-Version".to_string(), "Ntrip/2.0".to_string()));
    }

    let username = cfg.username.as_deref().filter(|u| !u.is_empty());
    let password = cfg.password.as_deref().filter(|p| !p.is_empty());
    if let (Some(user), Some(pass)) = (username, password) {
        let token = STANDARD.encode(format!("{}:{}", user, pass));
        headers.push(("Authorization".to_string(), format!("Basic {}", token)));
    }

    if let Some(pos) = cfg.position {
        headers.push((
            "Ntrip-Position".to_string(),
            format!("{},{}", pos.lat, pos.lon),
        ));
    }

    headers
}
