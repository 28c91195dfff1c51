//! NTRIP caster sourcetable client.
//!
//! - [`sanitize::sanitize_host`] turns user input into a bare caster host.
//! - [`sourcetable::parse`] turns a sourcetable body into [`Mountpoint`]s.
//! - [`request::fetch_sourcetable`] ties them together around one GET.

pub mod config;
pub mod error;
pub mod logging;
pub mod request;
pub mod sanitize;
pub mod sourcetable;

pub use config::{ClientSettings, NtripConfig, NtripVersion, Position};
pub use error::{ConfigError, SourcetableError, TransportError};
pub use request::fetch_sourcetable;
pub use sanitize::sanitize_host;
pub use sourcetable::{parse, Mountpoint};
