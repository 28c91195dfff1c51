//! NTRIP sourcetable model and parsing.
//!
//! A caster answers a GET on `/` with a plain-text sourcetable: one record
//! per line, fields separated by `;`, the first field naming the record
//! type (`STR`, `CAS`, `NET`). Only `STR` (stream) records are turned into
//! [`Mountpoint`]s; every other line is skipped.

mod parse;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use parse::{parse, parse_bytes, parse_with};

/// One advertised correction stream, from a single `STR;` line.
///
/// Every field degrades to absent (or `false`) when the caster omits or
/// mangles it; a record is never rejected because of a bad field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mountpoint {
    /// Stream name, used as the request path when connecting.
    pub mountpoint: Option<String>,
    /// Identifier / location text (absent in the compact layout).
    pub location: Option<String>,
    /// Data format, e.g. `RTCM 3.2`.
    pub format: Option<String>,
    /// Message list, e.g. `1004(1),1006(10)`.
    pub format_details: Option<String>,
    /// Carrier phase indicator.
    pub carrier: Option<String>,
    /// Navigation systems, e.g. `GPS+GLO`.
    pub nav_system: Option<String>,
    pub network: Option<String>,
    pub country: Option<String>,
    /// Decimal degrees.
    pub latitude: Option<f64>,
    /// Decimal degrees.
    pub longitude: Option<f64>,
    /// Client must send NMEA GGA sentences (VRS streams).
    pub nmea: bool,
    pub authentication: bool,
    pub fee: bool,
    /// Bits per second.
    pub bitrate: Option<u32>,
}

/// Field layout of an `STR;` line.
///
/// Two layouts circulate. `Extended` carries a location/identifier field
/// right after the mountpoint name; `Compact` does not, so everything from
/// `format` onward sits one position earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrLayout {
    #[default]
    Extended,
    Compact,
}

impl FromStr for StrLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extended" => Ok(StrLayout::Extended),
            "compact" => Ok(StrLayout::Compact),
            other => Err(format!(
                "unknown STR layout {:?} (expected \"extended\" or \"compact\")",
                other
            )),
        }
    }
}

/// What to record when a bitrate field is missing or not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBitrate {
    /// Leave the bitrate absent.
    #[default]
    Absent,
    /// Legacy behaviour: report 0. Indistinguishable from a real 0 bps.
    Zero,
}

/// Parser knobs (optional `[sourcetable]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub layout: StrLayout,
    #[serde(default)]
    pub missing_bitrate: MissingBitrate,
}

/// Field positions for one layout. Index 0 is always the `STR` tag.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldMap {
    pub mountpoint: usize,
    pub location: Option<usize>,
    pub format: usize,
    pub format_details: usize,
    pub carrier: usize,
    pub nav_system: usize,
    pub network: usize,
    pub country: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub nmea: usize,
    pub authentication: usize,
    pub fee: usize,
    pub bitrate: usize,
}

impl StrLayout {
    pub(crate) const fn fields(self) -> FieldMap {
        // Every field after the mountpoint moves left by one without a location column.
        let (location, shift) = match self {
            StrLayout::Extended => (Some(2), 0),
            StrLayout::Compact => (None, 1),
        };
        FieldMap {
            mountpoint: 1,
            location,
            format: 3 - shift,
            format_details: 4 - shift,
            carrier: 5 - shift,
            nav_system: 6 - shift,
            network: 7 - shift,
            country: 8 - shift,
            latitude: 9 - shift,
            longitude: 10 - shift,
            nmea: 11 - shift,
            authentication: 12 - shift,
            fee: 13 - shift,
            bitrate: 14 - shift,
        }
    }
}
