//! Table / JSON rendering of mountpoints.

use anyhow::Result;
use ntrip_core::Mountpoint;

fn opt<T: ToString>(v: &Option<T>) -> String {
    v.as_ref()
        .map(|x| x.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn yn(b: bool) -> &'static str {
    if b {
        "Y"
    } else {
        "N"
    }
}

pub(crate) fn header_row() -> String {
    format!(
        "{:<16} {:<12} {:<14} {:<10} {:<5} {:>9} {:>10} {:<4} {:<4} {:<3} {:>7}",
        "MOUNTPOINT", "FORMAT", "NAV", "NETWORK", "CTRY", "LAT", "LON", "NMEA", "AUTH", "FEE", "BITRATE"
    )
}

pub(crate) fn format_row(m: &Mountpoint) -> String {
    let coord = |v: Option<f64>| v.map(|x| format!("{:.2}", x)).unwrap_or_else(|| "-".to_string());
    format!(
        "{:<16} {:<12} {:<14} {:<10} {:<5} {:>9} {:>10} {:<4} {:<4} {:<3} {:>7}",
        opt(&m.mountpoint),
        opt(&m.format),
        opt(&m.nav_system),
        opt(&m.network),
        opt(&m.country),
        coord(m.latitude),
        coord(m.longitude),
        yn(m.nmea),
        yn(m.authentication),
        yn(m.fee),
        opt(&m.bitrate)
    )
}

pub fn print_mountpoints(mountpoints: &[Mountpoint], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(mountpoints)?);
        return Ok(());
    }
    if mountpoints.is_empty() {
        println!("No mountpoints in sourcetable.");
        return Ok(());
    }
    println!("{}", header_row());
    for m in mountpoints {
        println!("{}", format_row(m));
    }
    Ok(())
}
