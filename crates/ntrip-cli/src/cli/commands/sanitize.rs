//! `ntrip sanitize <HOST>`

use ntrip_core::sanitize_host;

pub fn run_sanitize(host: &str) {
    println!("{}", sanitize_host(host));
}
