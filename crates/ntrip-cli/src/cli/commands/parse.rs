//! `ntrip parse <PATH>` – parse a saved sourcetable.

use anyhow::{Context, Result};
use ntrip_core::config::ClientSettings;
use ntrip_core::sourcetable;
use std::io::Read;
use std::path::Path;

use super::output::print_mountpoints;
use crate::cli::OutputArgs;

pub fn run_parse(path: &Path, output: &OutputArgs, settings: &ClientSettings) -> Result<()> {
    let body = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("read sourcetable from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("read {}", path.display()))?
    };

    let opts = output.parse_options(settings.sourcetable);
    let mountpoints = sourcetable::parse_bytes(&body, &opts);
    tracing::info!("parsed {} mountpoints from {}", mountpoints.len(), path.display());
    print_mountpoints(&mountpoints, output.json)
}
