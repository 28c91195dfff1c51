//! `ntrip list [HOST]` – fetch a caster's sourcetable.

use anyhow::{Context, Result};
use ntrip_core::config::{ClientSettings, NtripConfig};
use ntrip_core::request;

use super::output::print_mountpoints;
use crate::cli::ListArgs;

pub async fn run_list(args: &ListArgs, mut settings: ClientSettings) -> Result<()> {
    let profile = match &settings.caster {
        Some(fallback) => args.profile().or(fallback),
        None => args.profile(),
    };
    let cfg = NtripConfig::from_profile(profile)?;
    settings.sourcetable = args.output.parse_options(settings.sourcetable);
    tracing::info!("list host={} port={} version={}", cfg.host, cfg.port, cfg.version);

    let mountpoints = tokio::task::spawn_blocking(move || {
        request::fetch_sourcetable(&cfg, &settings)
            .with_context(|| format!("fetch sourcetable from {}:{}", cfg.host, cfg.port))
    })
    .await
    .context("sourcetable task join")??;

    print_mountpoints(&mountpoints, args.output.json)
}
