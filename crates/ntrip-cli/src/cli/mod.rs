//! CLI for the NTRIP sourcetable client.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use ntrip_core::config::{self, CasterProfile, NtripVersion, Position};
use ntrip_core::sourcetable::{MissingBitrate, ParseOptions, StrLayout};
use std::path::PathBuf;

use commands::{run_completions, run_list, run_man, run_parse, run_sanitize};

/// Top-level CLI for the NTRIP sourcetable client.
#[derive(Debug, Parser)]
#[command(name = "ntrip")]
#[command(about = "List the mountpoints an NTRIP caster advertises", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a caster's sourcetable and list its mountpoints.
    List(ListArgs),

    /// Parse a saved sourcetable file ("-" for stdin).
    Parse {
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the host as it would be used for the connection.
    Sanitize {
        host: String,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Caster host; falls back to [caster] in config.toml.
    pub host: Option<String>,

    /// Caster port (usually 2101).
    #[arg(short, long)]
    pub port: Option<u16>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Rover latitude for VRS casters (decimal degrees).
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Rover longitude for VRS casters (decimal degrees).
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// NTRIP version to announce: 1.0 or 2.0.
    #[arg(long = "ntrip-version", value_name = "VERSION")]
    pub version: Option<NtripVersion>,

    /// Use https.
    #[arg(long)]
    pub tls: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ListArgs {
    /// Caster settings given on the command line; unset fields stay `None`.
    pub fn profile(&self) -> CasterProfile {
        let position = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Position { lat, lon }),
            _ => None,
        };
        CasterProfile {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            version: self.version,
            tls: self.tls.then_some(true),
            position,
        }
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// STR field layout: extended (with location) or compact.
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<StrLayout>,

    /// Report a missing or bad bitrate as 0 instead of leaving it empty.
    #[arg(long)]
    pub legacy_bitrate: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    /// Command-line overrides applied on top of the config file options.
    pub fn parse_options(&self, base: ParseOptions) -> ParseOptions {
        ParseOptions {
            layout: self.layout.unwrap_or(base.layout),
            missing_bitrate: if self.legacy_bitrate {
                MissingBitrate::Zero
            } else {
                base.missing_bitrate
            },
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::List(args) => {
                let settings = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", settings);
                run_list(&args, settings).await?;
            }
            CliCommand::Parse { path, output } => {
                let settings = config::load_or_init()?;
                run_parse(&path, &output, &settings)?;
            }
            CliCommand::Sanitize { host } => run_sanitize(&host),
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
