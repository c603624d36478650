//! Command dispatch logic for pagure-stats

use super::common::{CommonArgs, process};
use super::{InitArgs, init_config};
use crate::facts::Mode;
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "pagure-stats", version, author, long_about = None)]
#[command(about = "Issue statistics for Pagure-hosted trackers")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: StatsSubcommand,
}

#[derive(Subcommand, Debug)]
enum StatsSubcommand {
    /// Statistics of the issues closed within the time window
    Closed(Box<CommonArgs>),
    /// Statistics of the issues opened within the time window
    Open(Box<CommonArgs>),
    /// Closed and opened issue statistics side by side
    Report(Box<CommonArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        StatsSubcommand::Closed(args) => process(host, args, &[Mode::Closed]).await,
        StatsSubcommand::Open(args) => process(host, args, &[Mode::Open]).await,
        StatsSubcommand::Report(args) => process(host, args, &[Mode::Closed, Mode::Open]).await,
        StatsSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
