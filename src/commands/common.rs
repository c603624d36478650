//! Processing shared by the statistics commands.

use super::config::Config;
use super::progress_reporter::{ProgressFetcher, ProgressReporter};
use super::Host;
use crate::Result;
use crate::facts::{Client, Mode, PageFetcher, TimeWindow, aggregate_mode, issues_url, parse_base_url, repository_issues_page};
use crate::reports::{RepositoryReport, ResolutionClasses, generate_console, generate_csv, generate_json, generate_xlsx};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::{IsTerminal, Write, stderr, stdout};
use url::Url;

const LOG_TARGET: &str = "   commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    fn use_colors(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by the `closed`, `open` and `report` commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Repositories to analyze, e.g. `infra/tickets` or `fork/user/project`
    #[arg(value_name = "REPOSITORY", required = true)]
    pub repositories: Vec<String>,

    /// Length of the time window in days (default comes from the configuration)
    #[arg(long, short = 'd', value_name = "DAYS", value_parser = clap::value_parser!(i64).range(1..))]
    pub days_ago: Option<i64>,

    /// Last day of the time window, as DD.MM.YYYY (default is now)
    #[arg(long, short = 't', value_name = "DATE")]
    pub till: Option<String>,

    /// Path to configuration file (default is `pagure-stats.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Root URL of the Pagure instance, overriding the configuration
    #[arg(long, value_name = "URL", env = "PAGURE_URL")]
    pub base_url: Option<String>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Output statistics to the console; this is the default when no other report is requested
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Output statistics to an Excel spreadsheet file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Output statistics to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output statistics to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Exit with status code 1 if any collection stopped before its last page
    #[arg(long)]
    pub error_if_incomplete: bool,
}

/// Collect statistics for `modes` of every repository in `args`, then write the requested reports.
///
/// # Errors
///
/// Returns an error if the configuration or arguments are invalid, or a report cannot be written.
pub async fn process<H: Host>(host: &mut H, args: &CommonArgs, modes: &[Mode]) -> Result<()> {
    init_logging(args.log_level);

    let cwd = std::env::current_dir().into_app_err("determining the current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|p| app_err!("current directory '{}' is not valid UTF-8", p.display()))?;
    let config = Config::load(&cwd, args.config.as_ref())?;

    let base_url = parse_base_url(args.base_url.as_deref().unwrap_or(&config.base_url))?;
    let till = match &args.till {
        Some(text) => TimeWindow::parse_day(text)?,
        None => Utc::now(),
    };
    let window = TimeWindow::ending_at(till, args.days_ago.unwrap_or(config.days_ago))?;

    let progress = if args.log_level == LogLevel::None {
        ProgressReporter::new(Duration::from_millis(300), args.color.use_colors(|| stderr().is_terminal()))
    } else {
        ProgressReporter::disabled()
    };

    let client = Client::new()?;
    let plan = CollectionPlan {
        base_url: &base_url,
        per_page: config.per_page,
        window,
        modes,
    };

    let mut reports = Vec::with_capacity(args.repositories.len());
    for repository in &args.repositories {
        reports.push(plan.repository(&client, &progress, repository).await?);
    }
    progress.finish();

    let output = ReportOutput {
        classes: config.resolution_classes(),
        color: args.color,
        console: args.console,
        excel: args.excel.clone(),
        csv: args.csv.clone(),
        json: args.json.clone(),
    };
    output.write(host, &reports)?;

    if warn_incomplete(host, &reports) && args.error_if_incomplete {
        host.exit(1);
    }

    Ok(())
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when running in-process more than once
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// What to collect for each repository.
struct CollectionPlan<'a> {
    base_url: &'a Url,
    per_page: Option<u8>,
    window: TimeWindow,
    modes: &'a [Mode],
}

impl CollectionPlan<'_> {
    async fn repository<F: PageFetcher + Sync>(&self, fetcher: &F, progress: &ProgressReporter, repository: &str) -> Result<RepositoryReport> {
        let issues_page = repository_issues_page(self.base_url, repository)?;
        let mut report = RepositoryReport::new(repository.to_string(), issues_page, self.window);

        for &mode in self.modes {
            let start_url = issues_url(self.base_url, repository, mode, self.window.since(), self.per_page)?;
            log::info!(target: LOG_TARGET, "Collecting {mode} issues of '{repository}' from '{start_url}'");

            progress.set_phase(match mode {
                Mode::Closed => "Closed",
                Mode::Open => "Opened",
            });
            let fetcher = ProgressFetcher::new(fetcher, progress, repository.to_string());
            let outcome = aggregate_mode(&fetcher, start_url.as_str(), mode, &self.window).await;

            match mode {
                Mode::Closed => report.closed = Some(outcome),
                Mode::Open => report.open = Some(outcome),
            }
        }

        Ok(report)
    }
}

/// Where and how reports are written.
struct ReportOutput {
    classes: ResolutionClasses,
    color: ColorMode,
    console: bool,
    excel: Option<Utf8PathBuf>,
    csv: Option<Utf8PathBuf>,
    json: Option<Utf8PathBuf>,
}

impl ReportOutput {
    fn write<H: Host>(&self, host: &mut H, reports: &[RepositoryReport]) -> Result<()> {
        let generating_reports = self.excel.is_some() || self.csv.is_some() || self.json.is_some();

        if self.console || !generating_reports {
            let mut console_output = String::new();
            let use_colors = self.color.use_colors(|| stdout().is_terminal());
            generate_console(reports, &self.classes, use_colors, &mut console_output)?;
            let _ = write!(host.output(), "{console_output}");
        }

        if let Some(filename) = &self.excel {
            let mut file = fs::File::create(filename).into_app_err_with(|| format!("creating '{filename}'"))?;
            generate_xlsx(reports, &self.classes, &mut file)?;
        }

        if let Some(filename) = &self.csv {
            let mut csv_output = String::new();
            generate_csv(reports, &self.classes, &mut csv_output)?;
            fs::write(filename, csv_output).into_app_err_with(|| format!("writing '{filename}'"))?;
        }

        if let Some(filename) = &self.json {
            let mut json_output = String::new();
            generate_json(reports, &self.classes, &mut json_output)?;
            fs::write(filename, json_output).into_app_err_with(|| format!("writing '{filename}'"))?;
        }

        Ok(())
    }
}

/// Tell the user about every collection that stopped early. Returns whether there was any.
fn warn_incomplete<H: Host>(host: &mut H, reports: &[RepositoryReport]) -> bool {
    let mut incomplete = false;

    for report in reports.iter().filter(|report| !report.is_complete()) {
        for outcome in report.outcomes() {
            if let Some(failure) = &outcome.failure {
                let _ = writeln!(
                    host.error(),
                    "warning: {} statistics of '{}' are incomplete, fetching stopped at {}",
                    outcome.mode(),
                    report.repository,
                    failure
                );
                incomplete = true;
            }
        }
    }

    incomplete
}
