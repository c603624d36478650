//! Command-line interface and orchestration for pagure-stats
//!
//! ## Commands
//!
//! - **closed**: statistics of the issues closed within the time window
//! - **open**: statistics of the issues opened within the time window
//! - **report**: both of the above, side by side
//! - **init**: generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate handler. The statistics commands all go through `common::process`:
//!
//! 1. Initialize logging and load the configuration
//! 2. Build the time window and the start URL of each repository
//! 3. Walk every repository's issue collection and aggregate it, per mode
//! 4. Generate the requested reports and flag incomplete collections
//!
//! Configuration is a TOML file holding the tracker URL, the default window length,
//! and the resolution labels counted as positive or negative outcomes.

mod common;
mod config;
mod host;
mod init;
mod progress_reporter;
mod run;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
