//! Report generation for repository statistics
//!
//! Four generators turn a slice of [`RepositoryReport`] into an output format:
//! - **Console**: the plain-text layout of the command line tool, optionally colored
//! - **CSV**: one row per dotted metric name, one column per repository
//! - **JSON**: nested per-repository and per-mode documents
//! - **Excel**: a worksheet titled by the time window, one column block per repository
//!
//! Every generator also receives the [`ResolutionClasses`] used to tally positive and
//! negative resolutions, so that the statistics themselves stay free of configuration.

mod common;
mod console;
mod csv;
mod excel;
mod json;
mod repository_report;

pub use common::{ResolutionClasses, ResolutionOutcome};
pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;
pub use json::generate as generate_json;
pub use repository_report::RepositoryReport;
