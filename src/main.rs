//! Issue statistics for Pagure-hosted trackers.
//!
//! ```bash
//! pagure-stats closed infra/tickets --days-ago 30
//! pagure-stats open infra/tickets --till 31.12.2021
//! pagure-stats report infra/tickets fedora-infra/ansible --excel stats.xlsx
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use pagure_stats::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that writes to the real standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
