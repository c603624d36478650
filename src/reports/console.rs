use super::RepositoryReport;
use super::common::{self, ResolutionClasses, ResolutionOutcome};
use crate::Result;
use crate::facts::{DATE_FORMAT, Mode, StatsOutcome, TagFamily};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(reports: &[RepositoryReport], classes: &ResolutionClasses, use_colors: bool, writer: &mut W) -> Result<()> {
    let mut first = true;

    for report in reports {
        for outcome in report.outcomes() {
            if !first {
                writeln!(writer)?;
                writeln!(writer, "═══════════════════════════════════════")?;
                writeln!(writer)?;
            }
            first = false;

            write_outcome(report, outcome, classes, use_colors, writer)?;
        }
    }

    Ok(())
}

fn write_outcome<W: Write>(
    report: &RepositoryReport,
    outcome: &StatsOutcome,
    classes: &ResolutionClasses,
    use_colors: bool,
    writer: &mut W,
) -> Result<()> {
    let stats = &outcome.stats;
    let window = &report.window;
    let header = match stats.mode {
        Mode::Closed => format!(
            "Closed issues of {} ({} - {})",
            report.repository,
            window.since().format(DATE_FORMAT),
            window.till().format(DATE_FORMAT)
        ),
        Mode::Open => format!(
            "Issues opened in {} ({} - {})",
            report.repository,
            window.since().format(DATE_FORMAT),
            window.till().format(DATE_FORMAT)
        ),
    };

    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    if let Some(failure) = &outcome.failure {
        let text = format!("Incomplete: stopped after {} page(s), {failure}", outcome.pages_fetched);
        if use_colors {
            writeln!(writer, "{}", text.yellow().bold())?;
        } else {
            writeln!(writer, "{text}")?;
        }
    }

    writeln!(writer, "Total number of retrieved issues: {}", stats.total)?;

    match stats.mode {
        Mode::Closed => {
            writeln!(writer)?;
            writeln!(writer, "Time to Close (days):")?;
            writeln!(writer, "* Maximum: {}", stats.max_ttc)?;
            writeln!(writer, "* Minimum: {}", stats.min_ttc)?;
            writeln!(writer, "* Average: {}", common::format_days(stats.avg_ttc))?;
            writeln!(writer, "* Median: {}", common::format_days(stats.median_ttc))?;
        }
        Mode::Open => {
            writeln!(writer, "Already closed: {}", stats.closed_count)?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Resolution:")?;
    for (label, count) in &stats.resolution_counts {
        writeln!(writer, "* {label}: {count}")?;
    }

    let split = classes.split(&stats.resolution_counts);
    writeln!(writer)?;
    writeln!(writer, "Resolution Outcome:")?;
    for kind in [ResolutionOutcome::Positive, ResolutionOutcome::Negative, ResolutionOutcome::Other] {
        let total = split.total(kind);
        if use_colors {
            match kind {
                ResolutionOutcome::Positive => writeln!(writer, "* {}: {total}", kind.green())?,
                ResolutionOutcome::Negative => writeln!(writer, "* {}: {total}", kind.red())?,
                ResolutionOutcome::Other => writeln!(writer, "* {kind}: {total}")?,
            }
        } else {
            writeln!(writer, "* {kind}: {total}")?;
        }
    }

    for family in [TagFamily::Gain, TagFamily::Trouble] {
        writeln!(writer)?;
        writeln!(writer, "{}:", common::family_title(family))?;
        for (tag, count) in stats.level_counts(family).entries(family) {
            writeln!(writer, "* {tag}: {count}")?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Ops: {}", stats.ops_count)?;
    writeln!(writer, "Dev: {}", stats.dev_count)?;

    Ok(())
}
