use super::RepositoryReport;
use super::common::{self, ResolutionClasses};
use crate::Result;
use core::fmt::Write;
use ohno::IntoAppError;
use std::collections::HashMap;

/// Write one row per metric and one column per repository.
///
/// Metrics that a repository does not have (e.g. a resolution label it never saw) are left
/// empty for that repository.
pub fn generate<W: Write>(reports: &[RepositoryReport], classes: &ResolutionClasses, writer: &mut W) -> Result<()> {
    let per_repository: Vec<HashMap<String, String>> = reports
        .iter()
        .map(|report| {
            report
                .outcomes()
                .flat_map(|outcome| common::outcome_metrics(outcome, classes))
                .map(|metric| (metric.name, metric.value.to_string()))
                .collect()
        })
        .collect();

    // Metric names in first-seen order across all repositories
    let mut names: Vec<String> = Vec::new();
    for report in reports {
        for outcome in report.outcomes() {
            for metric in common::outcome_metrics(outcome, classes) {
                if !names.contains(&metric.name) {
                    names.push(metric.name);
                }
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Metric"];
    header.extend(reports.iter().map(|r| r.repository.as_str()));
    csv_writer.write_record(&header)?;

    for name in &names {
        let mut record = vec![name.as_str()];
        record.extend(per_repository.iter().map(|metrics| metrics.get(name).map_or("", String::as_str)));
        csv_writer.write_record(&record)?;
    }

    let bytes = csv_writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    let text = String::from_utf8(bytes).into_app_err("CSV output is not valid UTF-8")?;
    write!(writer, "{text}")?;

    Ok(())
}
