use super::RepositoryReport;
use super::common::{ResolutionClasses, ResolutionOutcome};
use crate::Result;
use crate::facts::{Mode, StatsOutcome, TagFamily};
use core::fmt::Write;
use serde_json::{Map, Value, json};

pub fn generate<W: Write>(reports: &[RepositoryReport], classes: &ResolutionClasses, writer: &mut W) -> Result<()> {
    let window = reports.first().map(|r| r.window);

    let repositories: Vec<Value> = reports
        .iter()
        .map(|report| {
            json!({
                "repository": report.repository,
                "issues_page": report.issues_page.as_str(),
                "closed": report.closed.as_ref().map(|o| outcome_to_json(o, classes)),
                "open": report.open.as_ref().map(|o| outcome_to_json(o, classes)),
            })
        })
        .collect();

    let output = json!({
        "since": window.map(|w| w.since().to_rfc3339()),
        "till": window.map(|w| w.till().to_rfc3339()),
        "repositories": repositories,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
fn outcome_to_json(outcome: &StatsOutcome, classes: &ResolutionClasses) -> Value {
    let stats = &outcome.stats;
    let mut obj = Map::new();

    obj.insert("total".to_string(), json!(stats.total));
    obj.insert("closed".to_string(), json!(stats.closed_count));

    if stats.mode == Mode::Closed {
        obj.insert(
            "time_to_close".to_string(),
            json!({
                "max": stats.max_ttc,
                "min": stats.min_ttc,
                "avg": stats.avg_ttc,
                "median": stats.median_ttc,
            }),
        );
    }

    obj.insert("resolution".to_string(), json!(stats.resolution_counts));

    let split = classes.split(&stats.resolution_counts);
    obj.insert(
        "resolution_outcome".to_string(),
        json!({
            "positive": split.total(ResolutionOutcome::Positive),
            "negative": split.total(ResolutionOutcome::Negative),
            "other": split.total(ResolutionOutcome::Other),
        }),
    );

    for family in [TagFamily::Gain, TagFamily::Trouble] {
        let counts: Map<String, Value> = stats
            .level_counts(family)
            .entries(family)
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), json!(count)))
            .collect();
        obj.insert(family.to_string(), Value::Object(counts));
    }

    obj.insert("ops".to_string(), json!(stats.ops_count));
    obj.insert("dev".to_string(), json!(stats.dev_count));
    obj.insert("pages_fetched".to_string(), json!(outcome.pages_fetched));
    obj.insert("skipped".to_string(), json!(outcome.skipped));
    obj.insert(
        "incomplete".to_string(),
        outcome.failure.as_ref().map_or(Value::Null, |failure| {
            json!({
                "url": failure.url,
                "reason": failure.cause.to_string(),
            })
        }),
    );

    Value::Object(obj)
}
