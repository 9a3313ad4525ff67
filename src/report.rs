use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::config::Settings;
use crate::error::{ReportError, Result};
use crate::extract::{entries_from_feed, entries_from_issues};
use crate::io::excel_write;
use crate::io::jira;
use crate::io::rss;
use crate::model::ReportingWindow;

/// Pulls the window's issues from the tracker and writes the timesheet.
///
/// A failed tracker request is recovered: it is logged and the pipeline
/// continues with an empty issue list, so the run still reports why nothing
/// was written. Returns the number of rows written, zero when the write was
/// skipped.
#[instrument(
    level = "info",
    skip_all,
    fields(window = %window, output = %output.display())
)]
pub fn pull_to_excel(settings: &Settings, window: &ReportingWindow, output: &Path) -> Result<usize> {
    let issues = match jira::fetch_issues(&settings.tracker, window) {
        Ok(issues) => issues,
        Err(error) => {
            warn!(%error, "tracker request failed; continuing with no issues");
            Vec::new()
        }
    };
    if issues.is_empty() {
        info!("the tracker returned no issues for the reporting window");
    }

    let entries = entries_from_issues(&issues, window, settings.report.hours_per_entry);
    info!(
        issue_count = issues.len(),
        entry_count = entries.len(),
        "extracted work entries"
    );
    let rows = aggregate(&entries, &settings.report.domain);
    debug!(row_count = rows.len(), "aggregated rows");

    write_or_skip(output, &rows)
}

/// Converts an RSS/XML export into the timesheet. Returns the number of rows
/// written, zero when the write was skipped.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn rss_to_excel(
    input: &Path,
    output: &Path,
    domain: &str,
    hours_per_entry: f64,
) -> Result<usize> {
    let items = rss::read_feed(input)?;
    info!(item_count = items.len(), "parsed feed items");

    let entries = entries_from_feed(&items, hours_per_entry);
    let rows = aggregate(&entries, domain);
    debug!(row_count = rows.len(), "aggregated rows");

    write_or_skip(output, &rows)
}

fn write_or_skip(output: &Path, rows: &[crate::model::AggregatedRow]) -> Result<usize> {
    match excel_write::write_timesheet(output, rows) {
        Ok(()) => {
            info!(row_count = rows.len(), "timesheet written");
            Ok(rows.len())
        }
        Err(ReportError::EmptyReport) => {
            info!("no work entries were derived; skipping the write");
            Ok(0)
        }
        Err(error) => Err(error),
    }
}
