use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

/// An issue as returned by the tracker, reduced to the fields the pipeline
/// consumes. Timestamps are truncated to their calendar-day prefix when the
/// wire payload is converted, so a malformed timestamp surfaces as `None`
/// rather than poisoning the run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawIssue {
    /// Tracker-assigned key, e.g. `PROJ-1`.
    pub key: String,
    /// Issue summary text.
    pub summary: String,
    /// Day the issue was last updated, when the tracker supplied one.
    pub updated: Option<NaiveDate>,
    /// Comments in the order the tracker returned them.
    pub comments: Vec<Comment>,
}

/// A single comment attached to an issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub author_account_id: Option<String>,
    pub author_display_name: Option<String>,
    pub body: Option<CommentBody>,
    /// Day the comment was created. Comments without one are skipped.
    pub created: Option<NaiveDate>,
}

/// A comment body as delivered on the wire. Older tracker API versions send a
/// plain string; newer ones send a structured document tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CommentBody {
    Plain(String),
    Rich(BodyNode),
}

/// One node of the tracker's structured rich-text document. A leaf carrying
/// text deserializes as [`BodyNode::Text`]; everything else degrades to a
/// container whose children may be empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BodyNode {
    Text {
        text: String,
    },
    Container {
        #[serde(default)]
        content: Vec<BodyNode>,
    },
}

/// One derived unit of work: a day spent on a ticket. Has no identity beyond
/// its field tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkEntry {
    pub date: NaiveDate,
    pub hours: f64,
    pub ticket: String,
    pub description: String,
}

/// One output spreadsheet row after grouping and summation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub date: NaiveDate,
    pub ticket: String,
    pub description: String,
    pub hours: f64,
    /// Hyperlink formula pointing at the tracker's issue-browse URL, or an
    /// empty string when the ticket key is empty.
    pub link: String,
}

/// One `item` element read from an RSS/XML export.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

/// Half-open reporting window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The previous calendar month relative to `today`: the first day of the
    /// prior month through the first day of the current month.
    pub fn previous_month(today: NaiveDate) -> Self {
        use chrono::Datelike;

        let (prev_year, prev_month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        // Day 1 exists in every month, so neither construction can fail.
        let start = NaiveDate::from_ymd_opt(prev_year, prev_month, 1).unwrap_or(today);
        let end = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
        Self { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

impl fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
