use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{BodyNode, Comment, CommentBody, FeedItem, RawIssue, ReportingWindow, WorkEntry};

/// Longest description snippet carried into diagnostics.
const SNIPPET_LIMIT: usize = 60;

/// Matches a bracketed ticket-key prefix like `[PROJ-2] Refactor module`.
static BRACKETED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]\s*(.*)").expect("pattern compiles"));

/// Derives work entries from issues fetched over the REST API.
///
/// One entry is emitted per comment created inside the reporting window,
/// carrying the issue summary as its description. An issue without any
/// comments falls back to a single entry dated at its updated-day, provided
/// that day is inside the window. An issue whose comments all fall outside
/// the window yields nothing.
pub fn entries_from_issues(
    issues: &[RawIssue],
    window: &ReportingWindow,
    hours_per_entry: f64,
) -> Vec<WorkEntry> {
    let mut entries = Vec::new();
    for issue in issues {
        for comment in &issue.comments {
            let Some(created) = comment.created else {
                continue;
            };
            if !window.contains(created) {
                continue;
            }
            log_comment(issue, comment);
            entries.push(WorkEntry {
                date: created,
                hours: hours_per_entry,
                ticket: issue.key.clone(),
                description: issue.summary.clone(),
            });
        }
        if issue.comments.is_empty() {
            if let Some(updated) = issue.updated {
                if window.contains(updated) {
                    entries.push(WorkEntry {
                        date: updated,
                        hours: hours_per_entry,
                        ticket: issue.key.clone(),
                        description: issue.summary.clone(),
                    });
                }
            }
        }
    }
    entries
}

fn log_comment(issue: &RawIssue, comment: &Comment) {
    let snippet = comment
        .body
        .as_ref()
        .map(|body| clean_snippet(&plain_text(body)))
        .unwrap_or_default();
    let author = comment.author_display_name.as_deref().unwrap_or("unknown");
    debug!(ticket = %issue.key, %author, %snippet, "comment counted");
}

/// Derives work entries from feed items.
///
/// The ticket key and description come from the bracketed prefix of the item
/// description when present; otherwise the title heuristic supplies the key
/// and the raw description is kept.
pub fn entries_from_feed(items: &[FeedItem], hours_per_entry: f64) -> Vec<WorkEntry> {
    items
        .iter()
        .map(|item| {
            let (ticket, description) = match bracketed_key(&item.description) {
                Some(parts) => parts,
                None => (split_title(&item.title).0, item.description.clone()),
            };
            WorkEntry {
                date: item.date,
                hours: hours_per_entry,
                ticket,
                description,
            }
        })
        .collect()
}

/// Splits a feed title into ticket key and summary: when the title contains a
/// hyphen, the first whitespace-delimited token is the key and the remainder
/// the summary; otherwise the whole title is the key.
pub fn split_title(title: &str) -> (String, String) {
    if title.contains('-') {
        match title.split_once(' ') {
            Some((key, rest)) => (key.to_string(), rest.to_string()),
            None => (title.to_string(), String::new()),
        }
    } else {
        (title.to_string(), String::new())
    }
}

/// Extracts `(key, cleaned description)` from a `[KEY] description` prefix.
pub fn bracketed_key(description: &str) -> Option<(String, String)> {
    let captures = BRACKETED_KEY.captures(description)?;
    Some((captures[1].to_string(), captures[2].to_string()))
}

/// Recovers plain text from a comment body.
///
/// Rich bodies are walked with an explicit stack rather than recursion, so a
/// deeply nested document cannot overflow the call stack. Text fragments are
/// concatenated in document order.
pub fn plain_text(body: &CommentBody) -> String {
    match body {
        CommentBody::Plain(text) => text.clone(),
        CommentBody::Rich(root) => {
            let mut out = String::new();
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                match node {
                    BodyNode::Text { text } => out.push_str(text),
                    BodyNode::Container { content } => stack.extend(content.iter().rev()),
                }
            }
            out
        }
    }
}

/// Truncates text to the snippet limit on a character boundary and flattens
/// newlines into spaces.
pub fn clean_snippet(text: &str) -> String {
    text.chars()
        .take(SNIPPET_LIMIT)
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect()
}
