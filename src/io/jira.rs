use base64::{Engine, prelude::BASE64_STANDARD as base64};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::error::{ReportError, Result};
use crate::model::{Comment, CommentBody, RawIssue, ReportingWindow};

/// Page-size cap for the single search request.
const MAX_RESULTS: &str = "500";

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Deserialize, Debug)]
struct JiraIssue {
    key: String,
    fields: IssueFields,
}

#[derive(Deserialize, Debug)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    comment: Option<CommentPage>,
}

#[derive(Deserialize, Debug)]
struct CommentPage {
    #[serde(default)]
    comments: Vec<JiraComment>,
}

#[derive(Deserialize, Debug)]
struct JiraComment {
    #[serde(default)]
    author: Option<JiraAuthor>,
    #[serde(default)]
    body: Option<CommentBody>,
    #[serde(default)]
    created: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JiraAuthor {
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Myself {
    #[serde(default)]
    account_id: String,
}

/// Fetches the issues assigned to the current user that were updated inside
/// the reporting window, via a single search request.
pub fn fetch_issues(tracker: &TrackerConfig, window: &ReportingWindow) -> Result<Vec<RawIssue>> {
    let jql = format!(
        "assignee was currentUser() AND updated >= \"{}\" AND updated < \"{}\" ORDER BY updated DESC",
        window.start, window.end
    );
    let url = format!("{}/rest/api/3/search", tracker.base_url);
    debug!(%jql, "querying tracker");

    let mut response = ureq::get(&url)
        .header("Accept", "application/json")
        .header("Authorization", &basic_auth(tracker))
        .query("jql", &jql)
        .query("maxResults", MAX_RESULTS)
        .query("fields", "summary,updated,comment")
        .call()
        .map_err(|error| ReportError::Http(Box::new(error)))?;
    let search: SearchResponse = response
        .body_mut()
        .read_json()
        .map_err(|error| ReportError::Http(Box::new(error)))?;

    Ok(search.issues.into_iter().map(into_raw_issue).collect())
}

/// Looks up the account id behind the configured credentials. The
/// configuration is taken as an explicit parameter; nothing here reads
/// shared state.
pub fn fetch_account_id(tracker: &TrackerConfig) -> Result<String> {
    let url = format!("{}/rest/api/3/myself", tracker.base_url);
    let mut response = ureq::get(&url)
        .header("Accept", "application/json")
        .header("Authorization", &basic_auth(tracker))
        .call()
        .map_err(|error| ReportError::Http(Box::new(error)))?;
    let myself: Myself = response
        .body_mut()
        .read_json()
        .map_err(|error| ReportError::Http(Box::new(error)))?;
    Ok(myself.account_id)
}

fn basic_auth(tracker: &TrackerConfig) -> String {
    format!(
        "Basic {}",
        base64.encode(format!("{}:{}", tracker.email, tracker.api_token))
    )
}

fn into_raw_issue(issue: JiraIssue) -> RawIssue {
    let comments = issue
        .fields
        .comment
        .map(|page| page.comments.into_iter().map(into_comment).collect())
        .unwrap_or_default();
    RawIssue {
        key: issue.key,
        summary: issue.fields.summary,
        updated: issue.fields.updated.as_deref().and_then(day_of),
        comments,
    }
}

fn into_comment(comment: JiraComment) -> Comment {
    let (account_id, display_name) = match comment.author {
        Some(author) => (author.account_id, author.display_name),
        None => (None, None),
    };
    Comment {
        author_account_id: account_id,
        author_display_name: display_name,
        body: comment.body,
        created: comment.created.as_deref().and_then(day_of),
    }
}

/// Truncates a tracker timestamp like `2024-05-15T09:30:00.000+0000` to its
/// calendar day. Malformed timestamps yield `None`.
fn day_of(timestamp: &str) -> Option<NaiveDate> {
    let prefix = timestamp.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
