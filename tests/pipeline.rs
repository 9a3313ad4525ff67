use chrono::NaiveDate;
use timesheet_tools::aggregate::{aggregate, hyperlink_formula};
use timesheet_tools::extract::{
    clean_snippet, entries_from_feed, entries_from_issues, plain_text, split_title,
};
use timesheet_tools::model::{
    BodyNode, Comment, CommentBody, FeedItem, RawIssue, ReportingWindow, WorkEntry,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn may_2024() -> ReportingWindow {
    ReportingWindow::new(day(2024, 5, 1), day(2024, 6, 1))
}

fn comment_on(date: NaiveDate) -> Comment {
    Comment {
        author_account_id: Some("a1".to_string()),
        author_display_name: Some("Alice".to_string()),
        body: Some(CommentBody::Plain("worked on it".to_string())),
        created: Some(date),
    }
}

#[test]
fn in_window_comment_yields_one_entry() {
    let issue = RawIssue {
        key: "PROJ-1".to_string(),
        summary: "Fix bug".to_string(),
        updated: Some(day(2024, 5, 20)),
        comments: vec![comment_on(day(2024, 5, 15))],
    };

    let entries = entries_from_issues(&[issue], &may_2024(), 1.5);

    assert_eq!(
        entries,
        vec![WorkEntry {
            date: day(2024, 5, 15),
            hours: 1.5,
            ticket: "PROJ-1".to_string(),
            description: "Fix bug".to_string(),
        }]
    );
}

#[test]
fn out_of_window_comments_yield_nothing() {
    let issue = RawIssue {
        key: "PROJ-1".to_string(),
        summary: "Fix bug".to_string(),
        updated: Some(day(2024, 5, 20)),
        comments: vec![comment_on(day(2024, 4, 30)), comment_on(day(2024, 6, 1))],
    };

    let entries = entries_from_issues(&[issue], &may_2024(), 1.5);

    assert!(entries.is_empty());
}

#[test]
fn comment_without_created_date_is_skipped() {
    let mut comment = comment_on(day(2024, 5, 15));
    comment.created = None;
    let issue = RawIssue {
        key: "PROJ-1".to_string(),
        summary: "Fix bug".to_string(),
        updated: None,
        comments: vec![comment],
    };

    assert!(entries_from_issues(&[issue], &may_2024(), 1.5).is_empty());
}

#[test]
fn issue_without_comments_falls_back_to_updated_day() {
    let issue = RawIssue {
        key: "PROJ-3".to_string(),
        summary: "Ship release".to_string(),
        updated: Some(day(2024, 5, 7)),
        comments: Vec::new(),
    };

    let entries = entries_from_issues(&[issue], &may_2024(), 1.5);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date, day(2024, 5, 7));
    assert_eq!(entries[0].description, "Ship release");
}

#[test]
fn fallback_entry_outside_window_is_dropped() {
    let issue = RawIssue {
        key: "PROJ-3".to_string(),
        summary: "Ship release".to_string(),
        updated: Some(day(2024, 7, 2)),
        comments: Vec::new(),
    };

    assert!(entries_from_issues(&[issue], &may_2024(), 1.5).is_empty());
}

#[test]
fn aggregation_sums_grouped_hours_and_sorts_by_key() {
    let entry = |date, ticket: &str| WorkEntry {
        date,
        hours: 1.5,
        ticket: ticket.to_string(),
        description: "work".to_string(),
    };
    let entries = vec![
        entry(day(2024, 5, 16), "PROJ-9"),
        entry(day(2024, 5, 15), "PROJ-1"),
        entry(day(2024, 5, 15), "PROJ-1"),
    ];

    let rows = aggregate(&entries, "example");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, day(2024, 5, 15));
    assert_eq!(rows[0].ticket, "PROJ-1");
    assert_eq!(rows[0].hours, 3.0);
    assert_eq!(rows[1].ticket, "PROJ-9");
    assert_eq!(rows[1].hours, 1.5);
}

#[test]
fn aggregation_is_idempotent() {
    let entries = vec![
        WorkEntry {
            date: day(2024, 5, 15),
            hours: 1.5,
            ticket: "PROJ-1".to_string(),
            description: "Fix bug".to_string(),
        },
        WorkEntry {
            date: day(2024, 5, 15),
            hours: 1.5,
            ticket: "PROJ-1".to_string(),
            description: "Fix bug".to_string(),
        },
    ];

    let first = aggregate(&entries, "example");
    let second = aggregate(&entries, "example");

    assert_eq!(first, second);
}

#[test]
fn hyperlink_formula_is_empty_iff_key_is_empty() {
    assert_eq!(hyperlink_formula("example", ""), "");
    assert_eq!(
        hyperlink_formula("example", "PROJ-1"),
        "=HYPERLINK(\"https://example.atlassian.net/browse/PROJ-1\", \"PROJ-1\")"
    );
}

#[test]
fn bracketed_description_supplies_ticket_and_cleaned_text() {
    let items = vec![FeedItem {
        title: "PROJ-2 - Refactor module".to_string(),
        description: "[PROJ-2] Refactor module cleanup".to_string(),
        date: day(2024, 5, 15),
    }];

    let entries = entries_from_feed(&items, 1.5);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].ticket, "PROJ-2");
    assert_eq!(entries[0].description, "Refactor module cleanup");
}

#[test]
fn unbracketed_description_falls_back_to_title_key() {
    let items = vec![FeedItem {
        title: "PROJ-4 - Update docs".to_string(),
        description: "Update docs for the new flow".to_string(),
        date: day(2024, 5, 16),
    }];

    let entries = entries_from_feed(&items, 1.5);

    assert_eq!(entries[0].ticket, "PROJ-4");
    assert_eq!(entries[0].description, "Update docs for the new flow");
}

#[test]
fn title_without_hyphen_is_used_whole_as_key() {
    assert_eq!(
        split_title("maintenance"),
        ("maintenance".to_string(), String::new())
    );
    assert_eq!(
        split_title("PROJ-2 - Refactor module"),
        ("PROJ-2".to_string(), "- Refactor module".to_string())
    );
}

#[test]
fn previous_month_window_spans_first_to_first() {
    let window = ReportingWindow::previous_month(day(2024, 6, 12));
    assert_eq!(window.start, day(2024, 5, 1));
    assert_eq!(window.end, day(2024, 6, 1));
    assert!(window.contains(day(2024, 5, 31)));
    assert!(!window.contains(day(2024, 6, 1)));
}

#[test]
fn previous_month_window_wraps_january() {
    let window = ReportingWindow::previous_month(day(2025, 1, 3));
    assert_eq!(window.start, day(2024, 12, 1));
    assert_eq!(window.end, day(2025, 1, 1));
}

#[test]
fn snippet_truncates_and_flattens_newlines() {
    let text = "line one\nline two\r\nand quite a bit more text to push this well past sixty characters";
    let snippet = clean_snippet(text);

    assert_eq!(snippet.chars().count(), 60);
    assert!(!snippet.contains('\n'));
    assert!(snippet.starts_with("line one line two"));
}

#[test]
fn rich_text_extraction_concatenates_nested_text() {
    let body: CommentBody = serde_json::from_value(serde_json::json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [
                    {"type": "text", "text": "Investigated "},
                    {"type": "text", "text": "the report"}
                ]
            },
            {"type": "rule"},
            {
                "type": "paragraph",
                "content": [{"type": "text", "text": " and filed a fix"}]
            }
        ]
    }))
    .expect("body deserializes");

    assert_eq!(plain_text(&body), "Investigated the report and filed a fix");
}

#[test]
fn plain_string_body_passes_through() {
    let body: CommentBody =
        serde_json::from_value(serde_json::json!("just a plain comment")).expect("body deserializes");
    assert_eq!(plain_text(&body), "just a plain comment");
}

#[test]
fn deeply_nested_body_does_not_overflow() {
    let mut node = BodyNode::Text {
        text: "leaf".to_string(),
    };
    for _ in 0..4_000 {
        node = BodyNode::Container {
            content: vec![node],
        };
    }

    assert_eq!(plain_text(&CommentBody::Rich(node)), "leaf");
}
