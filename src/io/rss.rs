use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate};
use tracing::warn;
use xmltree::{Element, XMLNode};

use crate::error::Result;
use crate::model::FeedItem;

/// Reads every `item` element from an RSS/XML export.
///
/// Items missing a title or publish date, or whose publish date cannot be
/// parsed, are skipped with a warning. A well-formed document without any
/// items yields an empty list, mirroring an empty search response.
pub fn read_feed(path: &Path) -> Result<Vec<FeedItem>> {
    let file = File::open(path)?;
    let root = Element::parse(BufReader::new(file))?;

    let mut elements = Vec::new();
    collect_items(&root, &mut elements);
    if elements.is_empty() {
        warn!("feed contains no item elements");
    }

    let mut items = Vec::with_capacity(elements.len());
    for element in elements {
        let Some(title) = child_text(element, "title") else {
            warn!("skipping feed item without a title");
            continue;
        };
        let Some(raw_date) = child_text(element, "pubDate") else {
            warn!(%title, "skipping feed item without a publish date");
            continue;
        };
        let Some(date) = parse_pub_date(&raw_date) else {
            warn!(%title, %raw_date, "skipping feed item with malformed publish date");
            continue;
        };
        let description = child_text(element, "description").unwrap_or_default();
        items.push(FeedItem {
            title,
            description,
            date,
        });
    }
    Ok(items)
}

fn collect_items<'a>(element: &'a Element, items: &mut Vec<&'a Element>) {
    for child in &element.children {
        if let XMLNode::Element(child) = child {
            if child.name == "item" {
                items.push(child);
            } else {
                collect_items(child, items);
            }
        }
    }
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    let text = element.get_child(name).and_then(Element::get_text)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Feed exports carry RFC 2822 publish dates; some trackers emit RFC 3339.
fn parse_pub_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|timestamp| timestamp.date_naive())
        .ok()
}
