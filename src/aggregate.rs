use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{AggregatedRow, WorkEntry};

/// Groups work entries by `(date, ticket, description)` and sums the hours of
/// each group. Grouping subsumes duplicate removal, and the `BTreeMap` keys
/// keep the output deterministically sorted by the grouping key.
pub fn aggregate(entries: &[WorkEntry], domain: &str) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<(NaiveDate, String, String), f64> = BTreeMap::new();
    for entry in entries {
        let key = (entry.date, entry.ticket.clone(), entry.description.clone());
        *groups.entry(key).or_insert(0.0) += entry.hours;
    }

    groups
        .into_iter()
        .map(|((date, ticket, description), hours)| {
            let link = hyperlink_formula(domain, &ticket);
            AggregatedRow {
                date,
                ticket,
                description,
                hours,
                link,
            }
        })
        .collect()
}

/// Builds the spreadsheet hyperlink formula for a ticket key, or an empty
/// string when the key is empty.
pub fn hyperlink_formula(domain: &str, key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("=HYPERLINK(\"https://{domain}.atlassian.net/browse/{key}\", \"{key}\")")
    }
}
