//! Presentation: render index build outcomes as text tables or JSON.

use crate::error::IndexError;
use crate::route::IndexRecord;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// Result of indexing one content item document
#[derive(Debug, Serialize)]
pub struct IndexOutcome {
    pub content_item_id: String,
    /// `None` when the item is not subject to routing
    pub records: Option<Vec<IndexRecord>>,
    /// The removed marker was cleared during the build
    pub removed_cleared: bool,
    /// The document was rewritten with the cleared marker
    pub written_back: bool,
}

fn flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub fn format_index_text(outcome: &IndexOutcome) -> String {
    let Some(records) = &outcome.records else {
        return format!(
            "Content item {} is not indexed (no routing, or neither published nor latest)",
            outcome.content_item_id
        );
    };

    let mut out = format!(
        "Route index for {} ({} records)\n\n",
        outcome.content_item_id,
        records.len()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Contained item", "Locator", "Published", "Latest"]);
    for record in records {
        table.add_row(vec![
            record.path.clone().unwrap_or_else(|| "-".to_string()),
            record
                .contained_content_item_id
                .clone()
                .unwrap_or_else(|| "(self)".to_string()),
            record.node_locator.clone().unwrap_or_default(),
            flag(record.published).to_string(),
            flag(record.latest).to_string(),
        ]);
    }
    out.push_str(&table.to_string());

    if outcome.removed_cleared {
        out.push_str("\n\nRemoved marker cleared");
        if outcome.written_back {
            out.push_str(" and written back");
        }
    }
    out
}

pub fn format_index_json(outcome: &IndexOutcome) -> Result<String, IndexError> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
