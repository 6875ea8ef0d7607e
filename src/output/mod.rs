//! Output formatting for CLI display
//!
//! Summaries printed by the demo binary once the terminal UI has exited.

use crate::Result;
use crate::binding::FormRecord;
use crate::controller::AutocompleteEvent;
use crate::item::Item;
use colored::Colorize;

/// Describe one controller event
#[must_use]
pub fn event_line(event: &AutocompleteEvent, field: &str) -> String {
    match event {
        AutocompleteEvent::Selection(Some(item)) => {
            format!("{} selected {}", "✓".green(), item_label(item, field))
        }
        AutocompleteEvent::Selection(None) => {
            format!("{} closed without a matching item", "-".yellow())
        }
        AutocompleteEvent::OverlayActive(true) => "overlay opened".dimmed().to_string(),
        AutocompleteEvent::OverlayActive(false) => "overlay closed".dimmed().to_string(),
    }
}

/// Text of `field` in `item`, or its JSON when the field has no text
#[must_use]
pub fn item_label(item: &Item, field: &str) -> String {
    item.text(field)
        .unwrap_or_else(|| serde_json::to_string(item).unwrap_or_default())
}

/// Validation errors of a record field, one line each
#[must_use]
pub fn error_lines(record: &FormRecord, field: &str) -> Vec<String> {
    record
        .field_errors(field)
        .into_iter()
        .map(|(key, message)| format!("{} {field}: {message} ({key})", "❌".red()))
        .collect()
}

/// The record as pretty-printed JSON
///
/// # Errors
///
/// Returns `TypeaheadError::JsonError` if the record cannot be serialized.
pub fn record_json(record: &FormRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(&record.to_value())?)
}
