//! Command-line interface for the demo binary
//!
//! The `typeahead` binary attaches a controller to a single field of an
//! in-memory record and lets the user drive it in the terminal. Suggestions
//! come from a static list loaded from a file.
//!
//! # Item files
//!
//! - a JSON array of objects, used as-is
//! - anything else: one word per line, each turned into `{ <field>: <word> }`
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use typeahead::cli::Cli;
//!
//! let cli = Cli::parse_from(["typeahead", "--field", "city", "--min-chars", "2"]);
//! assert_eq!(cli.field, "city");
//! ```

use crate::config::AutocompleteConfig;
use crate::item::Item;
use crate::{Result, TypeaheadError};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Words offered when no item file is given
pub const SAMPLE_WORDS: &[&str] = &[
    "Amsterdam", "Athens", "Barcelona", "Bergen", "Berlin", "Bern", "Bratislava", "Brussels",
    "Bucharest", "Budapest", "Copenhagen", "Dublin", "Edinburgh", "Helsinki", "Lisbon",
    "Ljubljana", "London", "Madrid", "Oslo", "Paris", "Prague", "Reykjavik", "Riga", "Rome",
    "Stockholm", "Tallinn", "Vienna", "Vilnius", "Warsaw", "Zagreb",
];

/// Autocomplete a form field in the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "typeahead", version, about)]
pub struct Cli {
    /// File with suggestion items (JSON array or one word per line)
    #[arg(short = 'i', long = "items", value_name = "FILE")]
    pub items: Option<PathBuf>,

    /// Name of the bound field
    #[arg(short = 'f', long = "field", default_value = "name")]
    pub field: String,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum characters before a search is issued
    #[arg(long = "min-chars")]
    pub min_chars: Option<usize>,

    /// Only accept values from the suggestion list
    #[arg(long = "forced-choice")]
    pub forced_choice: bool,

    /// Copy every field of the chosen item into the record
    #[arg(long = "update-record")]
    pub update_record: bool,

    /// Simulated search latency in milliseconds
    #[arg(long = "latency-ms", default_value_t = 0)]
    pub latency_ms: u64,

    /// Write logs to this file (the terminal is in use by the UI)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Simulated search latency
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Load the configuration file and apply command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn autocomplete_config(&self) -> Result<AutocompleteConfig> {
        let mut config = match &self.config {
            Some(path) => AutocompleteConfig::load_from(path)?,
            None => AutocompleteConfig::load()?,
        };

        if let Some(min_chars) = self.min_chars {
            config = config.with_min_chars(min_chars);
        }
        if self.forced_choice {
            config = config.with_forced_choice(true);
        }
        if self.update_record {
            config = config.with_update_form_group(true);
        }

        Ok(config)
    }

    /// Suggestion items from `--items`, or the sample list
    ///
    /// # Errors
    ///
    /// Returns an error if the item file cannot be read or holds a JSON array
    /// with non-object entries.
    pub fn load_items(&self) -> Result<Vec<Item>> {
        match &self.items {
            Some(path) => load_items(path, &self.field),
            None => Ok(words_to_items(SAMPLE_WORDS.iter().copied(), &self.field)),
        }
    }
}

/// Load suggestion items from a file
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds a JSON array with
/// non-object entries.
pub fn load_items(path: &Path, field: &str) -> Result<Vec<Item>> {
    let text = fs::read_to_string(path)?;
    parse_items(&text, field)
}

/// Parse item file contents
///
/// # Errors
///
/// Returns `TypeaheadError::InvalidInput` if the text is a JSON array with
/// entries that are not objects.
pub fn parse_items(text: &str, field: &str) -> Result<Vec<Item>> {
    if text.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(text)?;
        return values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(map) => Ok(Item::from(map)),
                other => Err(TypeaheadError::InvalidInput(format!(
                    "item {index} is not an object: {other}"
                ))),
            })
            .collect();
    }

    Ok(words_to_items(text.lines(), field))
}

fn words_to_items<'a>(words: impl Iterator<Item = &'a str>, field: &str) -> Vec<Item> {
    words
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(|word| Item::with_field(field, word))
        .collect()
}
