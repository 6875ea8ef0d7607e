//! Typeahead - autocomplete controller for form-bound text inputs
//!
//! This library turns keystrokes on a text field into debounced searches,
//! shows the latest result in a keyboard-navigable overlay, and reconciles
//! the user's choice back into the field and its surrounding record.
//!
//! ```
//! use typeahead::{AutocompleteConfig, BoundField, FormRecord, InputController, Item, StaticSource};
//!
//! let record = FormRecord::with_fields(["city", "code"]);
//! let field = BoundField::new(record, "city")?;
//! let source = StaticSource::new(vec![Item::with_field("city", "Oslo")], "city");
//!
//! let mut controller = InputController::attach(AutocompleteConfig::default(), field, source);
//! controller.binding_mut().input("Os");
//! controller.on_value_change("Os");
//! # Ok::<(), typeahead::TypeaheadError>(())
//! ```

use thiserror::Error;

pub mod binding;
pub mod cli;
pub mod config;
pub mod controller;
pub mod item;
pub mod output;
pub mod overlay;
pub mod source;
#[cfg(feature = "tui")]
pub mod view;

#[cfg(test)]
pub mod testing;

pub use binding::{BoundField, FormBinding, FormRecord};
pub use config::AutocompleteConfig;
pub use controller::{AutocompleteEvent, Generation, InputController, Wake};
pub use item::Item;
pub use overlay::{KeyResponse, OverlayKey, OverlayState, OverlayView};
pub use source::{SearchSource, StaticSource};

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum TypeaheadError {
    /// Form binding error
    #[error("Form error: {0}")]
    FormError(#[from] binding::FormError),
    /// Search source error
    #[error("Source error: {0}")]
    SourceError(#[from] source::SourceError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Malformed JSON input
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, TypeaheadError>;
