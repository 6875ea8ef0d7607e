//! Attach-time configuration for an autocomplete controller
//!
//! Configuration is immutable for the lifetime of a controller. It can be
//! built in code with the `with_*` builder methods or loaded from a TOML file
//! (by default `~/.config/typeahead/config.toml` on Linux), with
//! `TYPEAHEAD_*` environment variables taking precedence over the file.
//!
//! ```toml
//! min_chars = 3
//! forced_choice = true
//! source_field = "name"
//! list_size = "medium"
//! text_transform = "uppercase"
//!
//! [errors]
//! item_not_exist = "Pick a city from the list"
//! ```

mod warnings;

pub use warnings::ConfigWarning;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wait for input silence before a query is issued
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Default delay between losing focus and tearing the overlay down
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(200);

/// Default message for the `itemNotExist` validation error
pub const DEFAULT_ITEM_NOT_EXIST: &str = "Item not exist";

/// Height class of the suggestion overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSize {
    /// Compact list
    #[default]
    Default,
    /// Taller list
    Medium,
}

impl ListSize {
    /// Maximum number of item rows shown at once
    #[must_use]
    pub const fn visible_rows(self) -> usize {
        match self {
            Self::Default => 5,
            Self::Medium => 10,
        }
    }
}

/// Casing applied to item labels when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Labels rendered as returned by the source
    #[default]
    None,
    /// Labels rendered in upper case
    Uppercase,
    /// Labels rendered in lower case
    Lowercase,
}

impl TextTransform {
    /// Apply the transform to a label
    #[must_use]
    pub fn apply(self, label: &str) -> String {
        match self {
            Self::None => label.to_string(),
            Self::Uppercase => label.to_uppercase(),
            Self::Lowercase => label.to_lowercase(),
        }
    }
}

/// Validation messages surfaced on the bound field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessages {
    /// Message used when forced choice cannot resolve an item
    pub item_not_exist: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            item_not_exist: DEFAULT_ITEM_NOT_EXIST.to_string(),
        }
    }
}

/// Timer settings, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Input silence required before querying
    pub debounce_ms: u64,
    /// Delay between blur and overlay teardown
    pub blur_grace_ms: u64,
}

impl Timings {
    /// Debounce window as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Blur grace window as a `Duration`
    #[must_use]
    pub const fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

impl Default for Timings {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            blur_grace_ms: DEFAULT_BLUR_GRACE.as_millis() as u64,
        }
    }
}

/// Autocomplete configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Minimum number of characters before a query is issued
    pub min_chars: usize,

    /// Require the final value to match a suggested item
    pub forced_choice: bool,

    /// Commit the whole item into the bound record instead of one field
    pub update_form_group: bool,

    /// Item field used for display and commit (defaults to the bound field name)
    pub source_field: Option<String>,

    /// Overlay height class
    pub list_size: ListSize,

    /// Label casing
    pub text_transform: TextTransform,

    /// Optional action button shown under the suggestions
    pub button_name: Option<String>,

    /// Navigation target of the action button
    pub button_link: Option<String>,

    /// Validation messages
    pub errors: ErrorMessages,

    /// Debounce and blur timers
    pub timings: Timings,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            min_chars: 1,
            forced_choice: false,
            update_form_group: false,
            source_field: None,
            list_size: ListSize::default(),
            text_transform: TextTransform::default(),
            button_name: None,
            button_link: None,
            errors: ErrorMessages::default(),
            timings: Timings::default(),
        }
    }
}

impl AutocompleteConfig {
    /// Set the minimum query length
    #[must_use]
    pub const fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Enable or disable forced choice
    #[must_use]
    pub const fn with_forced_choice(mut self, forced: bool) -> Self {
        self.forced_choice = forced;
        self
    }

    /// Enable or disable whole-record commits
    #[must_use]
    pub const fn with_update_form_group(mut self, update: bool) -> Self {
        self.update_form_group = update;
        self
    }

    /// Set the item field used for display and commit
    #[must_use]
    pub fn with_source_field(mut self, field: impl Into<String>) -> Self {
        self.source_field = Some(field.into());
        self
    }

    /// Set overlay height class
    #[must_use]
    pub const fn with_list_size(mut self, size: ListSize) -> Self {
        self.list_size = size;
        self
    }

    /// Set label casing
    #[must_use]
    pub const fn with_text_transform(mut self, transform: TextTransform) -> Self {
        self.text_transform = transform;
        self
    }

    /// Add an action button with an optional navigation target
    #[must_use]
    pub fn with_button(mut self, name: impl Into<String>, link: Option<String>) -> Self {
        self.button_name = Some(name.into());
        self.button_link = link;
        self
    }

    /// Override the `itemNotExist` message
    #[must_use]
    pub fn with_item_not_exist(mut self, message: impl Into<String>) -> Self {
        self.errors.item_not_exist = message.into();
        self
    }

    /// Override debounce and blur timers
    #[must_use]
    pub const fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Source field to use for a controller bound to `field_name`
    #[must_use]
    pub fn resolve_source_field(&self, field_name: &str) -> String {
        self.source_field
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(field_name)
            .to_string()
    }

    /// Diagnose non-fatal configuration problems
    ///
    /// Warnings never block operation; the controller logs them on attach.
    #[must_use]
    pub fn warnings(&self, field_name: &str) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.resolve_source_field(field_name).is_empty() {
            warnings.push(ConfigWarning::MissingSourceField);
        }

        if let Some(name) = self.button_name.as_deref()
            && !name.is_empty()
            && self.button_link.is_none()
        {
            warnings.push(ConfigWarning::ButtonWithoutLink(name.to_string()));
        }

        warnings
    }

    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("typeahead").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults (still subject to environment
    /// overrides).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed,
    /// or if an environment override has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("TYPEAHEAD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.min_chars, 1);
        assert!(!config.forced_choice);
        assert!(!config.update_form_group);
        assert_eq!(config.errors.item_not_exist, "Item not exist");
        assert_eq!(config.timings.debounce(), Duration::from_millis(200));
        assert_eq!(config.timings.blur_grace(), Duration::from_millis(200));
    }

    #[test]
    fn test_source_field_defaults_to_bound_field() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.resolve_source_field("city"), "city");

        let config = config.with_source_field("label");
        assert_eq!(config.resolve_source_field("city"), "label");
    }

    #[test]
    fn test_empty_source_field_falls_back() {
        let config = AutocompleteConfig::default().with_source_field("");
        assert_eq!(config.resolve_source_field("city"), "city");
    }

    #[test]
    fn test_warnings_for_missing_display_field() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.warnings(""), vec![ConfigWarning::MissingSourceField]);
        assert!(config.warnings("city").is_empty());
    }

    #[test]
    fn test_warnings_for_button_without_link() {
        let config = AutocompleteConfig::default().with_button("Add new", None);
        assert_eq!(
            config.warnings("city"),
            vec![ConfigWarning::ButtonWithoutLink("Add new".to_string())]
        );
        assert_eq!(
            config.warnings("city")[0].to_string(),
            "no link for button 'Add new'"
        );

        let config =
            AutocompleteConfig::default().with_button("Add new", Some("/cities/new".into()));
        assert!(config.warnings("city").is_empty());

        let config = AutocompleteConfig::default().with_button("", None);
        assert!(config.warnings("city").is_empty());
    }

    #[test]
    fn test_text_transform() {
        assert_eq!(TextTransform::Uppercase.apply("Oslo"), "OSLO");
        assert_eq!(TextTransform::Lowercase.apply("Oslo"), "oslo");
        assert_eq!(TextTransform::None.apply("Oslo"), "Oslo");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
min_chars = 3
forced_choice = true
source_field = "name"
list_size = "medium"
text_transform = "uppercase"

[errors]
item_not_exist = "Pick a city"
"#,
        )
        .unwrap();

        let config = AutocompleteConfig::load_from(&path).unwrap();
        assert_eq!(config.min_chars, 3);
        assert!(config.forced_choice);
        assert!(!config.update_form_group);
        assert_eq!(config.source_field.as_deref(), Some("name"));
        assert_eq!(config.list_size, ListSize::Medium);
        assert_eq!(config.text_transform, TextTransform::Uppercase);
        assert_eq!(config.errors.item_not_exist, "Pick a city");
        assert_eq!(config.timings, Timings::default());
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AutocompleteConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AutocompleteConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AutocompleteConfig::default()
            .with_min_chars(2)
            .with_update_form_group(true)
            .with_button("Browse", Some("/browse".into()))
            .with_item_not_exist("Unknown value");
        config.save_to(&path).unwrap();

        let reloaded = AutocompleteConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }
}
