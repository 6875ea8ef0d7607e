//! In-memory form record
//!
//! Mirrors the parts of a reactive form group the controller consumes:
//! field values, per-field touched state, per-field validation errors,
//! and a record-level dirty flag.

use super::error::{FormError, Result};
use super::FormBinding;
use crate::item::Item;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// A record of named fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormRecord {
    fields: Map<String, Value>,
    #[serde(skip)]
    touched: BTreeSet<String>,
    #[serde(skip)]
    dirty: bool,
    #[serde(skip)]
    errors: BTreeMap<String, BTreeMap<String, String>>,
}

impl FormRecord {
    /// Create a record with the given field names, all null
    #[must_use]
    pub fn with_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names.into_iter().map(|n| (n.into(), Value::Null)).collect(),
            ..Self::default()
        }
    }

    /// Create a record from a JSON object
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotAnObject` if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                ..Self::default()
            }),
            other => Err(FormError::NotAnObject(json_kind(&other).to_string())),
        }
    }

    /// Raw value of a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Text of a field, empty for null or missing fields
    #[must_use]
    pub fn text(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Set a field programmatically (does not touch it)
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Record a user edit: sets the text, touches the field, dirties the record
    ///
    /// The edit re-validates the field, which drops its validation errors.
    pub fn input(&mut self, field: &str, text: impl Into<String>) {
        self.fields
            .insert(field.to_string(), Value::String(text.into()));
        self.touched.insert(field.to_string());
        self.errors.remove(field);
        self.dirty = true;
    }

    /// Whether the user has edited a field
    #[must_use]
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Whether the record has been modified by the user
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the record as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Validation error message for a field and key
    #[must_use]
    pub fn error(&self, field: &str, key: &str) -> Option<&str> {
        self.errors.get(field)?.get(key).map(String::as_str)
    }

    /// All validation errors of a field
    #[must_use]
    pub fn field_errors(&self, field: &str) -> Vec<(&str, &str)> {
        self.errors
            .get(field)
            .map(|errs| {
                errs.iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the record carries no validation errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(BTreeMap::is_empty)
    }

    /// Set a validation error on a field
    pub fn set_error(&mut self, field: &str, key: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .insert(key.to_string(), message.to_string());
    }

    /// Clear a validation error on a field
    pub fn clear_error(&mut self, field: &str, key: &str) {
        if let Some(errs) = self.errors.get_mut(field) {
            errs.remove(key);
            if errs.is_empty() {
                self.errors.remove(field);
            }
        }
    }

    /// Patch existing fields with the item's values
    ///
    /// Keys the record does not have are ignored. Returns how many fields
    /// were written.
    pub fn patch(&mut self, item: &Item) -> usize {
        let mut written = 0;
        for (key, value) in item.fields() {
            if let Some(slot) = self.fields.get_mut(key) {
                *slot = value.clone();
                written += 1;
            }
        }
        written
    }

    /// The record as a JSON object
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// One field of a [`FormRecord`], usable as a controller binding
#[derive(Debug, Clone)]
pub struct BoundField {
    record: FormRecord,
    field: String,
    focus_count: usize,
}

impl BoundField {
    /// Bind to `field` inside `record`
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownField` if the record has no such field.
    pub fn new(record: FormRecord, field: impl Into<String>) -> Result<Self> {
        let field = field.into();
        if record.get(&field).is_none() {
            return Err(FormError::UnknownField(field));
        }

        Ok(Self {
            record,
            field,
            focus_count: 0,
        })
    }

    /// The whole record
    #[must_use]
    pub const fn record(&self) -> &FormRecord {
        &self.record
    }

    /// The whole record, mutably
    pub fn record_mut(&mut self) -> &mut FormRecord {
        &mut self.record
    }

    /// Record a user edit of the bound field
    pub fn input(&mut self, text: impl Into<String>) {
        self.record.input(&self.field, text);
    }

    /// Validation error on the bound field
    #[must_use]
    pub fn error(&self, key: &str) -> Option<&str> {
        self.record.error(&self.field, key)
    }

    /// How many times focus was returned to the field
    #[must_use]
    pub const fn focus_count(&self) -> usize {
        self.focus_count
    }

    /// Consume the binding into its record
    #[must_use]
    pub fn into_record(self) -> FormRecord {
        self.record
    }
}

impl FormBinding for BoundField {
    fn field_name(&self) -> &str {
        &self.field
    }

    fn value(&self) -> String {
        self.record.text(&self.field)
    }

    fn is_touched(&self) -> bool {
        self.record.is_touched(&self.field)
    }

    fn set_value(&mut self, value: Value) {
        self.record.set(self.field.clone(), value);
    }

    fn set_error(&mut self, key: &str, message: &str) {
        self.record.set_error(&self.field, key, message);
    }

    fn clear_error(&mut self, key: &str) {
        self.record.clear_error(&self.field, key);
    }

    fn patch_record(&mut self, item: &Item) -> Result<usize> {
        Ok(self.record.patch(item))
    }

    fn mark_dirty(&mut self) {
        self.record.mark_dirty();
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn city_record() -> FormRecord {
        FormRecord::from_value(json!({"city": "", "code": null, "country": "NO"})).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = FormRecord::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, FormError::NotAnObject(_)));
        assert_eq!(err.to_string(), "Form record must be a JSON object, got an array");
    }

    #[test]
    fn test_bind_unknown_field() {
        let err = BoundField::new(city_record(), "street").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref f) if f == "street"));
    }

    #[test]
    fn test_programmatic_set_does_not_touch() {
        let mut record = city_record();
        record.set("city", "Oslo");
        assert!(!record.is_touched("city"));
        assert!(!record.is_dirty());

        record.input("city", "Os");
        assert!(record.is_touched("city"));
        assert!(record.is_dirty());
        assert_eq!(record.text("city"), "Os");
    }

    #[test]
    fn test_text_of_non_string_values() {
        let record = FormRecord::from_value(json!({"n": 7, "none": null})).unwrap();
        assert_eq!(record.text("n"), "7");
        assert_eq!(record.text("none"), "");
        assert_eq!(record.text("missing"), "");
    }

    #[test]
    fn test_patch_only_writes_known_fields() {
        let mut record = city_record();
        let item: Item = [
            ("city", json!("Oslo")),
            ("code", json!("OSL")),
            ("population", json!(700_000)),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.patch(&item), 2);
        assert_eq!(record.get("city"), Some(&json!("Oslo")));
        assert_eq!(record.get("code"), Some(&json!("OSL")));
        assert_eq!(record.get("country"), Some(&json!("NO")));
        assert!(record.get("population").is_none());
    }

    #[test]
    fn test_patch_with_disjoint_item_writes_nothing() {
        let mut record = city_record();
        let item = Item::with_field("street", "Main");
        assert_eq!(record.patch(&item), 0);
        assert_eq!(record.patch(&Item::new()), 0);
        assert_eq!(record, city_record());
    }

    #[test]
    fn test_user_edit_clears_field_errors() {
        let mut record = city_record();
        record.set_error("city", "itemNotExist", "Item not exist");
        record.set_error("code", "required", "Code is required");

        record.input("city", "Osl");

        assert_eq!(record.error("city", "itemNotExist"), None);
        assert_eq!(record.error("code", "required"), Some("Code is required"));
    }

    #[test]
    fn test_errors_set_and_clear() {
        let mut field = BoundField::new(city_record(), "city").unwrap();
        field.set_error("itemNotExist", "Item not exist");
        assert_eq!(field.error("itemNotExist"), Some("Item not exist"));
        assert!(!field.record().is_valid());

        field.clear_error("itemNotExist");
        assert_eq!(field.error("itemNotExist"), None);
        assert!(field.record().is_valid());
    }

    #[test]
    fn test_bound_field_binding() {
        let mut field = BoundField::new(city_record(), "city").unwrap();
        assert_eq!(field.field_name(), "city");
        assert!(!field.is_touched());

        field.input("Ber");
        assert!(field.is_touched());
        assert_eq!(field.value(), "Ber");

        field.set_value(json!("Berlin"));
        assert_eq!(field.value(), "Berlin");

        field.focus();
        assert_eq!(field.focus_count(), 1);
    }
}
