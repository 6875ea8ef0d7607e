//! Form binding abstraction
//!
//! The controller never owns form state. It talks to the host form framework
//! through the [`FormBinding`] trait: one bound field inside a broader record.
//! [`FormRecord`] and [`BoundField`] are a small in-memory implementation used
//! by the demo binary and the test suites.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────┐
//! │      InputController      │
//! └─────────────┬─────────────┘
//!               │ FormBinding
//!               ▼
//! ┌───────────────────────────┐
//! │  Host form framework      │
//! │  (BoundField / FormRecord │
//! │   or an integrator type)  │
//! └───────────────────────────┘
//! ```

mod error;
mod record;

pub use error::{FormError, Result};
pub use record::{BoundField, FormRecord};

use crate::item::Item;
use serde_json::Value;

/// Validation error key set when forced choice cannot resolve an item
pub const ITEM_NOT_EXIST: &str = "itemNotExist";

/// A text field bound to a form record
pub trait FormBinding {
    /// Name of the bound field inside its record
    fn field_name(&self) -> &str;

    /// Current raw text of the field
    fn value(&self) -> String;

    /// Whether the user has edited the field
    ///
    /// A programmatic initial value leaves the field untouched.
    fn is_touched(&self) -> bool;

    /// Replace the field value
    fn set_value(&mut self, value: Value);

    /// Attach a validation error to the field
    fn set_error(&mut self, key: &str, message: &str);

    /// Remove a validation error from the field
    fn clear_error(&mut self, key: &str);

    /// Patch the whole record with the item's fields
    ///
    /// Returns the number of record fields written.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if the host cannot apply the patch.
    fn patch_record(&mut self, item: &Item) -> Result<usize>;

    /// Mark the record as modified by the user
    fn mark_dirty(&mut self);

    /// Return input focus to the host field
    fn focus(&mut self);
}
