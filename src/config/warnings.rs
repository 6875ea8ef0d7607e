//! Non-fatal configuration diagnostics

use thiserror::Error;

/// A configuration problem that does not block operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    /// Neither a source field nor a bound field name is available for labels
    #[error("no labels indicated")]
    MissingSourceField,

    /// A button name was given without a navigation target
    #[error("no link for button '{0}'")]
    ButtonWithoutLink(String),
}
