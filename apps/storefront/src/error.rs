//! # UI Error Type
//!
//! Unified error type for the rendering boundary.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Magnate                                │
//! │                                                                         │
//! │  Input event                                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Dispatcher                                                             │
//! │      │                                                                  │
//! │      ├── InsufficientFunds ──► renderer notification, event succeeds   │
//! │      ├── NoPersonaSelected ──► logged and swallowed (silent no-op)     │
//! │      └── everything else   ──► UiError { code, message }               │
//! │                                                                         │
//! │  The UI surface receives both a machine-readable `code` for            │
//! │  programmatic handling and a human-readable `message` for display.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use magnate_core::CoreError;

use crate::loader::LoadError;

/// Error returned across the rendering boundary.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Item not found: yacht" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Persona or item id absent from the catalog
    NotFound,

    /// Purchase cost exceeds the balance
    InsufficientFunds,

    /// Purchase attempted before persona selection
    NoPersonaSelected,

    /// The catalog document could not be loaded
    CatalogLoad,

    /// Anything else
    Internal,
}

impl UiError {
    /// Creates a new UI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        UiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to UI errors.
impl From<CoreError> for UiError {
    fn from(err: CoreError) -> Self {
        let code = match err {
            CoreError::PersonaNotFound(_) | CoreError::ItemNotFound(_) => ErrorCode::NotFound,
            CoreError::NoPersonaSelected => ErrorCode::NoPersonaSelected,
            CoreError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
        };
        UiError::new(code, err.to_string())
    }
}

/// Converts catalog load errors to UI errors.
impl From<LoadError> for UiError {
    fn from(err: LoadError) -> Self {
        UiError::new(ErrorCode::CatalogLoad, err.to_string())
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for UiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use magnate_core::Money;

    #[test]
    fn test_core_error_mapping() {
        let err = UiError::from(CoreError::ItemNotFound("yacht".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: yacht");

        let err = UiError::from(CoreError::InsufficientFunds {
            needed: Money::from_major(600),
            available: Money::from_major(100),
        });
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
    }

    #[test]
    fn test_serializes_with_code_and_message() {
        let err = UiError::from(CoreError::NoPersonaSelected);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NO_PERSONA_SELECTED");
        assert_eq!(json["message"], "No persona selected");
    }
}
