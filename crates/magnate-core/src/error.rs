//! # Error Types
//!
//! Domain-specific error types for magnate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  magnate-core errors (this file)                                       │
//! │  └── CoreError        - Session / transaction failures                 │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  ├── LoadError        - Catalog file read / parse failures             │
//! │  └── UiError          - What the rendering surface sees (serialized)   │
//! │                                                                         │
//! │  Flow: CoreError ──► UiError ──► renderer notification / log           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

/// Core business logic errors.
///
/// These represent business rule violations or contract violations. Under
/// correct UI wiring the two `*NotFound` variants cannot occur; the app
/// layer treats them as programming errors and logs accordingly.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Persona id is absent from the catalog.
    #[error("Persona not found: {0}")]
    PersonaNotFound(String),

    /// Item id is absent from the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// A purchase was requested before any persona was selected.
    ///
    /// The UI treats this as a silent no-op; the core surfaces a typed
    /// error and leaves the swallowing decision to the caller.
    #[error("No persona selected")]
    NoPersonaSelected,

    /// Purchase cost exceeds the remaining balance.
    ///
    /// ## When This Occurs
    /// ```text
    /// Buy (qty staged: 2, unit price $300)
    ///      │
    ///      ▼
    /// cost $600 > balance $100
    ///      │
    ///      ▼
    /// InsufficientFunds { needed: $600, available: $100 }
    ///      │
    ///      ▼
    /// UI shows a blocking notice; no state was touched
    /// ```
    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientFunds {
            needed: Money::from_major(600),
            available: Money::from_major(100),
        };
        assert_eq!(err.to_string(), "Insufficient funds: need $600.00, have $100.00");

        let err = CoreError::ItemNotFound("yacht".to_string());
        assert_eq!(err.to_string(), "Item not found: yacht");
    }
}
