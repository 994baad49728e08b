//! # magnate-core: Pure Business Logic for Magnate
//!
//! This crate is the **heart** of Magnate, a novelty "spend the fortune"
//! storefront. It contains all business logic as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Magnate Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering Surface (browser UI)               │   │
//! │  │    Persona picker ──► Store grid ──► Cart ──► Prank overlay     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Renderer trait                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront                              │   │
//! │  │    catalog load, event dispatch, prank timers, logging          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ magnate-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐      │   │
//! │  │   │  catalog  │ │   money   │ │  session  │ │   prank   │      │   │
//! │  │   │  Persona  │ │   Money   │ │  balance  │ │  staged   │      │   │
//! │  │   │  Item     │ │  Currency │ │  cart     │ │  overlay  │      │   │
//! │  │   │  Rates    │ │  format   │ │  purchase │ │  FSM      │      │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO RENDERING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The immutable session dataset (personas, items, rates)
//! - [`money`] - Integer money, currencies, display formatting
//! - [`session`] - Session state and the purchase transaction
//! - [`prank`] - The post-purchase prank state machine
//! - [`locale`] - Display languages and their string table
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system and timer access is FORBIDDEN here
//! 3. **Integer Money**: All monetary state is cents (i64); other currencies
//!    are display-only projections recomputed on every render
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use magnate_core::{Catalog, CatalogDocument, Money, SessionState};
//!
//! let doc: CatalogDocument = serde_json::from_str(r#"{
//!     "billionaires": [{"id": "rich", "name": "Rich Person", "money": 1000}],
//!     "items": [{"id": "watch", "title": "Gold watch", "price": 300}],
//!     "rates": {"USD": 1}
//! }"#).unwrap();
//! let catalog = Catalog::from_document(doc);
//!
//! let mut session = SessionState::new();
//! session.select_persona(&catalog, "rich").unwrap();
//! session.adjust_pending("watch", 1); // stage 2 of them
//!
//! let receipt = session.purchase(&catalog, "watch").unwrap();
//! assert_eq!(receipt.cost, Money::from_major(600));
//! assert_eq!(session.balance(), Money::from_major(400));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod locale;
pub mod money;
pub mod prank;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use magnate_core::Money` instead of
// `use magnate_core::money::Money`

pub use catalog::{Catalog, CatalogDocument, CatalogItem, Persona};
pub use error::{CoreError, CoreResult};
pub use locale::Language;
pub use money::{format_display, Currency, ExchangeRates, Money, MONEY_PLACEHOLDER};
pub use prank::{PrankSequencer, PrankStage};
pub use session::{CartLine, Receipt, SessionState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity that can be staged for a single purchase.
///
/// ## Business Reason
/// Without a cap, a held-down key can stage absurd quantities. The fixed
/// ceiling guards against fat-finger input; the floor of 1 means there is
/// always something to buy.
pub const MAX_PENDING_QTY: i64 = 999;
