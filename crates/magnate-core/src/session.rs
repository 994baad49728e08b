//! # Session State
//!
//! The mutable record of one shopping session: selected persona, remaining
//! balance, cumulative spend, accumulated cart, and staged quantities.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  select   ┌──────────┐  adjust/buy  ┌──────────┐         │
//! │  │  Empty   │──────────►│  Active  │─────────────►│  Active  │         │
//! │  │ (no      │  persona  │ balance= │   mutations  │ balance  │         │
//! │  │ persona) │           │ fortune  │              │ shrinks  │         │
//! │  └──────────┘           └────┬─────┘              └────┬─────┘         │
//! │                              │                         │               │
//! │                              │  select another persona │               │
//! │                              ◄─────────────────────────┘               │
//! │                              (wholesale reset, no carryover)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `balance >= 0` at all times
//! - `balance + total_spent == persona.fortune` while a persona is selected
//! - every staged quantity is in `1..=MAX_PENDING_QTY`
//! - cart lines exist only for items purchased at least once
//!
//! The purchase operation is atomic: validation happens before any field is
//! touched, and the single-threaded mutation model (one event handled to
//! completion at a time) means there is no interleaving to defend against.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Catalog, Persona};
use crate::error::{CoreError, CoreResult};
use crate::locale::Language;
use crate::money::{Currency, Money};
use crate::MAX_PENDING_QTY;

// =============================================================================
// Cart Line
// =============================================================================

/// One accumulated purchase line.
///
/// ## Design Notes
/// - `title` and `unit_price` are frozen copies of the catalog data at the
///   time of the first purchase, so the cart keeps displaying consistent
///   data no matter what happens to the catalog reference.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: String,

    /// Item title at time of first purchase (frozen).
    pub title: String,

    /// Unit price at time of first purchase (frozen), base currency.
    pub unit_price: Money,

    /// Total quantity purchased across all transactions.
    pub quantity: i64,
}

// =============================================================================
// Receipt
// =============================================================================

/// The record of one successful purchase, returned to the caller for
/// logging and rendering.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub item_id: String,
    pub title: String,
    pub quantity: i64,
    /// Total debited for this purchase, base currency.
    pub cost: Money,
    /// Remaining balance after the debit, base currency.
    pub balance_after: Money,
    /// When the purchase happened.
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
}

// =============================================================================
// Session State
// =============================================================================

/// The mutable state of one shopping session.
///
/// Owned exclusively by the running session: created empty at startup,
/// reinitialized wholesale on persona selection, and mutated incrementally
/// by quantity adjustments and purchases. Nothing here survives a reload.
#[derive(Debug, Clone)]
pub struct SessionState {
    currency: Currency,
    language: Language,
    persona: Option<Persona>,
    balance: Money,
    total_spent: Money,
    cart: Vec<CartLine>,
    /// Staged quantities for the next purchase, per item id. Entries are
    /// created lazily with a floor of 1.
    pending: HashMap<String, i64>,
}

impl SessionState {
    /// Creates an empty session: no persona, zero balance, default
    /// currency and language.
    pub fn new() -> Self {
        SessionState {
            currency: Currency::default(),
            language: Language::default(),
            persona: None,
            balance: Money::zero(),
            total_spent: Money::zero(),
            cart: Vec::new(),
            pending: HashMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn persona(&self) -> Option<&Persona> {
        self.persona.as_ref()
    }

    /// Remaining spendable amount, base currency.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Cumulative amount debited, base currency.
    pub fn total_spent(&self) -> Money {
        self.total_spent
    }

    /// Accumulated purchase lines, in first-purchase order.
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// The staged quantity for an item. Unset entries read as 1.
    pub fn pending_qty(&self, item_id: &str) -> i64 {
        self.pending.get(item_id).copied().unwrap_or(1)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Selects a persona and reinitializes the session around it.
    ///
    /// ## Reset Rule
    /// Balance, total spent, cart and staged quantities are all replaced
    /// unconditionally. There is no carryover between personas.
    ///
    /// Returns [`CoreError::PersonaNotFound`] if the id is not in the
    /// catalog; under correct wiring this is a programming error.
    pub fn select_persona(&mut self, catalog: &Catalog, persona_id: &str) -> CoreResult<()> {
        let persona = catalog
            .persona(persona_id)
            .ok_or_else(|| CoreError::PersonaNotFound(persona_id.to_string()))?
            .clone();

        self.balance = persona.fortune;
        self.total_spent = Money::zero();
        self.cart.clear();
        self.pending.clear();
        self.persona = Some(persona);
        Ok(())
    }

    /// Adjusts the staged quantity for an item by a signed delta.
    ///
    /// Unset entries default to 1 before the delta is applied; the result
    /// is clamped to `1..=MAX_PENDING_QTY`. A delta of 0 is the identity.
    /// Returns the new staged quantity.
    pub fn adjust_pending(&mut self, item_id: &str, delta: i64) -> i64 {
        let entry = self.pending.entry(item_id.to_string()).or_insert(1);
        *entry = entry.saturating_add(delta).clamp(1, MAX_PENDING_QTY);
        *entry
    }

    /// Switches the display currency. Returns false when the currency was
    /// already selected (identity, nothing to re-render).
    pub fn change_currency(&mut self, currency: Currency) -> bool {
        if self.currency == currency {
            return false;
        }
        self.currency = currency;
        true
    }

    /// Switches the display language. Display-only, same identity rule as
    /// [`Self::change_currency`].
    pub fn change_language(&mut self, language: Language) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        true
    }

    /// Purchases the staged quantity of an item against the balance.
    ///
    /// ## Transaction Rules
    /// ```text
    /// cost = item.price × staged_qty
    ///
    /// balance < cost   ──► InsufficientFunds, nothing mutated
    /// balance >= cost  ──► balance  -= cost
    ///                      spent    += cost
    ///                      cart[it] += staged_qty   (line created on first buy)
    ///                      staged_qty reset to 1
    /// ```
    ///
    /// All four mutations happen together or not at all: every check runs
    /// before the first field is written.
    pub fn purchase(&mut self, catalog: &Catalog, item_id: &str) -> CoreResult<Receipt> {
        if self.persona.is_none() {
            return Err(CoreError::NoPersonaSelected);
        }

        let item = catalog
            .item(item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        let quantity = self.pending_qty(item_id);
        let cost = item.price.multiply_quantity(quantity);

        if self.balance < cost {
            return Err(CoreError::InsufficientFunds {
                needed: cost,
                available: self.balance,
            });
        }

        // Checks passed. From here on every mutation must land.
        self.balance -= cost;
        self.total_spent += cost;

        if let Some(line) = self.cart.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += quantity;
        } else {
            self.cart.push(CartLine {
                item_id: item.id.clone(),
                title: item.title.clone(),
                unit_price: item.price,
                quantity,
            });
        }

        self.pending.insert(item_id.to_string(), 1);

        Ok(Receipt {
            item_id: item.id.clone(),
            title: item.title.clone(),
            quantity,
            cost,
            balance_after: self.balance,
            at: Utc::now(),
        })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
