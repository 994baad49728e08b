//! # Catalog Module
//!
//! The immutable dataset for one session: personas, store items and
//! exchange rates.
//!
//! ## Document vs. Domain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Translation                                  │
//! │                                                                         │
//! │  Wire document (JSON, loaded once at startup)                          │
//! │    { "billionaires": [{id, name, money}],                              │
//! │      "items":        [{id, title, price}],                             │
//! │      "rates":        {"USD": 1, "UZS": 12500, ...} }                   │
//! │         │                                                               │
//! │         ▼  Catalog::from_document                                      │
//! │                                                                         │
//! │  Domain catalog (typed, immutable for the process lifetime)            │
//! │    Persona.fortune: Money      (whole units → cents)                   │
//! │    CatalogItem.price: Money                                            │
//! │    ExchangeRates: Currency → f64  (unknown codes dropped with warn!)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document carries money in whole base-currency units because that is
//! what the hosted data file uses; the domain side is integer cents like
//! everything else in the system.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use ts_rs::TS;

use crate::money::{Currency, ExchangeRates, Money};

// =============================================================================
// Wire Document
// =============================================================================

/// The catalog document as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub billionaires: Vec<PersonaRecord>,
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

/// One selectable persona in the document. `money` is the starting fortune
/// in whole base-currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRecord {
    pub id: String,
    pub name: String,
    pub money: i64,
}

/// One store item in the document. `price` is in whole base-currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub title: String,
    pub price: i64,
}

// =============================================================================
// Domain Types
// =============================================================================

/// A selectable fictional identity with an associated starting fortune.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Persona {
    pub id: String,
    /// Display name shown in the balance summary.
    pub name: String,
    /// Starting balance, base currency.
    pub fortune: Money,
}

/// A store item available for "purchase".
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    /// Unit price, base currency.
    pub price: Money,
}

/// The immutable, once-loaded dataset for the session.
///
/// Loaded exactly once at startup and never mutated afterwards; the session
/// only ever reads from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    personas: Vec<Persona>,
    items: Vec<CatalogItem>,
    rates: ExchangeRates,
}

impl Catalog {
    /// Translates a wire document into the domain catalog.
    ///
    /// Rate entries with codes outside the supported currency set are
    /// dropped with a warning; a missing rate later falls back to a
    /// multiplier of 1 (see [`ExchangeRates::multiplier`]).
    pub fn from_document(doc: CatalogDocument) -> Self {
        let personas = doc
            .billionaires
            .into_iter()
            .map(|r| Persona {
                id: r.id,
                name: r.name,
                fortune: Money::from_major(r.money),
            })
            .collect();

        let items = doc
            .items
            .into_iter()
            .map(|r| CatalogItem {
                id: r.id,
                title: r.title,
                price: Money::from_major(r.price),
            })
            .collect();

        let mut rates = ExchangeRates::new();
        for (code, rate) in doc.rates {
            match Currency::from_code(&code) {
                Some(currency) => rates.insert(currency, rate),
                None => warn!(code = %code, "ignoring exchange rate for unsupported currency"),
            }
        }

        Catalog {
            personas,
            items,
            rates,
        }
    }

    /// Looks up a persona by id.
    pub fn persona(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// All personas, in document order.
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    /// All items, in document order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The exchange rate table.
    pub fn rates(&self) -> &ExchangeRates {
        &self.rates
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
