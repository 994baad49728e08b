//! # Event Dispatch
//!
//! The explicit event table between user input and the session core.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Event Dispatch                                       │
//! │                                                                         │
//! │  Input Event              Session Change           Renders Triggered    │
//! │  ───────────              ──────────────           ─────────────────    │
//! │                                                                         │
//! │  SelectPersona ─────────► wholesale reset ───────► summary+catalog+cart│
//! │                                                                         │
//! │  AdjustQuantity ────────► staged qty clamped ────► catalog             │
//! │                                                                         │
//! │  Purchase (ok) ─────────► debit+accumulate ──────► summary+catalog+cart│
//! │                                                    then prank armed     │
//! │  Purchase (no funds) ───► nothing ───────────────► notification only   │
//! │                                                                         │
//! │  ChangeCurrency ────────► display currency ──────► summary+catalog+cart│
//! │                                                                         │
//! │  ChangeLanguage ────────► display language ──────► summary             │
//! │                                                                         │
//! │  DismissPrank ──────────► overlay to Idle ───────► prank               │
//! │                                                                         │
//! │  Events are synchronous: each one completes (including its renders)    │
//! │  before the next is accepted. Only the prank timers outlive an event.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keeping the table explicit (instead of wiring handlers straight into the
//! surface) is what lets the whole core run and be tested without any UI
//! present.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use magnate_core::{Catalog, CoreError, Currency, Language};

use crate::error::UiError;
use crate::render::{self, Renderer};
use crate::sequencer::PrankDriver;
use crate::state::SessionHandle;

// =============================================================================
// Input Events
// =============================================================================

/// Everything the user can do, as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pick a persona card.
    SelectPersona { persona_id: String },
    /// Nudge the staged quantity for an item (typically ±1).
    AdjustQuantity { item_id: String, delta: i64 },
    /// Buy the staged quantity of an item.
    Purchase { item_id: String },
    /// Switch the display currency.
    ChangeCurrency { currency: Currency },
    /// Switch the display language (display-only).
    ChangeLanguage { language: Language },
    /// Close the prank overlay.
    DismissPrank,
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Applies input events to the session and triggers the resulting renders.
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    session: SessionHandle,
    prank: PrankDriver,
    renderer: Arc<dyn Renderer>,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, renderer: Arc<dyn Renderer>) -> Self {
        Dispatcher {
            catalog,
            session: SessionHandle::new(),
            prank: PrankDriver::new(),
            renderer,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Paints every surface from the current state. Used for the initial
    /// render after the catalog loads.
    pub fn render_all(&self) {
        self.render_summary();
        self.render_catalog();
        self.render_cart();
        self.renderer.render_prank(self.prank.stage());
    }

    /// Applies one input event to completion.
    pub fn dispatch(&self, event: InputEvent) -> Result<(), UiError> {
        debug!(?event, "dispatch");

        match event {
            InputEvent::SelectPersona { persona_id } => self.select_persona(&persona_id),
            InputEvent::AdjustQuantity { item_id, delta } => {
                let qty = self
                    .session
                    .with_session_mut(|s| s.adjust_pending(&item_id, delta));
                debug!(item = %item_id, staged = qty, "quantity adjusted");
                self.render_catalog();
                Ok(())
            }
            InputEvent::Purchase { item_id } => self.purchase(&item_id),
            InputEvent::ChangeCurrency { currency } => {
                if self.session.with_session_mut(|s| s.change_currency(currency)) {
                    self.render_summary();
                    self.render_catalog();
                    self.render_cart();
                }
                Ok(())
            }
            InputEvent::ChangeLanguage { language } => {
                if self.session.with_session_mut(|s| s.change_language(language)) {
                    self.render_summary();
                }
                Ok(())
            }
            InputEvent::DismissPrank => {
                self.prank.dismiss(&self.renderer);
                Ok(())
            }
        }
    }

    fn select_persona(&self, persona_id: &str) -> Result<(), UiError> {
        match self
            .session
            .with_session_mut(|s| s.select_persona(&self.catalog, persona_id))
        {
            Ok(()) => {
                info!(persona = %persona_id, "persona selected");
                self.render_summary();
                self.render_catalog();
                self.render_cart();
                Ok(())
            }
            Err(err) => {
                // only reachable through broken UI wiring
                warn!(persona = %persona_id, %err, "persona selection failed");
                Err(err.into())
            }
        }
    }

    fn purchase(&self, item_id: &str) -> Result<(), UiError> {
        match self
            .session
            .with_session_mut(|s| s.purchase(&self.catalog, item_id))
        {
            Ok(receipt) => {
                info!(
                    item = %receipt.item_id,
                    quantity = receipt.quantity,
                    cost = %receipt.cost,
                    balance = %receipt.balance_after,
                    "purchase completed"
                );
                self.render_summary();
                self.render_catalog();
                self.render_cart();
                self.prank.arm(&self.renderer);
                Ok(())
            }
            Err(err @ CoreError::InsufficientFunds { .. }) => {
                // recovered locally: state untouched, user gets a notice
                debug!(item = %item_id, %err, "purchase rejected");
                self.renderer.notify("Not enough money 😄");
                Ok(())
            }
            Err(CoreError::NoPersonaSelected) => {
                // buying before selecting a persona is ignored
                debug!(item = %item_id, "purchase without persona ignored");
                Ok(())
            }
            Err(err) => {
                warn!(item = %item_id, %err, "purchase failed");
                Err(err.into())
            }
        }
    }

    fn render_summary(&self) {
        let view = self
            .session
            .with_session(|s| render::summary_view(s, &self.catalog));
        self.renderer.render_summary(&view);
    }

    fn render_catalog(&self) {
        let view = self
            .session
            .with_session(|s| render::catalog_view(s, &self.catalog));
        self.renderer.render_catalog(&view);
    }

    fn render_cart(&self) {
        let view = self
            .session
            .with_session(|s| render::cart_view(s, &self.catalog));
        self.renderer.render_cart(&view);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{RecordingRenderer, RenderCall};
    use magnate_core::{CatalogDocument, PrankStage};

    fn catalog() -> Arc<Catalog> {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{
                "billionaires": [{"id": "rich", "name": "Rich Person", "money": 1000}],
                "items": [{"id": "watch", "title": "Gold watch", "price": 300}],
                "rates": {"USD": 1}
            }"#,
        )
        .unwrap();
        Arc::new(Catalog::from_document(doc))
    }

    fn dispatcher() -> (Dispatcher, Arc<RecordingRenderer>) {
        let recording = Arc::new(RecordingRenderer::new());
        let renderer: Arc<dyn Renderer> = recording.clone();
        (Dispatcher::new(catalog(), renderer), recording)
    }

    #[tokio::test]
    async fn test_purchase_renders_and_arms_prank() {
        let (dispatcher, recording) = dispatcher();
        dispatcher
            .dispatch(InputEvent::SelectPersona {
                persona_id: "rich".to_string(),
            })
            .unwrap();
        recording.clear();

        dispatcher
            .dispatch(InputEvent::Purchase {
                item_id: "watch".to_string(),
            })
            .unwrap();

        assert_eq!(
            recording.calls(),
            vec![
                RenderCall::Summary {
                    balance: "700 USD".to_string()
                },
                RenderCall::Catalog,
                RenderCall::Cart {
                    total_spent: "300 USD".to_string()
                },
                RenderCall::Prank(PrankStage::Processing),
            ]
        );
        assert_eq!(dispatcher.prank.stage(), PrankStage::Processing);
    }

    #[tokio::test]
    async fn test_insufficient_funds_notifies_only() {
        let (dispatcher, recording) = dispatcher();
        dispatcher
            .dispatch(InputEvent::SelectPersona {
                persona_id: "rich".to_string(),
            })
            .unwrap();
        dispatcher
            .dispatch(InputEvent::AdjustQuantity {
                item_id: "watch".to_string(),
                delta: 9, // staged 10, cost 3000 > 1000
            })
            .unwrap();
        recording.clear();

        dispatcher
            .dispatch(InputEvent::Purchase {
                item_id: "watch".to_string(),
            })
            .unwrap();

        assert_eq!(
            recording.calls(),
            vec![RenderCall::Notify("Not enough money 😄".to_string())]
        );
        assert_eq!(
            dispatcher.session().with_session(|s| s.balance()),
            magnate_core::Money::from_major(1000)
        );
    }

    #[tokio::test]
    async fn test_purchase_without_persona_is_silent() {
        let (dispatcher, recording) = dispatcher();

        dispatcher
            .dispatch(InputEvent::Purchase {
                item_id: "watch".to_string(),
            })
            .unwrap();

        assert!(recording.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_persona_surfaces_error() {
        let (dispatcher, _) = dispatcher();

        let err = dispatcher
            .dispatch(InputEvent::SelectPersona {
                persona_id: "nobody".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_currency_change_rerenders_money_surfaces() {
        let (dispatcher, recording) = dispatcher();
        dispatcher
            .dispatch(InputEvent::SelectPersona {
                persona_id: "rich".to_string(),
            })
            .unwrap();
        recording.clear();

        // UZS has no configured rate in this catalog: unity fallback
        dispatcher
            .dispatch(InputEvent::ChangeCurrency {
                currency: Currency::Uzs,
            })
            .unwrap();
        assert_eq!(
            recording.calls(),
            vec![
                RenderCall::Summary {
                    balance: "1,000 UZS".to_string()
                },
                RenderCall::Catalog,
                RenderCall::Cart {
                    total_spent: "0 UZS".to_string()
                },
            ]
        );

        // identity change renders nothing
        recording.clear();
        dispatcher
            .dispatch(InputEvent::ChangeCurrency {
                currency: Currency::Uzs,
            })
            .unwrap();
        assert!(recording.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_renders_idle() {
        let (dispatcher, recording) = dispatcher();

        dispatcher.dispatch(InputEvent::DismissPrank).unwrap();
        assert_eq!(
            recording.calls(),
            vec![RenderCall::Prank(PrankStage::Idle)]
        );
    }

    #[test]
    fn test_events_deserialize_from_tagged_json() {
        let event: InputEvent = serde_json::from_str(
            r#"{"type": "adjust_quantity", "item_id": "watch", "delta": -1}"#,
        )
        .unwrap();
        assert!(matches!(
            event,
            InputEvent::AdjustQuantity { ref item_id, delta: -1 } if item_id == "watch"
        ));
    }
}
