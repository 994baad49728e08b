//! # Rendering Boundary
//!
//! The core is renderer-agnostic: it hands the surface display-ready view
//! snapshots and never touches the surface itself.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Rendering Boundary                                   │
//! │                                                                         │
//! │  Dispatcher ──► view builders ──► Renderer trait ──► actual surface    │
//! │                                                                         │
//! │  • four idempotent render calls: summary, catalog, cart, prank         │
//! │  • plus one notification hook (blocking notice on rejected purchase)   │
//! │  • every view is rebuilt from the canonical base-currency state on     │
//! │    every render; converted amounts are never stored anywhere           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::info;

use magnate_core::{
    format_display, Catalog, PrankStage, SessionState, MONEY_PLACEHOLDER,
};

// =============================================================================
// Renderer Trait
// =============================================================================

/// The rendering surface consumed by the dispatcher.
///
/// Implementations must be idempotent per call: each method receives the
/// complete snapshot it needs and replaces whatever was shown before.
/// `Send + Sync` because prank timer tasks render from runtime workers.
pub trait Renderer: Send + Sync {
    /// Persona name and remaining balance.
    fn render_summary(&self, view: &SummaryView);

    /// The store grid with current staged quantities.
    fn render_catalog(&self, view: &CatalogView);

    /// Accumulated purchases and the running spend total.
    fn render_cart(&self, view: &CartView);

    /// Prank overlay visibility. At most one stage is visible at a time.
    fn render_prank(&self, stage: PrankStage);

    /// A blocking user notice (rejected purchase).
    fn notify(&self, message: &str);
}

// =============================================================================
// View Snapshots
// =============================================================================

/// Persona/balance summary, localized page title included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub page_title: String,
    /// `None` until a persona is selected; the surface shows a dash.
    pub persona_name: Option<String>,
    /// Balance in the selected display currency, or the placeholder while
    /// no persona is selected.
    pub balance: String,
}

/// One store grid entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryView {
    pub item_id: String,
    pub title: String,
    /// Unit price in the selected display currency.
    pub price: String,
    /// Quantity staged for the next purchase.
    pub pending_qty: i64,
}

/// The store grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub entries: Vec<CatalogEntryView>,
}

/// One accumulated cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub title: String,
    pub quantity: i64,
}

/// The cart with its running total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// Total spent in the selected display currency.
    pub total_spent: String,
}

// =============================================================================
// View Builders
// =============================================================================

/// Builds the summary view from the current session and catalog.
pub fn summary_view(session: &SessionState, catalog: &Catalog) -> SummaryView {
    let balance = match session.persona() {
        Some(_) => format_display(session.balance(), session.currency(), catalog.rates()),
        None => MONEY_PLACEHOLDER.to_string(),
    };

    SummaryView {
        page_title: session.language().page_title().to_string(),
        persona_name: session.persona().map(|p| p.name.clone()),
        balance,
    }
}

/// Builds the store grid view. Prices are projected into the selected
/// display currency on the spot.
pub fn catalog_view(session: &SessionState, catalog: &Catalog) -> CatalogView {
    CatalogView {
        entries: catalog
            .items()
            .iter()
            .map(|item| CatalogEntryView {
                item_id: item.id.clone(),
                title: item.title.clone(),
                price: format_display(item.price, session.currency(), catalog.rates()),
                pending_qty: session.pending_qty(&item.id),
            })
            .collect(),
    }
}

/// Builds the cart view from the accumulated purchase lines.
pub fn cart_view(session: &SessionState, catalog: &Catalog) -> CartView {
    CartView {
        lines: session
            .cart()
            .iter()
            .map(|line| CartLineView {
                title: line.title.clone(),
                quantity: line.quantity,
            })
            .collect(),
        total_spent: format_display(session.total_spent(), session.currency(), catalog.rates()),
    }
}

// =============================================================================
// Tracing Renderer
// =============================================================================

/// A renderer that writes every render to the structured log. Used by the
/// demo shell; a real surface would paint a browser DOM instead.
#[derive(Debug, Default)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn render_summary(&self, view: &SummaryView) {
        info!(
            title = %view.page_title,
            persona = view.persona_name.as_deref().unwrap_or("—"),
            balance = %view.balance,
            "summary"
        );
    }

    fn render_catalog(&self, view: &CatalogView) {
        for entry in &view.entries {
            info!(
                item = %entry.item_id,
                title = %entry.title,
                price = %entry.price,
                staged = entry.pending_qty,
                "store item"
            );
        }
    }

    fn render_cart(&self, view: &CartView) {
        for line in &view.lines {
            info!(title = %line.title, quantity = line.quantity, "cart line");
        }
        info!(total_spent = %view.total_spent, "cart total");
    }

    fn render_prank(&self, stage: PrankStage) {
        info!(?stage, "prank overlay");
    }

    fn notify(&self, message: &str) {
        info!(%message, "notice");
    }
}

// =============================================================================
// Test Support
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use magnate_core::{CatalogDocument, Currency, SessionState};

    fn catalog() -> Catalog {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{
                "billionaires": [{"id": "rich", "name": "Rich Person", "money": 1000}],
                "items": [{"id": "watch", "title": "Gold watch", "price": 300}],
                "rates": {"USD": 1, "UZS": 12500}
            }"#,
        )
        .unwrap();
        Catalog::from_document(doc)
    }

    #[test]
    fn test_summary_placeholder_before_selection() {
        let catalog = catalog();
        let session = SessionState::new();

        let view = summary_view(&session, &catalog);
        assert_eq!(view.persona_name, None);
        assert_eq!(view.balance, MONEY_PLACEHOLDER);
    }

    #[test]
    fn test_views_project_into_display_currency() {
        let catalog = catalog();
        let mut session = SessionState::new();
        session.select_persona(&catalog, "rich").unwrap();
        session.change_currency(Currency::Uzs);

        let summary = summary_view(&session, &catalog);
        assert_eq!(summary.balance, "12,500,000 UZS");

        let grid = catalog_view(&session, &catalog);
        assert_eq!(grid.entries[0].price, "3,750,000 UZS");
        assert_eq!(grid.entries[0].pending_qty, 1);

        // switching back re-projects from the canonical state
        session.change_currency(Currency::Usd);
        let summary = summary_view(&session, &catalog);
        assert_eq!(summary.balance, "1,000 USD");
    }

    #[test]
    fn test_cart_view_totals() {
        let catalog = catalog();
        let mut session = SessionState::new();
        session.select_persona(&catalog, "rich").unwrap();
        session.adjust_pending("watch", 1);
        session.purchase(&catalog, "watch").unwrap();

        let view = cart_view(&session, &catalog);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.total_spent, "600 USD");
    }
}
