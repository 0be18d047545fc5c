//! Pricing command handlers.

use std::sync::RwLock;

use serde::Serialize;

use crate::error::AppError;
use crate::pricing::{invoice, quote};
use crate::state::{AppState, StoreState};

use super::{parse_entity_id, read_store};

/// Quote breakdown for the wizard's summary panel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub subtotal: f64,
    /// True only when the one recognized code matched exactly.
    pub discount_applied: bool,
    pub fast_delivery: bool,
    /// Rounded to 2 decimal places for display.
    pub total: f64,
    pub currency: String,
}

/// Testable inner logic for [`quote_totals`].
pub(crate) fn quote_totals_inner(
    project_id: &str,
    discount_code: &str,
    fast_delivery: bool,
    currency: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<QuoteTotals, AppError> {
    let uuid = parse_entity_id(project_id, "project")?;
    let store = read_store(store_lock)?;
    let project = store
        .find(uuid)
        .ok_or_else(|| AppError::NotFound(format!("project {project_id} not found")))?;

    let total = quote::calculate_total(&project.services, discount_code, fast_delivery);
    Ok(QuoteTotals {
        subtotal: quote::subtotal(&project.services),
        discount_applied: discount_code == quote::DISCOUNT_CODE,
        fast_delivery,
        total: quote::round_for_display(total),
        currency: currency.to_string(),
    })
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Quote totals for a project under the given discount code and delivery mode.
#[tauri::command]
pub async fn quote_totals(
    project_id: String,
    discount_code: String,
    fast_delivery: bool,
    state: tauri::State<'_, AppState>,
) -> Result<QuoteTotals, AppError> {
    quote_totals_inner(
        &project_id,
        &discount_code,
        fast_delivery,
        &state.settings.currency,
        &state.store,
    )
}

/// Invoice totals for the admin back office. Pure calculation — invoices are
/// stored in the hosted database, not in the project store.
#[tauri::command]
pub async fn invoice_totals(
    items: Vec<invoice::LineItem>,
    tax_rate: f64,
    discount_amount: f64,
) -> invoice::InvoiceTotals {
    invoice::calculate(&items, tax_rate, discount_amount)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::project::create_project_inner;
    use crate::commands::services::add_service_inner;
    use crate::events::test_support::CountingNotifier;
    use crate::settings::AppSettings;
    use crate::state::AppState;
    use crate::store::MemoryRepository;

    fn app_state_with_service() -> (AppState, String) {
        let state = AppState::new(
            Box::new(MemoryRepository::default()),
            AppSettings::default(),
            std::env::temp_dir(),
        );
        let project = create_project_inner(&state.store).expect("create");
        let id = project.id.to_string();
        add_service_inner(
            &id,
            "Animation",
            "3D Modeling",
            1000.0,
            &state.store,
            &CountingNotifier::default(),
        )
        .expect("add");
        (state, id)
    }

    #[test]
    fn quote_totals_without_modifiers() {
        let (state, id) = app_state_with_service();
        let totals = quote_totals_inner(&id, "", false, "USD", &state.store).expect("totals");
        assert_eq!(totals.subtotal, 1000.0);
        assert_eq!(totals.total, 1000.00);
        assert!(!totals.discount_applied);
        assert_eq!(totals.currency, "USD");
    }

    #[test]
    fn quote_totals_with_discount_and_rush() {
        let (state, id) = app_state_with_service();
        let totals =
            quote_totals_inner(&id, "DISCOUNT30", true, "USD", &state.store).expect("totals");
        assert_eq!(totals.subtotal, 1000.0);
        assert_eq!(totals.total, 840.00);
        assert!(totals.discount_applied);
        assert!(totals.fast_delivery);
    }

    #[test]
    fn quote_totals_ignores_unknown_code() {
        let (state, id) = app_state_with_service();
        let totals =
            quote_totals_inner(&id, "WRONGCODE", false, "USD", &state.store).expect("totals");
        assert_eq!(totals.total, 1000.00);
        assert!(!totals.discount_applied);
    }

    #[test]
    fn quote_totals_for_unknown_project_is_not_found() {
        let (state, _) = app_state_with_service();
        let result = quote_totals_inner(
            &uuid::Uuid::new_v4().to_string(),
            "",
            false,
            "USD",
            &state.store,
        );
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
