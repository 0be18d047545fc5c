//! Order submission.
//!
//! There is no real payment processing: the payment step is a fixed artificial
//! delay for UX feedback, after which a confirmation is returned. The delay is
//! not awaited by any other logic and has no cancel path once started.

use std::sync::RwLock;
use std::time::Duration;

use serde::Serialize;

use crate::error::AppError;
use crate::pricing::quote;
use crate::state::{AppState, StoreState};

use super::{parse_entity_id, read_store};

/// Confirmation returned once the simulated payment completes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// The project's share id — what the client quotes in follow-up mail.
    pub share_id: String,
    pub project_name: String,
    pub total: f64,
    pub currency: String,
    /// ISO-8601 submission timestamp (UTC).
    pub placed_at: String,
}

/// Testable inner logic for [`submit_order`].
///
/// Validates that the project has at least one service, computes the final
/// total, then simulates the payment delay. The store lock is released before
/// sleeping — the store itself is never blocked by checkout.
pub(crate) async fn submit_order_inner(
    project_id: &str,
    discount_code: &str,
    fast_delivery: bool,
    delay: Duration,
    currency: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<OrderConfirmation, AppError> {
    let uuid = parse_entity_id(project_id, "project")?;

    let (share_id, project_name, total) = {
        let store = read_store(store_lock)?;
        let project = store
            .find(uuid)
            .ok_or_else(|| AppError::NotFound(format!("project {project_id} not found")))?;
        if project.services.is_empty() {
            return Err(AppError::InvalidInput(
                "cannot submit a project with no services".to_string(),
            ));
        }
        let total = quote::round_for_display(quote::calculate_total(
            &project.services,
            discount_code,
            fast_delivery,
        ));
        (project.unique_id.clone(), project.name.clone(), total)
    };

    // Simulated payment. Purely UX pacing — nothing reads this delay.
    tokio::time::sleep(delay).await;

    tracing::info!(share_id = %share_id, total, "order submitted");
    Ok(OrderConfirmation {
        share_id,
        project_name,
        total,
        currency: currency.to_string(),
        placed_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    })
}

/// Submit an order for a project after the simulated payment step.
#[tauri::command]
pub async fn submit_order(
    project_id: String,
    discount_code: String,
    fast_delivery: bool,
    state: tauri::State<'_, AppState>,
) -> Result<OrderConfirmation, AppError> {
    submit_order_inner(
        &project_id,
        &discount_code,
        fast_delivery,
        Duration::from_millis(state.settings.payment_delay_ms),
        &state.settings.currency,
        &state.store,
    )
    .await
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

    fn app_state() -> AppState {
        AppState::new(
            Box::new(MemoryRepository::default()),
            AppSettings::default(),
            std::env::temp_dir(),
        )
    }

    #[tokio::test]
    async fn submit_returns_confirmation_with_final_total() {
        let state = app_state();
        let project = create_project_inner(&state.store).expect("create");
        add_service_inner(
            &project.id.to_string(),
            "Animation",
            "3D Modeling",
            1000.0,
            &state.store,
            &CountingNotifier::default(),
        )
        .expect("add");

        let confirmation = submit_order_inner(
            &project.id.to_string(),
            "DISCOUNT30",
            true,
            Duration::from_millis(0),
            "USD",
            &state.store,
        )
        .await
        .expect("submit");

        assert_eq!(confirmation.total, 840.00);
        assert_eq!(confirmation.share_id, project.unique_id);
        assert_eq!(confirmation.project_name, "New Project");
        assert!(!confirmation.placed_at.is_empty());
    }

    #[tokio::test]
    async fn empty_project_cannot_be_submitted() {
        let state = app_state();
        let project = create_project_inner(&state.store).expect("create");

        let result = submit_order_inner(
            &project.id.to_string(),
            "",
            false,
            Duration::from_millis(0),
            "USD",
            &state.store,
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let state = app_state();
        let result = submit_order_inner(
            &uuid::Uuid::new_v4().to_string(),
            "",
            false,
            Duration::from_millis(0),
            "USD",
            &state.store,
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
