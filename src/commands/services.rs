//! Service selection command handlers.
//!
//! Adding and removing services is where cross-view consistency matters: the
//! marketing pages show a "Selected" badge per catalog service, derived from
//! the active project. Every mutation here that touches the active project's
//! service set fires the store-changed signal.

use std::sync::RwLock;

use crate::catalog;
use crate::error::AppError;
use crate::events::StoreNotifier;
use crate::models::{Project, ServiceSelection};
use crate::state::{AppState, StoreState};

use super::{parse_entity_id, read_store, write_store};

// ── add_service ───────────────────────────────────────────────────────────────

/// Testable inner logic for [`add_service`].
///
/// Snapshots the catalog entry at the flat default price. The pair must exist
/// in the catalog; an exact duplicate within the project is rejected.
pub(crate) fn add_service_inner(
    project_id: &str,
    department: &str,
    name: &str,
    default_price: f64,
    store_lock: &RwLock<StoreState>,
    notifier: &dyn StoreNotifier,
) -> Result<ServiceSelection, AppError> {
    if !catalog::offers(department, name) {
        return Err(AppError::InvalidInput(format!(
            "unknown service {name:?} in department {department:?}"
        )));
    }
    let uuid = parse_entity_id(project_id, "project")?;

    let mut store = write_store(store_lock)?;
    let selection = ServiceSelection::new(department, name, default_price);
    let added = store.mutate_project(uuid, |project| {
        project.add_service(selection.clone())?;
        Ok(selection)
    })?;
    if store.active_project().map(|p| p.id) == Some(uuid) {
        notifier.store_changed();
    }
    Ok(added)
}

// ── add_service_to_active ─────────────────────────────────────────────────────

/// Testable inner logic for [`add_service_to_active`].
///
/// The marketing-page path: adds a service to the active project, implicitly
/// creating the sentinel-named project when none exists yet. Always signals,
/// since the active project's service set changed by definition.
pub(crate) fn add_service_to_active_inner(
    department: &str,
    name: &str,
    default_price: f64,
    store_lock: &RwLock<StoreState>,
    notifier: &dyn StoreNotifier,
) -> Result<Project, AppError> {
    if !catalog::offers(department, name) {
        return Err(AppError::InvalidInput(format!(
            "unknown service {name:?} in department {department:?}"
        )));
    }

    let mut store = write_store(store_lock)?;
    let active_id = match store.active_project() {
        Some(project) => project.id,
        None => store.create_active_project()?.id,
    };
    let selection = ServiceSelection::new(department, name, default_price);
    store.mutate_project(active_id, |project| project.add_service(selection))?;
    notifier.store_changed();
    store
        .find(active_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("project {active_id} not found")))
}

// ── remove_service ────────────────────────────────────────────────────────────

/// Testable inner logic for [`remove_service`].
///
/// Removes the selection by synthetic id and cascades to its attachments.
pub(crate) fn remove_service_inner(
    project_id: &str,
    service_id: &str,
    store_lock: &RwLock<StoreState>,
    notifier: &dyn StoreNotifier,
) -> Result<(), AppError> {
    let project_uuid = parse_entity_id(project_id, "project")?;
    let service_uuid = parse_entity_id(service_id, "service")?;

    let mut store = write_store(store_lock)?;
    store.mutate_project(project_uuid, |project| project.remove_service(service_uuid))?;
    if store.active_project().map(|p| p.id) == Some(project_uuid) {
        notifier.store_changed();
    }
    Ok(())
}

// ── selected_service_names ────────────────────────────────────────────────────

/// Testable inner logic for [`selected_service_names`].
///
/// The badge query: names of services currently selected in the active
/// project, or an empty list when no project is active.
pub(crate) fn selected_service_names_inner(
    store_lock: &RwLock<StoreState>,
) -> Result<Vec<String>, AppError> {
    let store = read_store(store_lock)?;
    Ok(store
        .active_project()
        .map(|p| p.service_names())
        .unwrap_or_default())
}

// ── catalog queries ───────────────────────────────────────────────────────────

/// Testable inner logic for [`catalog_departments`] / [`catalog_services`].
pub(crate) fn catalog_services_inner(department: &str) -> Vec<String> {
    catalog::services_for(department)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Add a catalog service to a project at the flat default price.
#[tauri::command]
pub async fn add_service(
    project_id: String,
    department: String,
    name: String,
    state: tauri::State<'_, AppState>,
    app: tauri::AppHandle,
) -> Result<ServiceSelection, AppError> {
    add_service_inner(
        &project_id,
        &department,
        &name,
        state.settings.default_service_price,
        &state.store,
        &crate::events::EventNotifier::new(app),
    )
}

/// Add a catalog service to the active project, creating it when absent.
#[tauri::command]
pub async fn add_service_to_active(
    department: String,
    name: String,
    state: tauri::State<'_, AppState>,
    app: tauri::AppHandle,
) -> Result<Project, AppError> {
    add_service_to_active_inner(
        &department,
        &name,
        state.settings.default_service_price,
        &state.store,
        &crate::events::EventNotifier::new(app),
    )
}

/// Remove a selection from a project; its attachments go with it.
#[tauri::command]
pub async fn remove_service(
    project_id: String,
    service_id: String,
    state: tauri::State<'_, AppState>,
    app: tauri::AppHandle,
) -> Result<(), AppError> {
    remove_service_inner(
        &project_id,
        &service_id,
        &state.store,
        &crate::events::EventNotifier::new(app),
    )
}

/// Names of services selected in the active project (for "Selected" badges).
#[tauri::command]
pub async fn selected_service_names(
    state: tauri::State<'_, AppState>,
) -> Result<Vec<String>, AppError> {
    selected_service_names_inner(&state.store)
}

/// All catalog departments, in display order.
#[tauri::command]
pub async fn catalog_departments() -> Vec<String> {
    catalog::departments().iter().map(|d| d.to_string()).collect()
}

/// Service names offered by one department (empty for unknown departments).
#[tauri::command]
pub async fn catalog_services(department: String) -> Vec<String> {
    catalog_services_inner(&department)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
