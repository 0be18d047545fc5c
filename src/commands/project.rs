//! Project lifecycle command handlers.

use std::sync::RwLock;

use serde::Serialize;

use crate::error::AppError;
use crate::events::StoreNotifier;
use crate::models::Project;
use crate::state::{AppState, StoreState};

use super::{parse_entity_id, read_store, write_store};

/// Lightweight listing row for the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    /// The 8-character share id (copy-to-clipboard target).
    pub unique_id: String,
    pub name: String,
    pub description: String,
    pub service_count: usize,
    pub file_count: usize,
    pub revision: u64,
    pub modified_at: String,
}

impl From<&Project> for ProjectSummary {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.to_string(),
            unique_id: p.unique_id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            service_count: p.services.len(),
            file_count: p.files.len(),
            revision: p.revision,
            modified_at: p.modified_at.clone(),
        }
    }
}

// ── list_projects ─────────────────────────────────────────────────────────────

/// Testable inner logic for [`list_projects`].
pub(crate) fn list_projects_inner(
    store_lock: &RwLock<StoreState>,
) -> Result<Vec<ProjectSummary>, AppError> {
    let store = read_store(store_lock)?;
    Ok(store.projects.iter().map(ProjectSummary::from).collect())
}

// ── create_project ────────────────────────────────────────────────────────────

/// Testable inner logic for [`create_project`].
///
/// Builds a project with a fresh internal id, an unused share id and an
/// auto-suffixed unique name, appends it to the store and persists.
pub(crate) fn create_project_inner(store_lock: &RwLock<StoreState>) -> Result<Project, AppError> {
    let mut store = write_store(store_lock)?;
    store.create_project()
}

// ── update_project ────────────────────────────────────────────────────────────

/// Testable inner logic for [`update_project`].
///
/// Replaces the stored project with the same internal id, enforcing the
/// revision token. When the update touches the active project, other views
/// are signalled to re-read the store (its service set may have changed
/// wholesale).
pub(crate) fn update_project_inner(
    updated: Project,
    store_lock: &RwLock<StoreState>,
    notifier: &dyn StoreNotifier,
) -> Result<Project, AppError> {
    let mut store = write_store(store_lock)?;
    let was_active = store.active_project().map(|p| p.id) == Some(updated.id);
    let saved = store.update_project(updated)?;
    if was_active || store.active_project().map(|p| p.id) == Some(saved.id) {
        notifier.store_changed();
    }
    Ok(saved)
}

// ── get_project / get_active_project ──────────────────────────────────────────

/// Testable inner logic for [`get_project`].
pub(crate) fn get_project_inner(
    id: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<Project, AppError> {
    let uuid = parse_entity_id(id, "project")?;
    let store = read_store(store_lock)?;
    store
        .find(uuid)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("project {id} not found")))
}

/// Testable inner logic for [`get_active_project`].
///
/// `None` (not an error) when no project currently carries the sentinel name.
pub(crate) fn get_active_project_inner(
    store_lock: &RwLock<StoreState>,
) -> Result<Option<Project>, AppError> {
    let store = read_store(store_lock)?;
    Ok(store.active_project().cloned())
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// List all projects in the store as dashboard summaries.
#[tauri::command]
pub async fn list_projects(
    state: tauri::State<'_, AppState>,
) -> Result<Vec<ProjectSummary>, AppError> {
    list_projects_inner(&state.store)
}

/// Create a new project and return it for immediate display.
#[tauri::command]
pub async fn create_project(state: tauri::State<'_, AppState>) -> Result<Project, AppError> {
    create_project_inner(&state.store)
}

/// Replace a stored project with an edited copy.
///
/// Returns [`AppError::Conflict`] when the submitted revision is stale.
#[tauri::command]
pub async fn update_project(
    project: Project,
    state: tauri::State<'_, AppState>,
    app: tauri::AppHandle,
) -> Result<Project, AppError> {
    update_project_inner(project, &state.store, &crate::events::EventNotifier::new(app))
}

/// Fetch one project by internal id.
#[tauri::command]
pub async fn get_project(
    id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Project, AppError> {
    get_project_inner(&id, &state.store)
}

/// Fetch the active project, if any.
#[tauri::command]
pub async fn get_active_project(
    state: tauri::State<'_, AppState>,
) -> Result<Option<Project>, AppError> {
    get_active_project_inner(&state.store)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
