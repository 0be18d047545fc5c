//! Project archive export and import command handlers.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AppError;
use crate::models::Project;
use crate::state::{AppState, StoreState};
use crate::store::export;

use super::{parse_entity_id, read_store, write_store};

/// Testable inner logic for [`export_project`].
pub(crate) fn export_project_inner(
    project_id: &str,
    dest: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<(), AppError> {
    let uuid = parse_entity_id(project_id, "project")?;
    let project = {
        let store = read_store(store_lock)?;
        store
            .find(uuid)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("project {project_id} not found")))?
    };
    export::export(&project, &PathBuf::from(dest))
}

/// Testable inner logic for [`import_project`].
///
/// The embedded project is re-keyed against the receiving store: fresh
/// internal id and share id, counter-suffixed name on collision.
pub(crate) fn import_project_inner(
    src: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<Project, AppError> {
    let imported = export::import(&PathBuf::from(src))?;
    let mut store = write_store(store_lock)?;
    store.adopt_project(imported)
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Write a shareable `.qdproj` archive for one project.
#[tauri::command]
pub async fn export_project(
    project_id: String,
    dest: String,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    export_project_inner(&project_id, &dest, &state.store)
}

/// Import a `.qdproj` archive as a new project in this store.
#[tauri::command]
pub async fn import_project(
    src: String,
    state: tauri::State<'_, AppState>,
) -> Result<Project, AppError> {
    import_project_inner(&src, &state.store)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
