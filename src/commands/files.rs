//! Attachment command handlers.
//!
//! Attaching copies each upload into the app uploads directory and records
//! metadata plus a SHA-256 fingerprint; the durable copy is what survives a
//! restart, never the original handle. All edits and removals are keyed by
//! the attachment's stable id.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Deserialize;
use sha2::Digest as _;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{FileAttachment, ServiceFileGroup};
use crate::state::{AppState, StoreState};

use super::{parse_entity_id, read_store, write_store};

/// Fields of an attachment edit; `service_name` of `None` keeps the current
/// association.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDetailsInput {
    pub name: String,
    pub description: String,
    pub service_name: Option<String>,
}

// ── attach_files ──────────────────────────────────────────────────────────────

/// Testable inner logic for [`attach_files`].
///
/// Preconditions: `service_name` must be non-empty and name a service that is
/// currently part of the project (the wizard disables the upload control
/// otherwise), and every path must exist. Each upload is copied into
/// `uploads_dir` under a fresh name, fingerprinted, and appended with an
/// empty description.
pub(crate) fn attach_files_inner(
    project_id: &str,
    service_name: &str,
    paths: &[String],
    uploads_dir: &Path,
    store_lock: &RwLock<StoreState>,
) -> Result<Vec<FileAttachment>, AppError> {
    if service_name.is_empty() {
        return Err(AppError::InvalidInput(
            "a service must be selected before uploading files".to_string(),
        ));
    }
    let uuid = parse_entity_id(project_id, "project")?;

    let mut store = write_store(store_lock)?;
    {
        let project = store
            .find(uuid)
            .ok_or_else(|| AppError::NotFound(format!("project {project_id} not found")))?;
        if !project.has_service_named(service_name) {
            return Err(AppError::InvalidInput(format!(
                "service {service_name:?} is not part of this project"
            )));
        }
    }

    // Copy everything into the uploads dir before touching the store, so a
    // failed upload leaves the project unchanged.
    let mut attachments = Vec::with_capacity(paths.len());
    for path_str in paths {
        attachments.push(ingest_upload(path_str, service_name, uploads_dir)?);
    }

    store.mutate_project(uuid, |project| {
        for attachment in &attachments {
            project.add_file(attachment.clone());
        }
        Ok(())
    })?;
    Ok(attachments)
}

/// Copy one upload into `uploads_dir` and build its metadata record.
fn ingest_upload(
    path_str: &str,
    service_name: &str,
    uploads_dir: &Path,
) -> Result<FileAttachment, AppError> {
    let source = PathBuf::from(path_str);
    if !source.exists() {
        return Err(AppError::FileNotFound);
    }

    let bytes = std::fs::read(&source).map_err(|e| AppError::Io(e.to_string()))?;
    let digest = sha2::Sha256::digest(&bytes);

    let display_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let id = Uuid::new_v4();
    std::fs::create_dir_all(uploads_dir).map_err(|e| AppError::Io(e.to_string()))?;
    let stored = uploads_dir.join(format!("{id}-{display_name}"));
    std::fs::write(&stored, &bytes).map_err(|e| AppError::Io(e.to_string()))?;

    Ok(FileAttachment {
        id,
        name: display_name,
        description: String::new(),
        service_name: Some(service_name.to_string()),
        source_path: path_str.to_string(),
        stored_path: stored.to_string_lossy().into_owned(),
        checksum: format!("{digest:x}"),
        size_bytes: bytes.len() as u64,
    })
}

// ── update_file_details ───────────────────────────────────────────────────────

/// Testable inner logic for [`update_file_details`].
pub(crate) fn update_file_details_inner(
    project_id: &str,
    file_id: &str,
    input: FileDetailsInput,
    store_lock: &RwLock<StoreState>,
) -> Result<FileAttachment, AppError> {
    let project_uuid = parse_entity_id(project_id, "project")?;
    let file_uuid = parse_entity_id(file_id, "attachment")?;

    let mut store = write_store(store_lock)?;
    store.mutate_project(project_uuid, |project| {
        project.update_file(file_uuid, &input.name, &input.description, input.service_name)
    })
}

// ── remove_file ───────────────────────────────────────────────────────────────

/// Testable inner logic for [`remove_file`].
///
/// The durable copy is deleted best-effort: a failure to unlink is logged,
/// the metadata removal still stands.
pub(crate) fn remove_file_inner(
    project_id: &str,
    file_id: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<(), AppError> {
    let project_uuid = parse_entity_id(project_id, "project")?;
    let file_uuid = parse_entity_id(file_id, "attachment")?;

    let mut store = write_store(store_lock)?;
    let removed = store.mutate_project(project_uuid, |project| project.remove_file(file_uuid))?;
    if let Err(e) = std::fs::remove_file(&removed.stored_path) {
        tracing::warn!(path = %removed.stored_path, error = %e, "could not delete stored upload");
    }
    Ok(())
}

// ── grouping queries ──────────────────────────────────────────────────────────

/// Testable inner logic for [`files_by_service`].
pub(crate) fn files_by_service_inner(
    project_id: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<Vec<ServiceFileGroup>, AppError> {
    let uuid = parse_entity_id(project_id, "project")?;
    let store = read_store(store_lock)?;
    let project = store
        .find(uuid)
        .ok_or_else(|| AppError::NotFound(format!("project {project_id} not found")))?;
    Ok(project.files_by_service())
}

/// Testable inner logic for [`unassociated_files`].
pub(crate) fn unassociated_files_inner(
    project_id: &str,
    store_lock: &RwLock<StoreState>,
) -> Result<Vec<FileAttachment>, AppError> {
    let uuid = parse_entity_id(project_id, "project")?;
    let store = read_store(store_lock)?;
    let project = store
        .find(uuid)
        .ok_or_else(|| AppError::NotFound(format!("project {project_id} not found")))?;
    Ok(project.unassociated_files())
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Attach uploads to a service within a project.
///
/// Returns the created attachment records so the frontend can display them
/// with their assigned ids.
#[tauri::command]
pub async fn attach_files(
    project_id: String,
    service_name: String,
    paths: Vec<String>,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<FileAttachment>, AppError> {
    attach_files_inner(
        &project_id,
        &service_name,
        &paths,
        &state.uploads_dir,
        &state.store,
    )
}

/// Edit an attachment's display name, description and (optionally) owning
/// service.
#[tauri::command]
pub async fn update_file_details(
    project_id: String,
    file_id: String,
    input: FileDetailsInput,
    state: tauri::State<'_, AppState>,
) -> Result<FileAttachment, AppError> {
    update_file_details_inner(&project_id, &file_id, input, &state.store)
}

/// Remove an attachment and its stored copy.
#[tauri::command]
pub async fn remove_file(
    project_id: String,
    file_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    remove_file_inner(&project_id, &file_id, &state.store)
}

/// Attachments bucketed per service (empty buckets included).
#[tauri::command]
pub async fn files_by_service(
    project_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<ServiceFileGroup>, AppError> {
    files_by_service_inner(&project_id, &state.store)
}

/// Attachments with no owning service.
#[tauri::command]
pub async fn unassociated_files(
    project_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<Vec<FileAttachment>, AppError> {
    unassociated_files_inner(&project_id, &state.store)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
