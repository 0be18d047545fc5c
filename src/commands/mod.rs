//! Tauri IPC command handlers.
//!
//! Sub-modules are grouped by concern:
//! - [`project`]  — project lifecycle and queries
//! - [`services`] — service selection, active-project badge queries
//! - [`files`]    — attachment management
//! - [`pricing`]  — quote and invoice totals
//! - [`checkout`] — simulated order submission
//! - [`export`]   — shareable project archives
//!
//! All handlers follow the pattern of an `_inner` function (testable without
//! Tauri) wrapped by the `#[tauri::command]` entry point that extracts the
//! managed state.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::AppError;
use crate::state::StoreState;

pub mod checkout;
pub mod export;
pub mod files;
pub mod pricing;
pub mod project;
pub mod services;

/// Acquire a read lock on the store, mapping a poisoned lock to [`AppError::Io`].
pub(crate) fn read_store(
    lock: &RwLock<StoreState>,
) -> Result<RwLockReadGuard<'_, StoreState>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("store lock poisoned: {e}")))
}

/// Acquire a write lock on the store, mapping a poisoned lock to [`AppError::Io`].
pub(crate) fn write_store(
    lock: &RwLock<StoreState>,
) -> Result<RwLockWriteGuard<'_, StoreState>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("store lock poisoned: {e}")))
}

/// Parse an entity id sent over IPC.
///
/// A malformed id string and an unknown id are indistinguishable to the
/// frontend, so both map to [`AppError::NotFound`].
pub(crate) fn parse_entity_id(id: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(format!("{entity} {id} not found")))
}
