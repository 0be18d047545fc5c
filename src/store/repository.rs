//! The storage boundary of the project store.
//!
//! The whole store is one serialized blob — an array of projects — and every
//! mutation rewrites it completely; there is no transactional boundary smaller
//! than "entire store". Reads degrade: a missing or corrupt blob is an empty
//! store (logged, never a user-facing error). Writes do surface failure so the
//! UI can warn that state will not survive a restart.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::AppError;
use crate::models::Project;

/// Storage medium for the full project collection.
///
/// Implementations must treat `save_all` as a complete overwrite; callers
/// always pass the entire updated collection, never a partial patch.
pub trait ProjectRepository: Send + Sync {
    /// Read the full collection. Absent or unparseable state yields an empty
    /// collection.
    fn load_all(&self) -> Vec<Project>;

    /// Overwrite the full collection.
    fn save_all(&self, projects: &[Project]) -> Result<(), AppError>;
}

/// Production repository: one pretty-printed JSON file.
///
/// Saves are atomic — the blob is written to `<name>.tmp` in the same
/// directory, then renamed over the target, so a crash mid-write leaves the
/// previous store intact.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectRepository for JsonFileRepository {
    fn load_all(&self) -> Vec<Project> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no project store yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read project store, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt project store, treating as empty");
                Vec::new()
            }
        }
    }

    fn save_all(&self, projects: &[Project]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::StoreSave(format!("cannot create store directory: {e}")))?;
        }

        let json = serde_json::to_string_pretty(projects)
            .map_err(|e| AppError::StoreSave(format!("cannot serialize project store: {e}")))?;

        let file_name = self
            .path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let tmp_path = self.path.with_file_name(format!("{file_name}.tmp"));

        if let Err(e) = std::fs::write(&tmp_path, json.as_bytes()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(AppError::StoreSave(format!("cannot write store blob: {e}")));
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            AppError::StoreSave(format!("rename to final path failed: {e}"))
        })
    }
}

/// In-memory repository.
///
/// The second medium behind the trait; used by tests and available for an
/// ephemeral "guest" mode where nothing should touch disk.
#[derive(Default)]
pub struct MemoryRepository {
    projects: Mutex<Vec<Project>>,
}

impl ProjectRepository for MemoryRepository {
    fn load_all(&self) -> Vec<Project> {
        match self.projects.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save_all(&self, projects: &[Project]) -> Result<(), AppError> {
        let mut guard = match self.projects.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = projects.to_vec();
        Ok(())
    }
}
