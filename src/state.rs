//! Application state managed by Tauri.
//!
//! [`AppState`] is registered with `tauri::Builder::manage` and accessed from
//! command handlers via `tauri::State<AppState>`. The project store lives
//! behind an [`RwLock`] so read commands (snapshot queries, badge lookups) do
//! not block each other; every mutating operation rewrites the full store
//! blob through the repository before returning.

use std::collections::HashSet;
use std::sync::RwLock;

use uuid::Uuid;

use crate::catalog::{ACTIVE_PROJECT_NAME, NEW_PROJECT_BASE_NAME};
use crate::error::AppError;
use crate::ids;
use crate::models::Project;
use crate::settings::AppSettings;
use crate::store::ProjectRepository;

/// The in-memory project store plus its storage medium.
pub struct StoreState {
    pub projects: Vec<Project>,
    repository: Box<dyn ProjectRepository>,
}

impl StoreState {
    /// Load the full store from `repository`. A missing or corrupt blob
    /// starts the session with an empty store (the repository logs it).
    pub fn load(repository: Box<dyn ProjectRepository>) -> Self {
        let projects = repository.load_all();
        tracing::info!(count = projects.len(), "project store loaded");
        Self {
            projects,
            repository,
        }
    }

    /// Rewrite the full store blob.
    pub fn persist(&self) -> Result<(), AppError> {
        self.repository.save_all(&self.projects)
    }

    /// Create a project with a fresh internal id, an unused share id and an
    /// auto-suffixed unique name, append it and persist.
    pub fn create_project(&mut self) -> Result<Project, AppError> {
        let name = self.unique_name(NEW_PROJECT_BASE_NAME);
        self.create_named(&name)
    }

    /// Create the *active* project — the sentinel-named implicit target used
    /// when a marketing view adds a service and no active project exists.
    pub fn create_active_project(&mut self) -> Result<Project, AppError> {
        self.create_named(ACTIVE_PROJECT_NAME)
    }

    fn create_named(&mut self, name: &str) -> Result<Project, AppError> {
        let share_ids: HashSet<String> =
            self.projects.iter().map(|p| p.unique_id.clone()).collect();
        let project = Project::new(name, ids::generate_unique_project_id(&share_ids));
        self.projects.push(project.clone());
        self.persist()?;
        tracing::info!(name = %project.name, share_id = %project.unique_id, "project created");
        Ok(project)
    }

    /// Replace the stored project whose `id` matches `updated.id` and persist.
    ///
    /// The revision token guards against stale copies: an update built from
    /// an outdated read is rejected with [`AppError::Conflict`] instead of
    /// silently overwriting a newer write. Internal key, share id and
    /// creation timestamp are authoritative on the stored side and carried
    /// over regardless of what the caller sent.
    pub fn update_project(&mut self, mut updated: Project) -> Result<Project, AppError> {
        let stored = self
            .projects
            .iter_mut()
            .find(|p| p.id == updated.id)
            .ok_or_else(|| AppError::NotFound(format!("project {} not found", updated.id)))?;

        if updated.revision != stored.revision {
            return Err(AppError::Conflict(format!(
                "project {} was modified elsewhere (stored revision {}, submitted {})",
                updated.id, stored.revision, updated.revision
            )));
        }

        updated.unique_id = stored.unique_id.clone();
        updated.created_at = stored.created_at.clone();
        updated.revision = stored.revision + 1;
        updated.touch();
        *stored = updated.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Run `mutate` against the project with the given id, bump its revision
    /// and persist. Nothing is persisted when `mutate` fails.
    pub fn mutate_project<T>(
        &mut self,
        id: Uuid,
        mutate: impl FnOnce(&mut Project) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("project {id} not found")))?;
        let value = mutate(project)?;
        project.revision += 1;
        self.persist()?;
        Ok(value)
    }

    /// Append an imported project, re-keyed against this store.
    ///
    /// Internal id, share id and revision are reissued; a taken name gets the
    /// usual counter suffix. The imported content (services, attachments,
    /// description) is kept as-is.
    pub fn adopt_project(&mut self, mut imported: Project) -> Result<Project, AppError> {
        let share_ids: HashSet<String> =
            self.projects.iter().map(|p| p.unique_id.clone()).collect();
        imported.id = Uuid::new_v4();
        imported.unique_id = ids::generate_unique_project_id(&share_ids);
        imported.name = self.unique_name(&imported.name);
        imported.revision = 0;
        imported.touch();
        self.projects.push(imported.clone());
        self.persist()?;
        tracing::info!(name = %imported.name, "project imported");
        Ok(imported)
    }

    /// The project with the given internal id.
    pub fn find(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The project whose name equals the active-project sentinel.
    pub fn active_project(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == ACTIVE_PROJECT_NAME)
    }

    /// `base` if unused, otherwise the first free `"{base} {n}"` with `n`
    /// counting up from 1.
    fn unique_name(&self, base: &str) -> String {
        let taken: HashSet<&str> = self.projects.iter().map(|p| p.name.as_str()).collect();
        if !taken.contains(base) {
            return base.to_string();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base} {n}");
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Root application state managed by Tauri.
pub struct AppState {
    /// The project store, guarded for concurrent read access.
    pub store: RwLock<StoreState>,
    /// Settings are read once at startup and never mutated afterwards.
    pub settings: AppSettings,
    /// Directory receiving durable copies of attached uploads.
    pub uploads_dir: std::path::PathBuf,
}

impl AppState {
    pub fn new(
        repository: Box<dyn ProjectRepository>,
        settings: AppSettings,
        uploads_dir: std::path::PathBuf,
    ) -> Self {
        Self {
            store: RwLock::new(StoreState::load(repository)),
            settings,
            uploads_dir,
        }
    }
}
