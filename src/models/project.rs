//! The project aggregate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{FileAttachment, ServiceSelection};

/// A client's named collection of selected services and attached files —
/// the unit of checkout.
///
/// Both `services` and `files` are insertion-ordered; display and total
/// calculation follow that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Internal key; assigned at creation, never reassigned.
    pub id: Uuid,
    /// User-facing 8-character share id, unique within the store.
    pub unique_id: String,
    /// Display name. Unique at creation; freely editable afterward, including
    /// to the active-project sentinel.
    pub name: String,
    pub description: String,
    pub services: Vec<ServiceSelection>,
    pub files: Vec<FileAttachment>,
    /// Optimistic-concurrency token; bumped on every accepted update. A stale
    /// token rejects the update instead of silently losing the other write.
    pub revision: u64,
    /// ISO-8601 creation timestamp (UTC).
    pub created_at: String,
    /// ISO-8601 last-modified timestamp (UTC).
    pub modified_at: String,
}

/// Attachments bucketed under one service, in service insertion order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFileGroup {
    pub service_name: String,
    pub files: Vec<FileAttachment>,
}

impl Project {
    /// Build an empty project with fresh timestamps and revision 0.
    pub fn new(name: &str, unique_id: String) -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4(),
            unique_id,
            name: name.to_string(),
            description: String::new(),
            services: Vec::new(),
            files: Vec::new(),
            revision: 0,
            created_at: now.clone(),
            modified_at: now,
        }
    }

    /// Update the last-modified timestamp.
    pub fn touch(&mut self) {
        self.modified_at = now_rfc3339();
    }

    /// Append a selection.
    ///
    /// An exact duplicate `(department, name)` pair is rejected; the wizard
    /// disables the add control in that case, so reaching this error means a
    /// stale view.
    pub fn add_service(&mut self, selection: ServiceSelection) -> Result<(), AppError> {
        let duplicate = self
            .services
            .iter()
            .any(|s| s.department == selection.department && s.name == selection.name);
        if duplicate {
            return Err(AppError::InvalidInput(format!(
                "{} / {} is already part of this project",
                selection.department, selection.name
            )));
        }
        self.services.push(selection);
        self.touch();
        Ok(())
    }

    /// Remove the selection with the given id and return it.
    ///
    /// Cascade: every attachment referencing the removed service by name is
    /// removed as well — attachments cannot outlive their service.
    pub fn remove_service(&mut self, service_id: Uuid) -> Result<ServiceSelection, AppError> {
        let position = self
            .services
            .iter()
            .position(|s| s.id == service_id)
            .ok_or_else(|| AppError::NotFound(format!("service {service_id} not found")))?;
        let removed = self.services.remove(position);
        self.files
            .retain(|f| f.service_name.as_deref() != Some(removed.name.as_str()));
        self.touch();
        Ok(removed)
    }

    /// Current service names, in insertion order.
    pub fn service_names(&self) -> Vec<String> {
        self.services.iter().map(|s| s.name.clone()).collect()
    }

    /// True when some current selection carries this name.
    pub fn has_service_named(&self, name: &str) -> bool {
        self.services.iter().any(|s| s.name == name)
    }

    /// Append an attachment.
    pub fn add_file(&mut self, attachment: FileAttachment) {
        self.files.push(attachment);
        self.touch();
    }

    /// Replace name/description of the attachment with the given id.
    ///
    /// A `service_name` of `None` retains the previous association.
    pub fn update_file(
        &mut self,
        file_id: Uuid,
        name: &str,
        description: &str,
        service_name: Option<String>,
    ) -> Result<FileAttachment, AppError> {
        let entry = self
            .files
            .iter_mut()
            .find(|f| f.id == file_id)
            .ok_or_else(|| AppError::NotFound(format!("attachment {file_id} not found")))?;
        entry.name = name.to_string();
        entry.description = description.to_string();
        if let Some(service) = service_name {
            entry.service_name = Some(service);
        }
        let updated = entry.clone();
        self.touch();
        Ok(updated)
    }

    /// Remove the attachment with the given id and return it.
    pub fn remove_file(&mut self, file_id: Uuid) -> Result<FileAttachment, AppError> {
        let position = self
            .files
            .iter()
            .position(|f| f.id == file_id)
            .ok_or_else(|| AppError::NotFound(format!("attachment {file_id} not found")))?;
        let removed = self.files.remove(position);
        self.touch();
        Ok(removed)
    }

    /// Bucket attachments by owning service.
    ///
    /// Every current service gets a group, in service insertion order, even
    /// when it has no attachments yet. Unassociated attachments are not
    /// included; see [`Project::unassociated_files`].
    pub fn files_by_service(&self) -> Vec<ServiceFileGroup> {
        self.services
            .iter()
            .map(|service| ServiceFileGroup {
                service_name: service.name.clone(),
                files: self
                    .files
                    .iter()
                    .filter(|f| f.service_name.as_deref() == Some(service.name.as_str()))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Attachments with no owning service.
    pub fn unassociated_files(&self) -> Vec<FileAttachment> {
        self.files
            .iter()
            .filter(|f| f.service_name.is_none())
            .cloned()
            .collect()
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
