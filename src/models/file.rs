//! Attachment metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata record for one uploaded file.
///
/// The raw upload handle is never persisted; the durable copy under the app
/// uploads directory (`stored_path`) is the reference that survives restarts.
/// Update and remove operations key off the stable `id`, never off a position
/// in the project's attachment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub id: Uuid,
    /// Display name, independently editable from the upload's original name.
    pub name: String,
    pub description: String,
    /// Name of the owning service within the same project; `None` means the
    /// attachment is unassociated.
    pub service_name: Option<String>,
    /// Path the upload was taken from.
    pub source_path: String,
    /// Durable copy under the app uploads directory.
    pub stored_path: String,
    /// SHA-256 hex digest of the content at attach time.
    pub checksum: String,
    pub size_bytes: u64,
}
