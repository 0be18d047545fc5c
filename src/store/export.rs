//! Shareable single-project archive (`.qdproj`).
//!
//! # Export
//! 1. Build [`ExportManifest`] from the project.
//! 2. Write a complete ZIP archive to `<target>.tmp` (same directory → same
//!    filesystem as the final path): `project.json` plus each attachment's
//!    stored copy under `files/`.
//! 3. Atomically rename the temp file over the target.
//! On any failure the temp file is deleted and the original is left intact.
//!
//! # Import
//! 1. Open the ZIP and read `project.json`.
//! 2. Validate `schema_version == 1`; reject anything else with a clear error.
//! 3. Return the embedded [`Project`]. The caller (the import command) re-keys
//!    id, share id and name against the receiving store before appending.
//!    Attachment payloads are not extracted here; the stored copies travel in
//!    the archive for the receiving side's upload directory.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::error::AppError;
use crate::models::Project;

/// Name of the manifest inside every `.qdproj` ZIP.
const PROJECT_JSON: &str = "project.json";

/// QuoteDesk version embedded in every exported archive.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level structure of `project.json` inside a `.qdproj` archive.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportManifest {
    /// Format version; only version `1` is supported.
    schema_version: u32,
    /// QuoteDesk version string that wrote this archive.
    app_version: String,
    /// ISO-8601 export timestamp (UTC).
    exported_at: String,
    project: Project,
}

/// Export `project` to a `.qdproj` archive at `path` using an atomic write.
pub fn export(project: &Project, path: &Path) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    if let Err(e) = write_archive(project, &tmp_path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        AppError::ExportFailed(format!("rename to final path failed: {e}"))
    })
}

/// Read the project embedded in a `.qdproj` archive.
pub fn import(path: &Path) -> Result<Project, AppError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::ExportFailed(format!("cannot open archive: {e}")))?;

    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::ExportFailed(format!("not a valid ZIP archive: {e}")))?;

    let json_str = {
        let mut entry = archive.by_name(PROJECT_JSON).map_err(|e| {
            AppError::ExportFailed(format!("{PROJECT_JSON} not found in archive: {e}"))
        })?;
        let mut s = String::new();
        entry
            .read_to_string(&mut s)
            .map_err(|e| AppError::ExportFailed(format!("cannot read {PROJECT_JSON}: {e}")))?;
        s
    };

    let manifest: ExportManifest = serde_json::from_str(&json_str)
        .map_err(|e| AppError::ExportFailed(format!("cannot parse {PROJECT_JSON}: {e}")))?;

    if manifest.schema_version != 1 {
        return Err(AppError::ExportFailed(format!(
            "unsupported schema version {}; only schema version 1 is supported",
            manifest.schema_version
        )));
    }

    Ok(manifest.project)
}

/// Write the ZIP archive to `path` (the temp file location).
///
/// Separated from [`export`] so that cleanup on error is handled entirely by
/// the caller.
fn write_archive(project: &Project, path: &Path) -> Result<(), AppError> {
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::ExportFailed(format!("cannot create temp file: {e}")))?;

    let mut zip = zip::ZipWriter::new(file);
    let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let manifest = ExportManifest {
        schema_version: 1,
        app_version: APP_VERSION.to_string(),
        exported_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        project: project.clone(),
    };

    let json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| AppError::ExportFailed(format!("cannot serialize manifest: {e}")))?;

    zip.start_file(PROJECT_JSON, opts)
        .map_err(|e| AppError::ExportFailed(format!("cannot create {PROJECT_JSON} entry: {e}")))?;
    zip.write_all(json.as_bytes())
        .map_err(|e| AppError::ExportFailed(format!("cannot write {PROJECT_JSON}: {e}")))?;

    // Bundle the durable copy of each attachment. A missing stored copy is
    // skipped with a warning rather than failing the whole export — the
    // metadata in the manifest still describes it.
    for attachment in &project.files {
        let stored = Path::new(&attachment.stored_path);
        let bytes = match std::fs::read(stored) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    attachment = %attachment.name,
                    path = %stored.display(),
                    error = %e,
                    "stored upload missing, exporting metadata only"
                );
                continue;
            }
        };
        let entry_name = format!("files/{}-{}", attachment.id, attachment.name);
        zip.start_file(&entry_name, opts)
            .map_err(|e| AppError::ExportFailed(format!("cannot create file entry: {e}")))?;
        zip.write_all(&bytes)
            .map_err(|e| AppError::ExportFailed(format!("cannot write file entry: {e}")))?;
    }

    zip.finish()
        .map_err(|e| AppError::ExportFailed(format!("cannot finalize ZIP: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceSelection;
    use std::path::PathBuf;

    fn make_project() -> Project {
        let mut p = Project::new("Launch Teaser", "Zz99&*Kk".to_string());
        p.description = "30s teaser for the spring launch".to_string();
        p.add_service(ServiceSelection::new("Cinema", "Video Editing", 1000.0))
            .expect("add");
        p
    }

    fn temp(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quotedesk_export_test_{name}.qdproj"))
    }

    #[test]
    fn round_trip_preserves_project() {
        let project = make_project();
        let path = temp("round_trip");

        export(&project, &path).expect("export should succeed");
        let imported = import(&path).expect("import should succeed");
        let _ = std::fs::remove_file(&path);

        assert_eq!(imported.id, project.id);
        assert_eq!(imported.name, "Launch Teaser");
        assert_eq!(imported.services.len(), 1);
        assert_eq!(imported.services[0].name, "Video Editing");
    }

    #[test]
    fn export_with_missing_stored_upload_still_succeeds() {
        let mut project = make_project();
        project.add_file(crate::models::FileAttachment {
            id: uuid::Uuid::new_v4(),
            name: "gone.png".to_string(),
            description: String::new(),
            service_name: Some("Video Editing".to_string()),
            source_path: "/tmp/gone.png".to_string(),
            stored_path: "/nonexistent/uploads/gone.png".to_string(),
            checksum: "00".to_string(),
            size_bytes: 0,
        });
        let path = temp("missing_upload");

        export(&project, &path).expect("export must not fail on a missing stored copy");
        let imported = import(&path).expect("import");
        let _ = std::fs::remove_file(&path);

        // Metadata survives even though the payload was absent.
        assert_eq!(imported.files.len(), 1);
        assert_eq!(imported.files[0].name, "gone.png");
    }

    #[test]
    fn export_bundles_stored_uploads() {
        let payload_path = std::env::temp_dir().join("quotedesk_export_test_payload.bin");
        std::fs::write(&payload_path, b"reference frames").expect("write payload");

        let mut project = make_project();
        let attachment_id = uuid::Uuid::new_v4();
        project.add_file(crate::models::FileAttachment {
            id: attachment_id,
            name: "frames.bin".to_string(),
            description: String::new(),
            service_name: Some("Video Editing".to_string()),
            source_path: payload_path.to_string_lossy().into_owned(),
            stored_path: payload_path.to_string_lossy().into_owned(),
            checksum: "00".to_string(),
            size_bytes: 16,
        });
        let path = temp("bundled");

        export(&project, &path).expect("export");

        let file = std::fs::File::open(&path).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("valid ZIP");
        let entry_name = format!("files/{attachment_id}-frames.bin");
        assert!(
            archive.by_name(&entry_name).is_ok(),
            "stored upload must be bundled under files/"
        );

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&payload_path);
    }

    #[test]
    fn import_rejects_unknown_schema_version() {
        let path = temp("bad_schema");
        {
            let file = std::fs::File::create(&path).expect("create");
            let mut zip = zip::ZipWriter::new(file);
            let opts =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            zip.start_file("project.json", opts).expect("entry");
            let project = make_project();
            let manifest = serde_json::json!({
                "schemaVersion": 99,
                "appVersion": "0.1.0",
                "exportedAt": "",
                "project": project,
            });
            zip.write_all(manifest.to_string().as_bytes()).expect("write");
            zip.finish().expect("finish");
        }

        let result = import(&path);
        let _ = std::fs::remove_file(&path);

        match result.expect_err("should fail for schema version 99") {
            AppError::ExportFailed(msg) => {
                assert!(
                    msg.to_lowercase().contains("schema"),
                    "error message should mention 'schema', got: {msg}"
                );
            }
            other => panic!("expected AppError::ExportFailed, got {other:?}"),
        }
    }

    #[test]
    fn import_fails_gracefully_on_missing_file() {
        let result = import(Path::new("/nonexistent/path/project.qdproj"));
        assert!(matches!(result, Err(AppError::ExportFailed(_))));
    }
}
