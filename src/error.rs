//! Application-level error type returned by all Tauri command handlers.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so the
//! TypeScript frontend can pattern-match on a stable `kind` string.

/// Top-level error returned by Tauri command handlers.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
///
/// The TypeScript counterpart is:
/// ```ts
/// type AppError = { kind: string; message: string };
/// ```
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// A required file path does not exist on disk.
    #[error("file not found")]
    FileNotFound,

    /// A generic I/O error; the inner [`std::io::Error`] is converted to a
    /// string at the system boundary so it remains serializable.
    #[error("{0}")]
    Io(String),

    /// The project store blob could not be written.
    #[error("{0}")]
    StoreSave(String),

    /// The project store blob could not be parsed.
    ///
    /// Never returned from a plain load — a corrupt or missing store degrades
    /// to an empty project list with a warning log. This variant exists for
    /// paths that must report the condition explicitly.
    #[error("{0}")]
    StoreLoad(String),

    /// A requested resource (project, service, attachment) was not found.
    #[error("{0}")]
    NotFound(String),

    /// An update carried a stale revision token; the caller must re-read the
    /// store and retry.
    #[error("{0}")]
    Conflict(String),

    /// A precondition on the input was violated (empty service name, unknown
    /// catalog entry, duplicate selection, empty order).
    #[error("{0}")]
    InvalidInput(String),

    /// The export archive could not be written.
    #[error("{0}")]
    ExportFailed(String),
}

impl From<std::io::Error> for AppError {
    /// Convert an [`std::io::Error`] into an [`AppError::Io`].
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
