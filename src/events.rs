//! Cross-view store-change notification.
//!
//! After any mutation that changes which services belong to the *active*
//! project, every mounted view (wizard, marketing pages showing "Selected"
//! badges) must re-derive its display state by re-reading the store. The
//! contract is a payload-free, fire-and-forget signal: listeners that are not
//! mounted simply miss it and read fresh state on next mount. No delivery or
//! ordering guarantee beyond last-write-wins in the store itself.
//!
//! The signal is a trait rather than a bare event emit so command logic stays
//! testable without a running Tauri application.

/// App-wide event name listened to by frontend views.
pub const STORE_CHANGED_EVENT: &str = "store://changed";

/// Receiver of store-change signals.
pub trait StoreNotifier: Send + Sync {
    /// Signal that the store changed; best effort, must not block or fail.
    fn store_changed(&self);
}

/// Production notifier: emits [`STORE_CHANGED_EVENT`] to every window.
pub struct EventNotifier {
    handle: tauri::AppHandle,
}

impl EventNotifier {
    pub fn new(handle: tauri::AppHandle) -> Self {
        Self { handle }
    }
}

impl StoreNotifier for EventNotifier {
    fn store_changed(&self) {
        use tauri::Emitter as _;
        // Emission failure is not actionable by the mutation that triggered
        // it; views recover by reading the store on next mount.
        if let Err(e) = self.handle.emit(STORE_CHANGED_EVENT, ()) {
            tracing::warn!(error = %e, "failed to broadcast store change");
        }
    }
}

/// No-op notifier for contexts with no views to refresh.
pub struct NullNotifier;

impl StoreNotifier for NullNotifier {
    fn store_changed(&self) {}
}
