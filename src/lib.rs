pub mod catalog;
pub mod commands;
pub mod error;
pub mod events;
pub mod ids;
pub mod models;
pub mod pricing;
pub mod settings;
pub mod state;
pub mod store;

use state::AppState;
use store::JsonFileRepository;

/// QuoteDesk Tauri application library entry point.
///
/// All Tauri builder setup lives here so it can be tested and referenced
/// by the thin `main.rs` binary wrapper.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // ── Tracing setup (must happen before anything else) ────────────────────
    //
    // Logs are written to a rolling-never (single) file in the OS data dir:
    //   Linux    ~/.local/share/quotedesk/quotedesk.log
    //   macOS    ~/Library/Application Support/quotedesk/quotedesk.log
    //   Windows  %LOCALAPPDATA%\quotedesk\quotedesk.log
    //
    // Log level is controlled by the RUST_LOG environment variable;
    // defaults to INFO when the variable is absent.
    let data_dir = dirs::data_local_dir()
        .unwrap_or_default()
        .join(settings::APP_DIR);

    // tracing_appender::rolling::never panics if it cannot open the log file,
    // so the directory tree is created first. Failure is silently ignored —
    // an unwritable home directory is already a fatal environment
    // misconfiguration.
    let _ = std::fs::create_dir_all(&data_dir);

    let file_appender = tracing_appender::rolling::never(&data_dir, "quotedesk.log");
    let (non_blocking, _tracing_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    tracing::info!("QuoteDesk starting");

    // ── Application state ────────────────────────────────────────────────────
    let app_settings = settings::load();
    let repository = JsonFileRepository::new(data_dir.join("projects.json"));
    let state = AppState::new(
        Box::new(repository),
        app_settings,
        data_dir.join("uploads"),
    );

    // ── Tauri builder ────────────────────────────────────────────────────────
    tauri::Builder::default()
        .manage(state)
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .invoke_handler(tauri::generate_handler![
            commands::project::list_projects,
            commands::project::create_project,
            commands::project::update_project,
            commands::project::get_project,
            commands::project::get_active_project,
            commands::services::add_service,
            commands::services::add_service_to_active,
            commands::services::remove_service,
            commands::services::selected_service_names,
            commands::services::catalog_departments,
            commands::services::catalog_services,
            commands::files::attach_files,
            commands::files::update_file_details,
            commands::files::remove_file,
            commands::files::files_by_service,
            commands::files::unassociated_files,
            commands::pricing::quote_totals,
            commands::pricing::invoice_totals,
            commands::checkout::submit_order,
            commands::export::export_project,
            commands::export::import_project,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
