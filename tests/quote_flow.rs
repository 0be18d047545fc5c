//! End-to-end quote-builder scenarios over a real on-disk store.

use std::path::PathBuf;

use quotedesk_lib::models::{FileAttachment, Project, ServiceSelection};
use quotedesk_lib::pricing::quote;
use quotedesk_lib::state::StoreState;
use quotedesk_lib::store::{export, JsonFileRepository};

fn temp_store(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("quotedesk_flow_test_{tag}.json"))
}

fn open_store(path: &PathBuf) -> StoreState {
    StoreState::load(Box::new(JsonFileRepository::new(path.clone())))
}

fn attachment_for(service: &str, name: &str) -> FileAttachment {
    FileAttachment {
        id: uuid::Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        service_name: Some(service.to_string()),
        source_path: format!("/uploads/{name}"),
        stored_path: format!("/stored/{name}"),
        checksum: "00".to_string(),
        size_bytes: 1,
    }
}

#[test]
fn add_then_remove_service_clears_total_and_cascades_files() {
    let path = temp_store("add_remove");
    let _ = std::fs::remove_file(&path);
    let mut store = open_store(&path);

    // Empty store → create → add 3D Modeling at 1000.
    let project = store.create_project().expect("create");
    store
        .mutate_project(project.id, |p| {
            p.add_service(ServiceSelection::new("Animation", "3D Modeling", 1000.0))?;
            p.add_file(attachment_for("3D Modeling", "turntable.mp4"));
            Ok(())
        })
        .expect("add service and file");

    {
        let current = store.find(project.id).expect("stored");
        let total = quote::calculate_total(&current.services, "", false);
        assert_eq!(quote::round_for_display(total), 1000.00);
    }

    // Remove the service: services empty, total 0, tagged file gone.
    let service_id = store.find(project.id).expect("stored").services[0].id;
    store
        .mutate_project(project.id, |p| p.remove_service(service_id))
        .expect("remove service");

    let current = store.find(project.id).expect("stored");
    assert!(current.services.is_empty());
    assert_eq!(quote::calculate_total(&current.services, "", false), 0.0);
    assert!(
        current.files.is_empty(),
        "file tagged with the removed service must be gone"
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn name_collision_yields_suffixed_project() {
    let path = temp_store("collision");
    let _ = std::fs::remove_file(&path);
    let mut store = open_store(&path);

    let first = store.create_project().expect("first");
    assert_eq!(first.name, "New Project");
    let second = store.create_project().expect("second");
    assert_eq!(second.name, "New Project 1");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn store_survives_a_restart() {
    let path = temp_store("restart");
    let _ = std::fs::remove_file(&path);

    let project_id;
    let share_id;
    {
        let mut store = open_store(&path);
        let project = store.create_project().expect("create");
        project_id = project.id;
        share_id = project.unique_id.clone();
        store
            .mutate_project(project.id, |p| {
                p.description = "spring campaign".to_string();
                p.add_service(ServiceSelection::new("Marketing", "Ad Campaign", 1000.0))
            })
            .expect("mutate");
    }

    // A second session over the same blob sees the same state.
    let reopened = open_store(&path);
    let project = reopened.find(project_id).expect("reloaded project");
    assert_eq!(project.unique_id, share_id);
    assert_eq!(project.description, "spring campaign");
    assert_eq!(project.services.len(), 1);
    assert_eq!(project.services[0].name, "Ad Campaign");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_store_degrades_to_empty_and_recovers_on_next_save() {
    let path = temp_store("corrupt");
    std::fs::write(&path, "not json at all").expect("write corrupt blob");

    let mut store = open_store(&path);
    assert!(store.projects.is_empty(), "corrupt blob reads as empty");

    // The next mutation rewrites a healthy blob.
    store.create_project().expect("create");
    let reopened = open_store(&path);
    assert_eq!(reopened.projects.len(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn stale_update_is_rejected_after_restart_race() {
    let path = temp_store("race");
    let _ = std::fs::remove_file(&path);

    let mut store = open_store(&path);
    let original = store.create_project().expect("create");

    // "Tab A" edits and wins.
    let mut tab_a = original.clone();
    tab_a.name = "Documentary Pitch".to_string();
    store.update_project(tab_a).expect("tab A update");

    // "Tab B" still holds the original read; its write must not clobber A's.
    let mut tab_b = original.clone();
    tab_b.name = "Something Else".to_string();
    let result = store.update_project(tab_b);
    assert!(result.is_err(), "stale write must be rejected");
    assert_eq!(
        store.find(original.id).expect("stored").name,
        "Documentary Pitch"
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn exported_archive_imports_into_a_different_store() {
    let path_a = temp_store("export_a");
    let path_b = temp_store("export_b");
    let archive = std::env::temp_dir().join("quotedesk_flow_test_share.qdproj");
    let _ = std::fs::remove_file(&path_a);
    let _ = std::fs::remove_file(&path_b);

    let mut store_a = open_store(&path_a);
    let project = store_a.create_project().expect("create");
    store_a
        .mutate_project(project.id, |p| {
            p.add_service(ServiceSelection::new("AI Content", "Voice Synthesis", 1000.0))
        })
        .expect("add");

    let snapshot: Project = store_a.find(project.id).expect("stored").clone();
    export::export(&snapshot, &archive).expect("export");

    let mut store_b = open_store(&path_b);
    let imported = export::import(&archive).expect("read archive");
    let adopted = store_b.adopt_project(imported).expect("adopt");

    assert_ne!(adopted.id, project.id);
    assert_ne!(adopted.unique_id, project.unique_id);
    assert_eq!(adopted.services.len(), 1);
    assert_eq!(adopted.services[0].name, "Voice Synthesis");

    let _ = std::fs::remove_file(&path_a);
    let _ = std::fs::remove_file(&path_b);
    let _ = std::fs::remove_file(&archive);
}
