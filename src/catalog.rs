//! Static service catalog.
//!
//! The catalog is fixed, hardcoded data: an ordered list of departments, each
//! with an ordered list of service names. It only populates selection UI —
//! a [`crate::models::ServiceSelection`] snapshots name, price and tier at the
//! moment it is added to a project and never refers back here.

/// Tier label assigned to a selection when none is chosen explicitly.
pub const DEFAULT_OPTION: &str = "Standard";

/// Project name sentinel that marks the *active* project — the implicit
/// target of "add this service" actions on marketing views.
pub const ACTIVE_PROJECT_NAME: &str = "Project Name";

/// Base name used by explicit project creation; collisions are suffixed with
/// an incrementing counter ("New Project 1", "New Project 2", …).
pub const NEW_PROJECT_BASE_NAME: &str = "New Project";

// Department order here is display order in the wizard.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Animation",
        &[
            "3D Modeling",
            "2D Animation",
            "Character Rigging",
            "Motion Graphics",
            "Rendering",
        ],
    ),
    (
        "Cinema",
        &[
            "Scriptwriting",
            "Filming",
            "Video Editing",
            "Color Grading",
            "Sound Design",
        ],
    ),
    (
        "AI Content",
        &[
            "AI Image Generation",
            "AI Video Generation",
            "Voice Synthesis",
            "Chatbot Content",
        ],
    ),
    (
        "Design",
        &["Brand Identity", "UI/UX Design", "Illustration", "Print Design"],
    ),
    (
        "Marketing",
        &["Social Media Kit", "Ad Campaign", "SEO Copywriting"],
    ),
];

/// All department names, in display order.
pub fn departments() -> Vec<&'static str> {
    CATALOG.iter().map(|(dept, _)| *dept).collect()
}

/// Ordered service names offered by `department`.
///
/// Unknown departments yield an empty slice rather than an error.
pub fn services_for(department: &str) -> &'static [&'static str] {
    CATALOG
        .iter()
        .find(|(dept, _)| *dept == department)
        .map(|(_, services)| *services)
        .unwrap_or(&[])
}

/// True when `department` offers a service called `name`.
pub fn offers(department: &str, name: &str) -> bool {
    services_for(department).contains(&name)
}

/// Default description template for a fresh selection.
pub fn default_description(department: &str, name: &str) -> String {
    format!("{name} service from our {department} department")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departments_are_listed_in_display_order() {
        let depts = departments();
        assert_eq!(
            depts,
            vec!["Animation", "Cinema", "AI Content", "Design", "Marketing"]
        );
    }

    #[test]
    fn services_for_known_department_preserves_order() {
        let services = services_for("Animation");
        assert_eq!(services[0], "3D Modeling");
        assert_eq!(services.len(), 5);
    }

    #[test]
    fn services_for_unknown_department_is_empty() {
        assert!(services_for("Catering").is_empty());
        assert!(services_for("").is_empty());
    }

    #[test]
    fn department_lookup_is_case_sensitive() {
        assert!(services_for("animation").is_empty());
    }

    #[test]
    fn offers_matches_exact_pairs_only() {
        assert!(offers("Animation", "3D Modeling"));
        assert!(!offers("Cinema", "3D Modeling"));
        assert!(!offers("Animation", "Catering"));
    }

    #[test]
    fn default_description_mentions_department_and_name() {
        let desc = default_description("Cinema", "Color Grading");
        assert!(desc.contains("Cinema"));
        assert!(desc.contains("Color Grading"));
    }
}
