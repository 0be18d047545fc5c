//! A service selection inside a project.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog;

/// A snapshot of one catalog offering added to a project.
///
/// Snapshot, not reference: `price`, `option` and `description` are captured
/// at add time and never recalculated from the catalog afterward, so a quote
/// keeps the price the client saw when they selected the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    /// Synthetic id — removal and edits key off this, never off the bare
    /// service name (two departments may offer same-named services).
    pub id: Uuid,
    pub department: String,
    pub name: String,
    /// Tier label; defaults to `"Standard"`.
    pub option: String,
    /// Flat price captured at add time.
    pub price: f64,
    pub description: String,
}

impl ServiceSelection {
    /// Build a selection with the default tier and templated description.
    pub fn new(department: &str, name: &str, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            department: department.to_string(),
            name: name.to_string(),
            option: catalog::DEFAULT_OPTION.to_string(),
            price,
            description: catalog::default_description(department, name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_uses_standard_tier() {
        let s = ServiceSelection::new("Animation", "3D Modeling", 1000.0);
        assert_eq!(s.option, "Standard");
        assert_eq!(s.price, 1000.0);
    }

    #[test]
    fn new_selection_templates_description() {
        let s = ServiceSelection::new("Cinema", "Filming", 1000.0);
        assert!(s.description.contains("Cinema"));
        assert!(s.description.contains("Filming"));
    }

    #[test]
    fn selections_have_distinct_ids() {
        let a = ServiceSelection::new("Animation", "3D Modeling", 1000.0);
        let b = ServiceSelection::new("Animation", "3D Modeling", 1000.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn selection_serializes_camel_case() {
        let s = ServiceSelection::new("Animation", "Rendering", 1000.0);
        let value = serde_json::to_value(&s).expect("serialize");
        assert!(value.get("department").is_some());
        assert!(value.get("option").is_some());
        assert!(value.get("price").is_some());
    }
}
