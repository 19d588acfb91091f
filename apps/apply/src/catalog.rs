use anyhow::{Context, Result};
use serde::Deserialize;

use crate::answers::Field;

/// Native input kinds the catalog may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Url,
    Number,
    Checkbox,
}

/// One catalog entry: which record field an input controls and how it is
/// rendered. Immutable for the lifetime of the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field_name: Field,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

/// The field catalog shipped with the binary. Owned outside this component;
/// consumed read-only at render time.
const FORM_FIELDS: &str = include_str!("../form_fields.json");

/// Parses the embedded catalog. Order is significant: fields render in
/// catalog order.
pub fn load_catalog() -> Result<Vec<FieldDescriptor>> {
    serde_json::from_str(FORM_FIELDS).context("Failed to parse embedded field catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses() {
        let catalog = load_catalog().unwrap();
        assert_eq!(catalog.len(), 24);
    }

    #[test]
    fn test_catalog_covers_every_record_field_once() {
        let catalog = load_catalog().unwrap();
        for field in Field::ALL {
            let count = catalog.iter().filter(|d| d.field_name == field).count();
            assert_eq!(count, 1, "field {field} should appear exactly once");
        }
    }

    #[test]
    fn test_catalog_order_and_kinds() {
        let catalog = load_catalog().unwrap();
        assert_eq!(catalog[0].field_name, Field::AgreeOnTakeTest);
        assert_eq!(catalog[0].kind, FieldKind::Checkbox);
        assert_eq!(catalog[2].field_name, Field::Email);
        assert_eq!(catalog[2].kind, FieldKind::Email);
        assert_eq!(catalog[23].field_name, Field::Storybook);
        assert_eq!(catalog[23].kind, FieldKind::Number);
    }

    #[test]
    fn test_unknown_catalog_entry_is_a_parse_error() {
        let raw = r#"[{ "fieldName": "salaryHistory", "type": "text" }]"#;
        let result: Result<Vec<FieldDescriptor>, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}
