//! Entity trait defining name-addressable access to backend records

use crate::core::field::FieldValue;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for all backend records exposed by the resource server.
///
/// The core never looks at an entity's concrete shape. It only needs:
/// - the resource names used in URLs and error messages
/// - the record's id
/// - read access to a field by its backend name
/// - the ability to copy a named field from another record of the same type
///
/// Implementations are generated by [`impl_rest_entity!`](crate::impl_rest_entity).
pub trait Entity: Clone + Default + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name used in URLs (e.g., "components")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "component")
    fn resource_name_singular() -> &'static str;

    /// Get the identifier, if the record has one
    fn id(&self) -> Option<&str>;

    /// Set the identifier
    fn set_id(&mut self, id: String);

    /// Backend names of every field of this type, in declaration order
    fn field_names() -> &'static [&'static str];

    /// Get the value of a field by its backend name
    ///
    /// Returns `None` for an unknown field name and `Some(FieldValue::Null)`
    /// for a known field that is unset.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Copy one field from `source` onto `self`
    ///
    /// Returns false when `field` is not a field of this type.
    fn copy_field_from(&mut self, source: &Self, field: &str) -> bool;

    /// Clear one field. Returns false for an unknown field name.
    fn clear_field(&mut self, field: &str) -> bool;

    /// Copy every field that is set on `patch` onto `self`
    fn merge_from(&mut self, patch: &Self);

    /// Check whether `field` is a field of this type
    fn has_field(field: &str) -> bool {
        Self::field_names().contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::impl_rest_entity!(Gadget, "gadget", "gadgets", {
        name: String => "name",
        serial_number: String => "serialNumber",
        weight: i64 => "weight",
    });

    fn gadget() -> Gadget {
        Gadget {
            id: Some("g-1".to_string()),
            entity_type: Some("gadget".to_string()),
            name: Some("widget".to_string()),
            serial_number: Some("SN-9".to_string()),
            weight: Some(12),
        }
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(Gadget::resource_name(), "gadgets");
        assert_eq!(Gadget::resource_name_singular(), "gadget");
        assert_eq!(
            Gadget::field_names(),
            &["id", "type", "name", "serialNumber", "weight"]
        );
        assert!(Gadget::has_field("serialNumber"));
        assert!(!Gadget::has_field("serial_number"));
    }

    #[test]
    fn test_field_value_by_backend_name() {
        let g = gadget();
        assert_eq!(g.id(), Some("g-1"));
        assert_eq!(
            g.field_value("serialNumber"),
            Some(FieldValue::String("SN-9".to_string()))
        );
        assert_eq!(g.field_value("weight"), Some(FieldValue::Integer(12)));
        assert_eq!(g.field_value("nope"), None);
        assert_eq!(Gadget::default().field_value("name"), Some(FieldValue::Null));
    }

    #[test]
    fn test_copy_and_clear_field() {
        let source = gadget();
        let mut target = Gadget::default();
        assert!(target.copy_field_from(&source, "name"));
        assert!(!target.copy_field_from(&source, "colour"));
        assert_eq!(target.name.as_deref(), Some("widget"));
        assert!(target.serial_number.is_none());

        assert!(target.clear_field("name"));
        assert!(target.name.is_none());
        assert!(!target.clear_field("colour"));
    }

    #[test]
    fn test_merge_only_copies_set_fields() {
        let mut target = gadget();
        let patch = Gadget {
            weight: Some(40),
            ..Default::default()
        };
        target.merge_from(&patch);
        assert_eq!(target.weight, Some(40));
        assert_eq!(target.name.as_deref(), Some("widget"));
        assert_eq!(target.id(), Some("g-1"));
    }

    #[test]
    fn test_serializes_backend_names_and_skips_unset() {
        let g = Gadget {
            id: Some("g-2".to_string()),
            serial_number: Some("SN-1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json, serde_json::json!({"id": "g-2", "serialNumber": "SN-1"}));
    }
}
