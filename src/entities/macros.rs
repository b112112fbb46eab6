//! Macros for reducing boilerplate when defining entities
//!
//! Backend records are flat bags of optional fields. These macros generate
//! the struct and its [`Entity`](crate::core::entity::Entity) implementation
//! from a single field list that pairs each Rust field with its backend name.

/// Define a backend record type with automatic `Entity` implementation
///
/// Every generated type carries the common `id` and `type` fields. All fields
/// are optional; unset fields are omitted from the JSON rendering.
///
/// # Example
///
/// ```rust,ignore
/// use sw360_rest::prelude::*;
///
/// impl_rest_entity!(Vendor, "vendor", "vendors", {
///     fullname: String => "fullname",
///     shortname: String => "shortname",
///     url: String => "url",
/// });
///
/// let vendor = Vendor {
///     fullname: Some("Apache Software Foundation".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(vendor.field_value("shortname"), Some(FieldValue::Null));
/// ```
#[macro_export]
macro_rules! impl_rest_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        {
            $( $(#[$meta:meta])* $field:ident : $field_type:ty => $name:tt ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Backend identifier
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub id: Option<String>,

            /// Backend type discriminator
            #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
            pub entity_type: Option<String>,

            $(
                $(#[$meta])*
                #[serde(rename = $name, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$field_type>,
            )*
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn set_id(&mut self, id: String) {
                self.id = Some(id);
            }

            fn field_names() -> &'static [&'static str] {
                &["id", "type", $( $name ),*]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::FieldValue;
                match field {
                    "id" => Some(FieldValue::from_field(self.id.as_ref())),
                    "type" => Some(FieldValue::from_field(self.entity_type.as_ref())),
                    $( $name => Some(FieldValue::from_field(self.$field.as_ref())), )*
                    _ => None,
                }
            }

            fn copy_field_from(&mut self, source: &Self, field: &str) -> bool {
                match field {
                    "id" => self.id = source.id.clone(),
                    "type" => self.entity_type = source.entity_type.clone(),
                    $( $name => self.$field = source.$field.clone(), )*
                    _ => return false,
                }
                true
            }

            fn clear_field(&mut self, field: &str) -> bool {
                match field {
                    "id" => self.id = None,
                    "type" => self.entity_type = None,
                    $( $name => self.$field = None, )*
                    _ => return false,
                }
                true
            }

            fn merge_from(&mut self, patch: &Self) {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field.clone();
                    }
                )*
            }
        }
    };
}

/// Define a backend enum serialized in SCREAMING_SNAKE_CASE, as the backend does
///
/// # Example
///
/// ```rust,ignore
/// impl_backend_enum!(ProjectType { Customer, Internal, Product, Service, InnerSource });
/// assert_eq!(serde_json::to_string(&ProjectType::InnerSource)?, "\"INNER_SOURCE\"");
/// ```
#[macro_export]
macro_rules! impl_backend_enum {
    ( $type:ident { $( $variant:ident ),+ $(,)? } ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $type {
            $( $variant ),+
        }
    };
}
