use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Adapter for host objects whose state is not otherwise exposed.
pub trait HiddenFields {
    fn hidden_field(&self, name: &str) -> Option<Value>;
}

/// Reads `field` from a host object through the adapter.
pub fn read_hidden_field(object: &dyn HiddenFields, field: &str) -> Result<Value> {
    object.hidden_field(field).ok_or_else(|| Error::FieldNotFound(field.to_string()))
}

/// Reads a top-level field of any serializable value, including fields that
/// are private to its crate.
pub fn read_serialized_field<T: Serialize + ?Sized>(object: &T, field: &str) -> Result<Value> {
    match serde_json::to_value(object)? {
        Value::Object(mut map) => {
            map.remove(field).ok_or_else(|| Error::FieldNotFound(field.to_string()))
        }
        _ => Err(Error::FieldNotFound(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Renderer {
        page: u32,
        #[serde(rename = "displayoptions")]
        display_options: Vec<&'static str>,
    }

    impl HiddenFields for Renderer {
        fn hidden_field(&self, name: &str) -> Option<Value> {
            match name {
                "page" => Some(json!(self.page)),
                _ => None,
            }
        }
    }

    fn renderer() -> Renderer {
        Renderer { page: 3, display_options: vec!["marks"] }
    }

    #[test]
    fn adapter_returns_known_field() {
        assert_eq!(read_hidden_field(&renderer(), "page").unwrap(), json!(3));
    }

    #[test]
    fn adapter_reports_unknown_field() {
        let err = read_hidden_field(&renderer(), "secret").unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(ref field) if field == "secret"));
    }

    #[test]
    fn serialized_field_uses_wire_name() {
        assert_eq!(read_serialized_field(&renderer(), "displayoptions").unwrap(), json!(["marks"]));
        assert!(read_serialized_field(&renderer(), "display_options").is_err());
    }

    #[test]
    fn serialized_field_on_scalar_fails() {
        assert!(matches!(read_serialized_field(&5, "page"), Err(Error::FieldNotFound(_))));
    }
}
