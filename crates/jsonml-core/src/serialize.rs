//! JsonML wire codec
//!
//! Maps [`JsonMl`] values to and from their JSON array form:
//!
//! ```text
//! "text"                                 Text
//! ["tag", {"name": "value"}?, child...]  Element
//! ["!", "DOCTYPE html"]                  Declaration
//! ```

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::ast::{JsonMl, Props, DECLARATION_TAG};
use crate::options::SerializeOptions;
use crate::{CoreError, Result};

impl Serialize for JsonMl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JsonMl::Text(text) => serializer.serialize_str(text),

            JsonMl::Element {
                tag,
                props,
                children,
            } => {
                let mut seq = serializer.serialize_seq(self.array_len())?;
                seq.serialize_element(tag)?;
                if let Some(props) = props {
                    seq.serialize_element(props)?;
                }
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }

            JsonMl::Declaration(declaration) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(DECLARATION_TAG)?;
                seq.serialize_element(declaration)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonMl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        JsonMl::try_from(value).map_err(D::Error::custom)
    }
}

impl TryFrom<Value> for JsonMl {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(JsonMl::Text(text)),
            Value::Array(items) => decode_array(items),
            other => Err(CoreError::InvalidShape(format!(
                "expected string or array, found {}",
                kind_of(&other)
            ))),
        }
    }
}

impl JsonMl {
    /// Read a JsonML value from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        JsonMl::try_from(value)
    }
}

/// Render a JsonML value as JSON text
pub fn to_string(value: &JsonMl, options: &SerializeOptions) -> Result<String> {
    let json = if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn decode_array(items: Vec<Value>) -> Result<JsonMl> {
    let mut items = items.into_iter();

    let tag = match items.next() {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(CoreError::InvalidShape(format!(
                "array tag must be a string, found {}",
                kind_of(&other)
            )))
        }
        None => return Err(CoreError::InvalidShape("empty array".to_string())),
    };

    if tag == DECLARATION_TAG {
        return match (items.next(), items.next()) {
            (Some(Value::String(declaration)), None) => Ok(JsonMl::Declaration(declaration)),
            _ => Err(CoreError::InvalidShape(
                "declaration must be [\"!\", string]".to_string(),
            )),
        };
    }

    let mut items = items.peekable();
    let props = match items.next_if(Value::is_object) {
        Some(Value::Object(map)) => Some(decode_props(map)?),
        _ => None,
    };

    let children = items.map(JsonMl::try_from).collect::<Result<Vec<_>>>()?;

    Ok(JsonMl::Element {
        tag,
        props,
        children,
    })
}

fn decode_props(map: serde_json::Map<String, Value>) -> Result<Props> {
    let mut props = Props::with_capacity(map.len());
    for (name, value) in map {
        match value {
            Value::String(value) => {
                props.insert(name, value);
            }
            other => {
                return Err(CoreError::InvalidShape(format!(
                    "property `{}` must be a string, found {}",
                    name,
                    kind_of(&other)
                )))
            }
        }
    }
    Ok(props)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(value: &JsonMl) -> Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn test_text_is_bare_string() {
        assert_eq!(wire(&JsonMl::text("Hello")), json!("Hello"));
    }

    #[test]
    fn test_element_without_props() {
        let jml = JsonMl::element("p").with_child(JsonMl::text("Hi"));
        assert_eq!(wire(&jml), json!(["p", "Hi"]));
    }

    #[test]
    fn test_element_with_props_keeps_order() {
        let jml = JsonMl::element("a")
            .with_prop("href", "https://example.com")
            .with_prop("title", "Example")
            .with_child(JsonMl::text("Link"));
        assert_eq!(
            to_string(&jml, &SerializeOptions::compact()).unwrap(),
            r#"["a",{"href":"https://example.com","title":"Example"},"Link"]"#
        );
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            wire(&JsonMl::declaration("DOCTYPE html")),
            json!(["!", "DOCTYPE html"])
        );
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let jml = JsonMl::element("ul").with_child(JsonMl::element("li"));
        let out = to_string(&jml, &SerializeOptions::pretty()).unwrap();
        assert!(out.contains('\n'));
        assert_eq!(JsonMl::from_json(&out).unwrap(), jml);
    }

    #[test]
    fn test_decode_nested_document() {
        let jml = JsonMl::from_json(
            r#"["", ["!", "DOCTYPE html"], ["html", ["body", {"class": "x"}, "text", ["br"]]]]"#,
        )
        .unwrap();

        let expected = JsonMl::element("")
            .with_child(JsonMl::declaration("DOCTYPE html"))
            .with_child(
                JsonMl::element("html").with_child(
                    JsonMl::element("body")
                        .with_prop("class", "x")
                        .with_child(JsonMl::text("text"))
                        .with_child(JsonMl::element("br")),
                ),
            );
        assert_eq!(jml, expected);
    }

    #[test]
    fn test_decode_empty_props_object() {
        let jml = JsonMl::from_json(r#"["div", {}]"#).unwrap();
        assert_eq!(jml.props().map(|p| p.len()), Some(0));
        assert!(jml.children().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        for bad in [
            "[]",
            "[1]",
            "42",
            "null",
            r#"["!"]"#,
            r#"["!", "a", "b"]"#,
            r#"["div", {"id": 1}]"#,
            r#"["div", true]"#,
        ] {
            match JsonMl::from_json(bad) {
                Err(CoreError::InvalidShape(_)) => {}
                other => panic!("{bad}: expected InvalidShape, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            JsonMl::from_json("[\"div\""),
            Err(CoreError::Json(_))
        ));
    }

    #[test]
    fn test_deserialize_via_serde() {
        let jml: JsonMl = serde_json::from_value(json!(["b", "bold"])).unwrap();
        assert_eq!(jml, JsonMl::element("b").with_child(JsonMl::text("bold")));
    }
}
