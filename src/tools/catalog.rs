//! Tool catalog: typed metadata, argument coercion, input schema generation.
//!
//! A `ToolEntry` describes what a tool accepts; the registry pairs it with the
//! handler that runs it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Int,
    Float,
    Bool,
    Optional(Box<ParamType>),
}

impl ParamType {
    /// Coerce a JSON value to this parameter type.
    ///
    /// Coercion is lax: numeric strings are accepted for numbers and integers,
    /// `"true"`/`"false"` for booleans, and whole floats for integers.
    pub fn coerce(&self, value: &Value) -> Result<Value, String> {
        match self {
            ParamType::String => match value {
                Value::String(_) => Ok(value.clone()),
                other => Err(format!("got {}", value_type_name(other))),
            },
            ParamType::Float => match value {
                Value::Number(_) => Ok(value.clone()),
                Value::String(s) => match s.trim().parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(json!(f)),
                    _ => Err(format!("got non-numeric string '{}'", s)),
                },
                other => Err(format!("got {}", value_type_name(other))),
            },
            ParamType::Int => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
                Value::Number(n) => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Ok(json!(f as i64))
                    }
                    _ => Err(format!("got fractional number {}", n)),
                },
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(|i| json!(i))
                    .map_err(|_| format!("got non-integer string '{}'", s)),
                other => Err(format!("got {}", value_type_name(other))),
            },
            ParamType::Bool => match value {
                Value::Bool(_) => Ok(value.clone()),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
                other => Err(format!("got {}", value_type_name(other))),
            },
            ParamType::Optional(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    inner.coerce(value)
                }
            }
        }
    }

    /// Human-readable type name used in error messages.
    pub fn display_name(&self) -> String {
        match self {
            ParamType::String => "string".to_string(),
            ParamType::Int => "integer".to_string(),
            ParamType::Float => "number".to_string(),
            ParamType::Bool => "boolean".to_string(),
            ParamType::Optional(inner) => format!("{} or null", inner.display_name()),
        }
    }

    /// JSON Schema fragment for this type.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::String => json!({ "type": "string" }),
            ParamType::Int => json!({ "type": "integer" }),
            ParamType::Float => json!({ "type": "number" }),
            ParamType::Bool => json!({ "type": "boolean" }),
            ParamType::Optional(inner) => json!({
                "anyOf": [inner.json_schema(), { "type": "null" }],
            }),
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// A single parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamDef {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            default: None,
        }
    }

    pub fn with_default(
        name: &str,
        param_type: ParamType,
        description: &str,
        default: Value,
    ) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none() && !matches!(self.param_type, ParamType::Optional(_))
    }
}

// =============================================================================
// Tool entry
// =============================================================================

/// Complete tool metadata entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamDef>,
}

impl ToolEntry {
    pub fn new(name: &str, description: &str, parameters: Vec<ParamDef>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    /// JSON Schema object describing the tool arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut schema = param.param_type.json_schema();
            if let Some(obj) = schema.as_object_mut() {
                obj.insert("description".to_string(), json!(param.description));
                if let Some(default) = &param.default {
                    obj.insert("default".to_string(), default.clone());
                }
            }
            properties.insert(param.name.clone(), schema);
        }

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Listing form: `{name, description, inputSchema}`.
    pub fn to_listing(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ToolEntry {
        ToolEntry::new(
            "summarize",
            "Summarize expenses",
            vec![
                ParamDef::required("start_date", ParamType::String, "Range start"),
                ParamDef::with_default(
                    "category",
                    ParamType::Optional(Box::new(ParamType::String)),
                    "Restrict to one category",
                    Value::Null,
                ),
            ],
        )
    }

    #[test]
    fn test_string_coercion() {
        let pt = ParamType::String;
        assert_eq!(pt.coerce(&json!("x")).unwrap(), json!("x"));
        assert!(pt.coerce(&json!(1)).unwrap_err().contains("got number"));
        assert!(pt.coerce(&Value::Null).unwrap_err().contains("got null"));
    }

    #[test]
    fn test_float_coercion() {
        let pt = ParamType::Float;
        assert_eq!(pt.coerce(&json!(12.5)).unwrap(), json!(12.5));
        assert_eq!(pt.coerce(&json!(20)).unwrap(), json!(20));
        assert_eq!(pt.coerce(&json!(" 7.25 ")).unwrap(), json!(7.25));
        assert!(pt.coerce(&json!("abc")).is_err());
        assert!(pt.coerce(&json!("NaN")).is_err());
        assert!(pt.coerce(&json!(true)).unwrap_err().contains("got boolean"));
    }

    #[test]
    fn test_int_coercion() {
        let pt = ParamType::Int;
        assert_eq!(pt.coerce(&json!(3)).unwrap(), json!(3));
        assert_eq!(pt.coerce(&json!(4.0)).unwrap(), json!(4));
        assert_eq!(pt.coerce(&json!("5")).unwrap(), json!(5));
        assert!(pt.coerce(&json!(4.5)).is_err());
        assert!(pt.coerce(&json!("5.5")).is_err());
    }

    #[test]
    fn test_bool_coercion() {
        let pt = ParamType::Bool;
        assert_eq!(pt.coerce(&json!(true)).unwrap(), json!(true));
        assert_eq!(pt.coerce(&json!("FALSE")).unwrap(), json!(false));
        assert!(pt.coerce(&json!(0)).is_err());
    }

    #[test]
    fn test_optional_coercion() {
        let pt = ParamType::Optional(Box::new(ParamType::Float));
        assert_eq!(pt.coerce(&Value::Null).unwrap(), Value::Null);
        assert_eq!(pt.coerce(&json!("1.5")).unwrap(), json!(1.5));
        assert!(pt.coerce(&json!([])).is_err());
        assert_eq!(pt.display_name(), "number or null");
    }

    #[test]
    fn test_is_required() {
        let entry = sample_entry();
        assert!(entry.parameters[0].is_required());
        assert!(!entry.parameters[1].is_required());
    }

    #[test]
    fn test_input_schema() {
        let schema = sample_entry().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["start_date"]));
        assert_eq!(schema["properties"]["start_date"]["type"], "string");
        assert_eq!(
            schema["properties"]["start_date"]["description"],
            "Range start"
        );
        assert_eq!(
            schema["properties"]["category"]["anyOf"],
            json!([{ "type": "string" }, { "type": "null" }])
        );
        assert_eq!(schema["properties"]["category"]["default"], Value::Null);
    }

    #[test]
    fn test_listing_shape() {
        let listing = sample_entry().to_listing();
        assert_eq!(listing["name"], "summarize");
        assert_eq!(listing["description"], "Summarize expenses");
        assert!(listing["inputSchema"].is_object());
    }
}
