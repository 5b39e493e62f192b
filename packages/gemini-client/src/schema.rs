//! Type-safe response schemas for Gemini JSON mode.
//!
//! Gemini's `responseSchema` accepts a subset of OpenAPI 3.0 rather than
//! JSON Schema: upper-case type names, `nullable` instead of type unions,
//! no `$ref`, no `additionalProperties`. Schemas are generated with
//! `schemars` and rewritten into that subset.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::ResponseSchema;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Receipt {
//!     merchant: String,
//!     total: Option<String>,
//! }
//!
//! let schema = Receipt::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys Gemini understands inside a schema object.
const ALLOWED_KEYS: &[&str] = &[
    "type",
    "format",
    "description",
    "nullable",
    "enum",
    "properties",
    "required",
    "items",
];

/// Trait for types that can constrain Gemini JSON output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait ResponseSchema: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible response schema for this type.
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);
        to_gemini_schema(&value)
    }
}

impl<T: JsonSchema + DeserializeOwned> ResponseSchema for T {}

/// Rewrite a (ref-free) JSON Schema node into Gemini's OpenAPI subset.
fn to_gemini_schema(value: &Value) -> Value {
    let Value::Object(map) = value else {
        return value.clone();
    };

    let mut out = Map::new();

    match map.get("type") {
        Some(Value::String(t)) => {
            out.insert("type".into(), Value::String(t.to_uppercase()));
        }
        Some(Value::Array(types)) => {
            // ["string", "null"] -> type: STRING, nullable: true
            let mut nullable = false;
            for t in types.iter().filter_map(Value::as_str) {
                if t == "null" {
                    nullable = true;
                } else if !out.contains_key("type") {
                    out.insert("type".into(), Value::String(t.to_uppercase()));
                }
            }
            if nullable {
                out.insert("nullable".into(), Value::Bool(true));
            }
        }
        _ => {}
    }

    for (key, v) in map {
        if key == "type" || !ALLOWED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let converted = match key.as_str() {
            "properties" => match v {
                Value::Object(props) => Value::Object(
                    props
                        .iter()
                        .map(|(name, schema)| (name.clone(), to_gemini_schema(schema)))
                        .collect(),
                ),
                other => other.clone(),
            },
            "items" => to_gemini_schema(v),
            _ => v.clone(),
        };
        out.insert(key.clone(), converted);
    }

    Value::Object(out)
}

/// Inline all `$ref` references with the schema from `definitions`.
fn inline_refs(value: &mut Value) {
    let definitions = if let Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}
