use serde_json::{Map, Value};

use super::normalize::ModelFields;

/// Locate the JSON object embedded in a free-text model response.
///
/// Returns the slice from the first `{` through the last `}` inclusive,
/// or `None` when either brace is missing or they are out of order. The
/// slice is not validated.
pub fn recover_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Strictly parse a recovered slice.
///
/// The slice must be one JSON object. A repeated key keeps its last value.
pub fn parse_model_fields(json: &str) -> Result<ModelFields, serde_json::Error> {
    let object: Map<String, Value> = serde_json::from_str(json)?;
    serde_json::from_value(Value::Object(object))
}
