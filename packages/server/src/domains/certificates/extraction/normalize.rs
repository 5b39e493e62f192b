use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domains::certificates::models::{
    model_field_confidences, ExtractedRecord, ExtractionMethod,
};

/// The JSON object the model is asked to produce.
///
/// Every key is optional. Scalars that are not strings (`"year": 2020`)
/// are kept as their JSON text; nested arrays and objects are ignored.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct ModelFields {
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub roll_no: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub certificate_no: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub course: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    #[schemars(with = "Option<String>")]
    pub grade: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => None,
    })
}

/// Map the model's keys onto an `ExtractedRecord`.
///
/// `roll_no`, `certificate_no` and `course` are renamed; the rest map by
/// name. Missing text becomes `""`, a missing certificate number stays
/// `None`. `month` is not part of the record.
pub fn normalize(fields: ModelFields) -> ExtractedRecord {
    let ModelFields {
        name,
        roll_no,
        certificate_no,
        course,
        institution,
        month: _,
        year,
        grade,
    } = fields;

    ExtractedRecord {
        name: name.unwrap_or_default(),
        roll_number: roll_no.unwrap_or_default(),
        certificate_id: certificate_no,
        course_name: course.unwrap_or_default(),
        institution: institution.unwrap_or_default(),
        year: year.unwrap_or_default(),
        grade: grade.unwrap_or_default(),
        issue_date: String::new(),
        field_confidences: model_field_confidences(),
        extraction_method: ExtractionMethod::VisionModel,
    }
}
