use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-field confidence in [0, 1], keyed by record field name.
pub type FieldConfidences = BTreeMap<String, f64>;

/// Confidences attached to every model extraction.
///
/// Fixed per field; the model reports no uncertainty of its own.
pub const MODEL_FIELD_CONFIDENCES: [(&str, f64); 7] = [
    ("name", 0.9),
    ("rollNumber", 0.9),
    ("certificateId", 0.9),
    ("courseName", 0.9),
    ("institution", 0.9),
    ("year", 0.8),
    ("grade", 0.8),
];

pub fn model_field_confidences() -> FieldConfidences {
    MODEL_FIELD_CONFIDENCES
        .iter()
        .map(|(field, confidence)| (field.to_string(), *confidence))
        .collect()
}

/// Extraction pathway that produced a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ExtractionMethod {
    /// Multimodal generative model reading the whole document
    #[default]
    VisionModel,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::VisionModel => "vision_model",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExtractionMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "vision_model" => Ok(ExtractionMethod::VisionModel),
            _ => Err(anyhow::anyhow!("Invalid extraction method: {}", s)),
        }
    }
}

/// Certificate fields read from one uploaded document.
///
/// Text fields are never absent: unknown values are empty strings. Only
/// `certificate_id` is nullable, since many certificates carry no number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    pub name: String,
    pub roll_number: String,
    pub certificate_id: Option<String>,
    pub course_name: String,
    pub institution: String,
    pub year: String,
    pub grade: String,
    /// Not requested from the model; always empty.
    pub issue_date: String,
    pub field_confidences: FieldConfidences,
    pub extraction_method: ExtractionMethod,
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExtractedRecord {
    /// Record returned when nothing could be read.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            roll_number: String::new(),
            certificate_id: None,
            course_name: String::new(),
            institution: String::new(),
            year: String::new(),
            grade: String::new(),
            issue_date: String::new(),
            field_confidences: FieldConfidences::new(),
            extraction_method: ExtractionMethod::default(),
        }
    }

    /// True when no field carries a value.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.roll_number,
            &self.course_name,
            &self.institution,
            &self.year,
            &self.grade,
            &self.issue_date,
        ]
        .iter()
        .all(|v| v.is_empty())
            && self.certificate_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_shape() {
        let value = serde_json::to_value(ExtractedRecord::empty()).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "",
                "rollNumber": "",
                "certificateId": null,
                "courseName": "",
                "institution": "",
                "year": "",
                "grade": "",
                "issueDate": "",
                "fieldConfidences": {},
                "extractionMethod": "vision_model"
            })
        );
    }

    #[test]
    fn test_model_confidences() {
        let confidences = model_field_confidences();

        let expected: FieldConfidences = [
            ("name", 0.9),
            ("rollNumber", 0.9),
            ("certificateId", 0.9),
            ("courseName", 0.9),
            ("institution", 0.9),
            ("year", 0.8),
            ("grade", 0.8),
        ]
        .into_iter()
        .map(|(field, confidence)| (field.to_string(), confidence))
        .collect();

        assert_eq!(confidences, expected);
    }

    #[test]
    fn test_is_blank() {
        assert!(ExtractedRecord::empty().is_blank());

        let mut record = ExtractedRecord::empty();
        record.certificate_id = Some("C-1".into());
        assert!(!record.is_blank());
    }

    #[test]
    fn test_method_round_trips_through_str() {
        let method: ExtractionMethod = "vision_model".parse().unwrap();
        assert_eq!(method, ExtractionMethod::VisionModel);
        assert_eq!(method.to_string(), "vision_model");
        assert!("donut_primary".parse::<ExtractionMethod>().is_err());
    }
}
