use crate::domains::certificates::models::MediaKind;

/// Instruction sent with every document.
///
/// Asks for a bare JSON object with a fixed key set; `certificate_no` may
/// be null because many certificates have no number printed.
pub fn extraction_prompt(kind: MediaKind) -> String {
    format!(
        r#"From this {}, extract the following information and return it as a JSON object:

{{
    "name": "full_name_of_student",
    "roll_no": "student_roll_number",
    "certificate_no": "certificate_identification_number",
    "course": "course_name",
    "institution": "institution_or_university_name",
    "month": "month_of_completion",
    "year": "year_of_completion",
    "grade": "final_grade_or_score"
}}

Make sure the response is a single, valid JSON object and nothing else. Some certificates have no certificate number; in that case return null for "certificate_no"."#,
        kind.prompt_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 8] = [
        "name",
        "roll_no",
        "certificate_no",
        "course",
        "institution",
        "month",
        "year",
        "grade",
    ];

    #[test]
    fn test_prompt_lists_every_key() {
        let prompt = extraction_prompt(MediaKind::Image);
        for key in KEYS {
            assert!(prompt.contains(&format!("\"{}\":", key)), "missing {}", key);
        }
    }

    #[test]
    fn test_prompt_names_document_kind() {
        assert!(extraction_prompt(MediaKind::Image).starts_with("From this certificate image,"));
        assert!(extraction_prompt(MediaKind::Pdf).starts_with("From this PDF certificate document,"));
    }

    #[test]
    fn test_prompt_allows_null_certificate_number() {
        let prompt = extraction_prompt(MediaKind::Pdf);
        assert!(prompt.contains("return null for \"certificate_no\""));
        assert!(prompt.contains("single, valid JSON object and nothing else"));
    }
}
