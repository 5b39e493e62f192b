use serde::{Deserialize, Serialize};

/// Content types accepted by the upload endpoint.
pub const ACCEPTED_CONTENT_TYPES: &[&str] =
    &["image/png", "image/jpeg", "image/jpg", "application/pdf"];

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Kind of document the model is asked to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Raster image (PNG or JPEG)
    Image,
    Pdf,
}

impl MediaKind {
    /// Resolve a declared content type, ignoring case and parameters.
    ///
    /// Returns `None` for anything outside `ACCEPTED_CONTENT_TYPES`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" | "image/jpeg" | "image/jpg" => Some(MediaKind::Image),
            "application/pdf" => Some(MediaKind::Pdf),
            _ => None,
        }
    }

    /// How the prompt refers to the document.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            MediaKind::Image => "certificate image",
            MediaKind::Pdf => "PDF certificate document",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Pdf => write!(f, "pdf"),
        }
    }
}
