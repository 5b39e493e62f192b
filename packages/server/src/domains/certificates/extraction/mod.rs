//! Certificate field extraction.
//!
//! Pipeline: build the prompt, send the document to the model, find the
//! JSON object in the free-text answer, normalize it into an
//! `ExtractedRecord`. Failures degrade to an empty record.

pub mod normalize;
pub mod prompt;
pub mod recovery;
pub mod service;

pub use normalize::{normalize, ModelFields};
pub use prompt::extraction_prompt;
pub use recovery::{parse_model_fields, recover_json_object};
pub use service::{CertificateExtractor, DocumentError, ExtractionError, ExtractionOutcome, ExtractionRequest};
