//! Certificates domain: reading uploaded certificates and storing the result.

pub mod extraction;
pub mod models;
pub mod store;

pub use extraction::{CertificateExtractor, ExtractionError, ExtractionOutcome};
pub use models::*;
pub use store::{CertificateStore, MemoryCertificateStore, PostgresCertificateStore, StoreError};
