//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by the HTTP
//! handlers. All external services use trait abstractions to enable testing.

use std::sync::Arc;

use crate::domains::certificates::extraction::CertificateExtractor;
use crate::domains::certificates::store::CertificateStore;
use crate::kernel::BaseDocumentModel;

/// Server dependencies accessible to handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub extractor: CertificateExtractor,
    pub store: Arc<dyn CertificateStore>,
    pub model_name: String,
}

impl ServerDeps {
    pub fn new(model: Arc<dyn BaseDocumentModel>, store: Arc<dyn CertificateStore>) -> Self {
        let model_name = model.model_name().to_string();
        Self {
            extractor: CertificateExtractor::new(model),
            store,
            model_name,
        }
    }
}
