// Certificate Verifier - API Core
//
// Accepts uploaded certificate images and PDFs, asks a multimodal model to
// read the certificate fields, and stores the normalized result.
//
// The extraction pipeline lives in domains/certificates/extraction; HTTP
// wiring lives in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
