//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use ai::GeminiDocumentModel;
pub use deps::ServerDeps;
pub use test_dependencies::{GenerateCallArgs, MockDocumentModel};
pub use traits::*;
