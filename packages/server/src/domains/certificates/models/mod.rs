pub mod certificate;
pub mod extracted_record;
pub mod media_kind;

pub use certificate::*;
pub use extracted_record::*;
pub use media_kind::*;
