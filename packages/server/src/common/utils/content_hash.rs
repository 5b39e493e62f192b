use sha2::{Digest, Sha256};

/// Generate the content hash of an uploaded file
///
/// Lowercase hex SHA-256 of the exact bytes received. Unlike text hashing
/// there is no normalization: a single changed byte is a different file.
/// Used as the duplicate-detection key for stored certificates.
pub fn generate_file_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
