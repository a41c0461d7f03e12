use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `text`.
pub fn generate_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
