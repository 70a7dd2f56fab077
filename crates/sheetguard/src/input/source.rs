//! Metadata about the files handed to the engine.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata about one processed sample-sheet file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    /// File name as supplied by the caller.
    pub file_name: String,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl SourceMetadata {
    /// Describe a file from its name and contents.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);

        Self {
            file_name: file_name.into(),
            hash: format!("sha256:{:x}", hasher.finalize()),
            size_bytes: bytes.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_size() {
        let meta = SourceMetadata::from_bytes("empty.csv", b"");
        assert_eq!(meta.file_name, "empty.csv");
        assert_eq!(meta.size_bytes, 0);
        assert_eq!(
            meta.hash,
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
