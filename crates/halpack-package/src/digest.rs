//! Content digests for staged package files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::PackageError;

/// A SHA-256 digest of a staged file, stored as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileDigest(String);

impl FileDigest {
    /// Digest a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let mut hex = String::with_capacity(64);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        FileDigest(hex)
    }

    /// Digest a file's contents.
    pub fn from_file(path: &Path) -> Result<Self, PackageError> {
        let data = std::fs::read(path).map_err(|e| PackageError::io(path, e))?;
        Ok(Self::from_bytes(&data))
    }

    /// The hex digest string.
    pub fn hex(&self) -> &str {
        &self.0
    }

    /// Whether the given data matches this digest.
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::from_bytes(data) == *self
    }
}

impl std::fmt::Display for FileDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(
            FileDigest::from_bytes(b"startup"),
            FileDigest::from_bytes(b"startup")
        );
        assert_ne!(
            FileDigest::from_bytes(b"startup"),
            FileDigest::from_bytes(b"shutdown")
        );
    }

    #[test]
    fn digest_of_empty_input() {
        assert_eq!(
            FileDigest::from_bytes(b"").hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_matches_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pin.hpp");
        std::fs::write(&path, b"#pragma once\n").unwrap();

        let digest = FileDigest::from_file(&path).unwrap();
        assert!(digest.matches(b"#pragma once\n"));
        assert!(!digest.matches(b"tampered"));
    }
}
