//! BLAKE3 content hashes for backup snapshots

use std::fmt;

/// A BLAKE3 hash of document content
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct ContentHash(blake3::Hash);

impl ContentHash {
    /// First 12 hex characters, for log lines and reports
    pub fn short(&self) -> String {
        self.0.to_hex()[..12].to_string()
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Hash document content
pub fn hash_content(data: &[u8]) -> ContentHash {
    ContentHash(blake3::hash(data))
}
