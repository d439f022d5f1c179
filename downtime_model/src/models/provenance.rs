//! Version and build fingerprint reported alongside model configuration.

use sha2::{Digest, Sha256};

use crate::io::loaders::DEFAULT_SCHEDULED_DOWNTIME_TABLE;

/// Static provenance descriptor injected into a model at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub version: String,
    pub fingerprint: String,
}

impl Provenance {
    pub fn new(version: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fingerprint: fingerprint.into(),
        }
    }

    /// Provenance of this build.
    ///
    /// The fingerprint is `DOWNTIME_MODEL_BUILD_SHA` when set at compile time,
    /// otherwise the checksum of the packaged scheduled-downtime table.
    pub fn current() -> Self {
        let fingerprint = option_env!("DOWNTIME_MODEL_BUILD_SHA")
            .map(str::to_string)
            .unwrap_or_else(|| calculate_checksum(DEFAULT_SCHEDULED_DOWNTIME_TABLE));
        Self::new(env!("CARGO_PKG_VERSION"), fingerprint)
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Self::current()
    }
}

/// Calculate SHA-256 checksum of text content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
