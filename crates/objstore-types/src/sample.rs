use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A content-addressed binary blob.
///
/// The `sha256` field is the storage key and is used verbatim by every
/// backend. Computing it correctly is the caller's job: backends never check
/// that it matches `data`. Use [`Sample::from_data`] to derive it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Hex-encoded SHA-256 digest of `data`, as claimed by the caller.
    pub sha256: String,
    /// Raw payload.
    pub data: Vec<u8>,
}

impl Sample {
    /// Create a sample with a caller-supplied key.
    pub fn new(sha256: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            sha256: sha256.into(),
            data,
        }
    }

    /// Create a sample keyed by the SHA-256 digest of `data`.
    pub fn from_data(data: Vec<u8>) -> Self {
        let sha256 = sha256_hex(&data);
        Self { sha256, data }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.sha256
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the key is the SHA-256 hex digest of the payload.
    ///
    /// Comparison ignores ASCII case.
    pub fn verify(&self) -> bool {
        self.sha256.eq_ignore_ascii_case(&sha256_hex(&self.data))
    }
}

/// Lowercase hex SHA-256 digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

impl fmt::Debug for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sample")
            .field("sha256", &self.sha256)
            .field("len", &self.data.len())
            .finish()
    }
}
