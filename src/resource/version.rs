//! Content versions for stored resource models.
//!
//! A version is derived deterministically from a model's attribute map: the
//! first 8 bytes of a SHA-256 digest over its JSON encoding, base64-encoded.
//! `serde_json` object keys are ordered, so equal maps always produce equal
//! versions. Operations can carry an expected version to guard against
//! concurrent modification between a client's read and its write.
//!
//! ```rust
//! use model_controller::resource::version::ModelVersion;
//! use serde_json::json;
//!
//! let a = ModelVersion::of(json!({"pattern": "x", "group": 1}).as_object().unwrap());
//! let b = ModelVersion::of(json!({"group": 1, "pattern": "x"}).as_object().unwrap());
//! assert_eq!(a, b);
//! ```

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque version of a resource model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelVersion(String);

impl ModelVersion {
    /// Version of an attribute map.
    pub fn of(attributes: &Map<String, Value>) -> Self {
        let content = serde_json::to_vec(attributes).unwrap_or_default();
        Self::from_content(&content)
    }

    /// Version of raw content bytes.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        let hash = hasher.finalize();
        Self(BASE64.encode(&hash[..8]))
    }

    /// Wrap a version string received from a client.
    pub fn from_hash(hash: impl AsRef<str>) -> Self {
        Self(hash.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
