use sha2::{Digest, Sha256};

use crate::types::identifiers::ContentDigest;
use crate::types::RetrievalError;

/// The only digest algorithm outputs are hashed with.
pub const HASH_ALGORITHM: &str = "sha256";

/// Settings that shape a retrieval's output or diagnostics.
///
/// The whole config is hashed into each result's `render_version`, so it must serialize
/// deterministically. Fields left out of a JSON config take their [`Self::v0`] values.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RetrievalConfig {
    pub version: String,
    /// Must be `"sha256"`; anything else is rejected before the store is queried.
    pub hash_algorithm: String,
    /// Emit the matched headings as a DEBUG event.
    #[serde(default = "default_log_matched_headings")]
    pub log_matched_headings: bool,
}

fn default_log_matched_headings() -> bool {
    true
}

impl RetrievalConfig {
    pub fn v0() -> Self {
        Self {
            version: "1".into(),
            hash_algorithm: HASH_ALGORITHM.into(),
            log_matched_headings: default_log_matched_headings(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.hash_algorithm != HASH_ALGORITHM {
            return Err(RetrievalError::InvalidArgument(format!(
                "Unsupported hash_algorithm '{}': only '{HASH_ALGORITHM}' is supported",
                self.hash_algorithm
            )));
        }
        Ok(())
    }

    /// `sha256(config_json || digest)`, so any config change re-versions every output.
    pub fn render_version(&self, digest: &ContentDigest) -> Result<String, serde_json::Error> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(self)?);
        hasher.update(digest.as_str().as_bytes());
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::v0()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    #[test]
    fn omitted_fields_match_v0() {
        let config =
            RetrievalConfig::from_json_str(r#"{"version":"1","hash_algorithm":"sha256"}"#).unwrap();
        assert_eq!(config, RetrievalConfig::v0());
    }

    #[test]
    fn only_sha256_is_accepted() {
        assert!(RetrievalConfig::v0().validate().is_ok());

        let mut config = RetrievalConfig::v0();
        config.hash_algorithm = "md5".into();
        assert_eq!(
            config.validate().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
