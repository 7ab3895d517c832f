//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::SystemContext;
use crate::error::ContentResult;
use crate::kind::BaseShape;

/// Actor stamped on versions when none is configured.
pub const DEFAULT_ACTOR: &str = "system";

/// Settings that shape how the engine is wired at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Identity stamped as `createdBy` on new versions.
    pub actor: String,
    /// Base shapes whose templates are replaced by display-only placeholders.
    pub disabled_shapes: Vec<BaseShape>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            actor: DEFAULT_ACTOR.to_string(),
            disabled_shapes: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> ContentResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Whether `shape` is switched off.
    #[must_use]
    pub fn is_disabled(&self, shape: BaseShape) -> bool {
        self.disabled_shapes.contains(&shape)
    }

    /// A system-clock context acting as the configured actor.
    #[must_use]
    pub fn context(&self) -> SystemContext {
        SystemContext::new(self.actor.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EngineContext;
    use std::io::Write;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "disabled_shapes": ["Video", "URL"] }}"#).expect("write config");

        let config = EngineConfig::from_json_file(file.path()).expect("should load");
        assert_eq!(config.actor, DEFAULT_ACTOR);
        assert!(config.is_disabled(BaseShape::Video));
        assert!(config.is_disabled(BaseShape::Url));
        assert!(!config.is_disabled(BaseShape::Text));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = EngineConfig::from_json_file(dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_context_uses_actor() {
        let config = EngineConfig {
            actor: "chair@example.org".to_string(),
            ..EngineConfig::default()
        };
        assert_eq!(config.context().actor(), "chair@example.org");
    }
}
