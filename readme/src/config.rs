//! Document generation settings.
//!
//! Every key is optional; missing keys fall back to the defaults listed on
//! [`DocConfig`].
//!
//! # Example YAML
//!
//! ```yaml
//! title: LALib
//! description: Library of STScript commands.
//! default_group: Ungrouped
//! excluded_groups:
//!   - Help
//!   - Undocumented
//! example_language: stscript
//! example_placeholder: some code here
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use slashdoc_core::DEFAULT_GROUP;
use tracing::debug;

use crate::error::{RenderError, Result};

/// Settings controlling the generated document.
///
/// # Examples
///
/// ```
/// use slashdoc_readme::DocConfig;
///
/// let config: DocConfig = serde_yaml::from_str("title: MyLib").unwrap();
/// assert_eq!(config.title, "MyLib");
/// assert_eq!(config.example_language, "stscript");
/// assert!(config.is_excluded("Help"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    /// Top-level heading of the document (default `LALib`).
    pub title: String,
    /// Paragraph under the title (default `Library of STScript commands.`).
    pub description: String,
    /// Group for commands declared before any group marker.
    pub default_group: String,
    /// Groups left out of the index list. Their commands are still documented.
    pub excluded_groups: Vec<String>,
    /// Info string of example fences (default `stscript`).
    pub example_language: String,
    /// Body of the example emitted for commands without any.
    pub example_placeholder: String,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            title: "LALib".to_string(),
            description: "Library of STScript commands.".to_string(),
            default_group: DEFAULT_GROUP.to_string(),
            excluded_groups: vec!["Help".to_string(), "Undocumented".to_string()],
            example_language: "stscript".to_string(),
            example_placeholder: "some code here".to_string(),
        }
    }
}

impl DocConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](RenderError::Io) if the file cannot be read,
    /// [`Yaml`](RenderError::Yaml) if parsing fails, or
    /// [`Config`](RenderError::Config) if a value is unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| RenderError::io(path, e))?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads configuration from `path`, or returns the defaults when the file
    /// does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks values that would produce a document the recovery pass cannot
    /// read back.
    pub fn validate(&self) -> Result<()> {
        if self
            .example_language
            .chars()
            .any(|c| c.is_whitespace() || c == '`')
        {
            return Err(RenderError::Config(format!(
                "example_language '{}' must not contain whitespace or backticks",
                self.example_language
            )));
        }
        if self.example_placeholder.lines().any(|l| l.starts_with("```")) {
            return Err(RenderError::Config(
                "example_placeholder must not contain a code fence".to_string(),
            ));
        }
        if self.default_group.trim().is_empty() {
            return Err(RenderError::Config(
                "default_group must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns `true` if `group` is left out of the index list.
    pub fn is_excluded(&self, group: &str) -> bool {
        self.excluded_groups.iter().any(|g| g == group)
    }

    /// Returns `true` if `line` (without its line ending) opens or closes an
    /// example block.
    pub fn is_fence(&self, line: &str) -> bool {
        match line.strip_prefix("```") {
            Some(rest) => rest.is_empty() || rest == self.example_language,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocConfig::default();
        assert_eq!(config.title, "LALib");
        assert_eq!(config.description, "Library of STScript commands.");
        assert_eq!(config.default_group, "Ungrouped");
        assert_eq!(config.excluded_groups, vec!["Help", "Undocumented"]);
        assert_eq!(config.example_placeholder, "some code here");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
title: MyLib
excluded_groups: [Internal]
"#;
        let config: DocConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "MyLib");
        assert_eq!(config.description, "Library of STScript commands.");
        assert!(config.is_excluded("Internal"));
        assert!(!config.is_excluded("Help"));
    }

    #[test]
    fn test_fence_recognition() {
        let config = DocConfig::default();
        assert!(config.is_fence("```"));
        assert!(config.is_fence("```stscript"));
        assert!(!config.is_fence("```js"));
        assert!(!config.is_fence("``"));
        assert!(!config.is_fence(" ```"));
    }

    #[test]
    fn test_validate_rejects_bad_language() {
        let config = DocConfig {
            example_language: "st script".to_string(),
            ..DocConfig::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_fenced_placeholder() {
        let config = DocConfig {
            example_placeholder: "a\n```\nb".to_string(),
            ..DocConfig::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::Config(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocConfig::load_or_default(dir.path().join("slashdoc.yml")).unwrap();
        assert_eq!(config, DocConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocConfig::load(dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
