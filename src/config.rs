//! Validator configuration, loaded once at provider-registration time and
//! read-only afterwards.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Per-provider expectations for a webhook-style validator.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Repository owner, compared case-sensitively against the payload.
    pub owner: String,
    /// Repository name as it appears in the URL (the slug).
    pub repo: String,
    /// Only pushes to these branches fire builds. Absent or empty means
    /// every branch present in the payload is allowed.
    #[serde(default)]
    pub branches: Option<Vec<String>>,
}

impl ProviderConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branches: None,
        }
    }

    pub fn with_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for the reference validator: the expected value of the
/// `message` query parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct DummyConfig {
    pub message: String,
}

/// The full `[provider]`-style config file: one optional table per
/// validator the host wants wired up.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorsConfig {
    pub github: Option<ProviderConfig>,
    pub bitbucket: Option<ProviderConfig>,
    pub dummy: Option<DummyConfig>,
}

/// Load and parse a validator configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ValidatorsConfig, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ValidatorsConfig =
        toml::from_str(&config_str).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            [github]
            owner = "acme"
            repo = "widget"
            branches = ["main", "dev"]

            [bitbucket]
            owner = "acme"
            repo = "widget"

            [dummy]
            message = "secret"
        "#;
        let config: ValidatorsConfig = toml::from_str(raw).unwrap();
        let github = config.github.unwrap();
        assert_eq!(github.owner, "acme");
        assert_eq!(github.repo, "widget");
        assert_eq!(github.branches.as_deref(), Some(&["main".to_string(), "dev".to_string()][..]));
        assert!(config.bitbucket.unwrap().branches.is_none());
        assert_eq!(config.dummy.unwrap().message, "secret");
    }

    #[test]
    fn owner_and_repo_are_mandatory() {
        let raw = r#"
            [github]
            owner = "acme"
        "#;
        assert!(toml::from_str::<ValidatorsConfig>(raw).is_err());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config("/nonexistent/validators.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/validators.toml"));
    }
}
