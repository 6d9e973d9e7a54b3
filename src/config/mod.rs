//! User configuration for homebrew-go-resources
//!
//! The configuration file is optional. It is looked up in this order:
//!
//! 1. `--config <FILE>` or `HOMEBREW_GO_RESOURCES_CONFIG`
//! 2. `<config_dir>/homebrew-go-resources/config.toml`
//! 3. built-in defaults
//!
//! An explicitly named file must exist; the default location may be absent.
//!
//! ```toml
//! # Derive every identifier against one directory instead of each
//! # package's own GOPATH entry.
//! source_root = "/home/me/go/src"
//!
//! [tools]
//! go = "/usr/local/go/bin/go"
//! git = "git"
//! hg = "hg"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::GoResourcesError;
use crate::models::SourceRoot;

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "homebrew-go-resources";

/// Settings read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Fixed source root for identifier derivation.
    ///
    /// When unset each package's own source root is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,

    /// Executables used for the external queries.
    #[serde(default)]
    pub tools: ToolPaths,
}

/// Executable names or paths for the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    /// Go toolchain, used for `go list`
    pub go: String,
    /// Git executable
    pub git: String,
    /// Mercurial executable
    pub hg: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
            git: "git".to_string(),
            hg: "hg".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load the configuration from `path`, or from the default location.
    ///
    /// # Errors
    ///
    /// Fails when an explicit `path` does not exist, or when the selected file
    /// cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(GoResourcesError::ConfigError {
                    message: format!("Configuration file not found: {}", path.display()),
                }
                .into());
            }
            return Self::load_from(&path).await;
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).await,
            _ => Ok(Self::default()),
        }
    }

    /// Load the configuration from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            GoResourcesError::ConfigError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Default configuration file location, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Source root strategy, with `override_root` (from `--src-root`) taking precedence.
    #[must_use]
    pub fn source_root(&self, override_root: Option<PathBuf>) -> SourceRoot {
        match override_root.or_else(|| self.source_root.clone()) {
            Some(root) => SourceRoot::Fixed(root),
            None => SourceRoot::PerPackage,
        }
    }
}
