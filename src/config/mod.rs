//! Configuration management.

use crate::io::services::export::DEFAULT_PAGE_SIZE;
use crate::{Error, Result};
use directories::{ProjectDirs, UserDirs};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration for notivault.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Directory exports are written to. `None` falls back to the user's
    /// documents directory at export time.
    pub export_dir: Option<PathBuf>,
    /// Page size for the export walk.
    pub page_size: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Export directory.
    pub export_dir: Option<String>,
    /// Page size.
    pub page_size: Option<usize>,
}

impl VaultConfig {
    /// Loads configuration from the given file (or the default location),
    /// then applies environment overrides `NOTIVAULT_EXPORT_DIR` and
    /// `NOTIVAULT_PAGE_SIZE`.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read, or if a
    /// config value fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Ok(dir) = std::env::var("NOTIVAULT_EXPORT_DIR") {
            if !dir.is_empty() {
                config.export_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(size) = std::env::var("NOTIVAULT_PAGE_SIZE") {
            config.page_size = size.parse().map_err(|_| {
                Error::InvalidInput(format!("NOTIVAULT_PAGE_SIZE is not a number: '{size}'"))
            })?;
        }

        Ok(config)
    }

    /// Parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config".to_string(),
            cause: e.to_string(),
        })?;
        let file: ConfigFile = toml::from_str(&text)
            .map_err(|e| Error::InvalidInput(format!("invalid config file: {e}")))?;
        Ok(Self::from(file))
    }

    /// Resolves the directory exports land in: the configured directory, or
    /// the user's documents directory.
    ///
    /// # Errors
    ///
    /// Returns an error when nothing is configured and no documents
    /// directory exists for the current user.
    pub fn resolve_export_dir(&self) -> Result<PathBuf> {
        self.export_dir
            .clone()
            .or_else(|| {
                UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            })
            .ok_or_else(|| {
                Error::InvalidInput(
                    "no export directory configured and no user documents directory found"
                        .to_string(),
                )
            })
    }

    /// Default config file location (`<config dir>/notivault/config.toml`).
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "notivault")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

impl From<ConfigFile> for VaultConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            export_dir: file.export_dir.map(PathBuf::from),
            page_size: file.page_size.unwrap_or(defaults.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VaultConfig::default();
        assert!(config.export_dir.is_none());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export_dir = \"/tmp/exports\"\npage_size = 250\n").unwrap();

        let config = VaultConfig::from_file(&path).unwrap();
        assert_eq!(config.export_dir.as_deref(), Some(Path::new("/tmp/exports")));
        assert_eq!(config.page_size, 250);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 10\n").unwrap();

        let config = VaultConfig::from_file(&path).unwrap();
        assert!(config.export_dir.is_none());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = [not toml").unwrap();
        assert!(VaultConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_configured_export_dir_wins() {
        let config = VaultConfig {
            export_dir: Some(PathBuf::from("/data/exports")),
            page_size: DEFAULT_PAGE_SIZE,
        };
        assert_eq!(
            config.resolve_export_dir().unwrap(),
            PathBuf::from("/data/exports")
        );
    }
}
