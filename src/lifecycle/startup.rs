//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Load the content catalog the configuration points at
//! - Produce the same `SiteState` at boot and on every hot reload
//!
//! # Design Decisions
//! - Fail fast at boot: any error is fatal
//! - On reload the caller keeps the previous state instead

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{loader::load_or_default, ConfigError, SiteConfig};
use crate::content::{Catalog, ContentError};
use crate::http::SiteState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("content: {0}")]
    Content(#[from] ContentError),
}

/// Load config (defaults when `config_path` is `None`) and its content.
pub fn load_site(config_path: Option<&Path>) -> Result<SiteState, StartupError> {
    let config = load_or_default(config_path)?;
    let catalog = Catalog::load(&content_dir(&config))?;
    Ok(SiteState::new(config, catalog))
}

pub fn content_dir(config: &SiteConfig) -> PathBuf {
    PathBuf::from(&config.content.directory)
}

/// Paths whose changes trigger a reload.
pub fn watch_paths(config_path: Option<&Path>, config: &SiteConfig) -> Vec<PathBuf> {
    let mut paths = vec![content_dir(config)];
    if let Some(path) = config_path {
        paths.push(path.to_path_buf());
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_content(dir: &Path) {
        fs::write(
            dir.join("projects.json"),
            r#"{"projects": [{
                "id": "1", "title": "One", "description": "d", "longDescription": "ld",
                "image": "/i.png", "technologies": ["Rust"], "githubUrl": "https://github.com/x/one",
                "status": "completed", "featured": true, "category": "tool", "year": 2024,
                "slug": "one"
            }]}"#,
        )
        .unwrap();
        fs::write(dir.join("services.json"), r#"{"services": []}"#).unwrap();
    }

    #[test]
    fn test_load_site_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        write_content(dir.path());
        let config_path = dir.path().join("site.toml");
        fs::write(
            &config_path,
            format!(
                "[content]\ndirectory = {:?}\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let site = load_site(Some(&config_path)).unwrap();
        assert_eq!(site.catalog.projects().len(), 1);
        assert!(site.catalog.project_by_slug("one").is_some());
    }

    #[test]
    fn test_missing_content_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("site.toml");
        fs::write(
            &config_path,
            format!(
                "[content]\ndirectory = {:?}\n",
                dir.path().join("absent").display().to_string()
            ),
        )
        .unwrap();

        assert!(matches!(
            load_site(Some(&config_path)),
            Err(StartupError::Content(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("site.toml");
        fs::write(&config_path, "[security]\nnonce_bytes = 2\n").unwrap();

        assert!(matches!(
            load_site(Some(&config_path)),
            Err(StartupError::Config(ConfigError::Validation(_)))
        ));
    }

    #[test]
    fn test_watch_paths() {
        let config = SiteConfig::default();
        assert_eq!(watch_paths(None, &config), vec![PathBuf::from("content")]);
        assert_eq!(
            watch_paths(Some(Path::new("site.toml")), &config),
            vec![PathBuf::from("content"), PathBuf::from("site.toml")]
        );
    }
}
