use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::LLMBackend;

use super::error::ConfigError;
use super::file::ConfigFile;
use super::types::RunConfig;

/// `~/.config/llm-batch/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("llm-batch").join("config.toml"))
}

/// Loads the run configuration.
///
/// An explicit `path` must exist. Without one, the default location is read
/// if present, otherwise the preset is used unchanged.
pub fn load_config(
    path: Option<&Path>,
    backend: Option<LLMBackend>,
) -> Result<RunConfig, ConfigError> {
    let file = match path {
        Some(path) => read_file(path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => read_file(&path)?,
            None => ConfigFile::default(),
        },
    };
    Ok(file.into_run_config(backend))
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    log::debug!("Reading config from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ConfigFile::from_toml(&contents)?)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn explicit_file_is_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.toml");
        fs::write(&path, "[generation]\nattempts = 7\n").unwrap();

        let config = load_config(Some(&path), Some(LLMBackend::Google)).unwrap();

        assert_eq!(config.provider.backend, LLMBackend::Google);
        assert_eq!(config.generation.attempts, 7);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.toml");
        fs::write(&path, "[generation\nattempts = ").unwrap();

        let err = load_config(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
