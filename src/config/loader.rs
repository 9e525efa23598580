use crate::config::settings::HansardConfig;
use crate::error::{HansardError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get XDG-compliant config directory
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "hansard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| HansardError::Config("Could not determine config directory".to_string()))
}

/// Get XDG-compliant data directory
pub fn data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "hansard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| HansardError::Config("Could not determine data directory".to_string()))
}

/// Get config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the default recordings directory
pub fn recordings_dir(config: &HansardConfig) -> Result<PathBuf> {
    match &config.storage.recordings_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(data_dir()?.join("recordings")),
    }
}

/// Load config from file, creating default if not exists
pub fn load_config() -> Result<HansardConfig> {
    let path = config_path()?;

    if !path.exists() {
        let config = HansardConfig::default();
        save_config(&config)?;
        return Ok(config);
    }

    let content = fs::read_to_string(&path)?;
    let config: HansardConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save config to file
pub fn save_config(config: &HansardConfig) -> Result<()> {
    let path = config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = HansardConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("silence_gap_secs"));
        assert!(toml.contains("diff_threshold"));
    }

    #[test]
    fn test_explicit_recordings_dir_wins() {
        let mut config = HansardConfig::default();
        config.storage.recordings_dir = Some(PathBuf::from("/tmp/recordings"));
        assert_eq!(
            recordings_dir(&config).unwrap(),
            PathBuf::from("/tmp/recordings")
        );
    }
}
