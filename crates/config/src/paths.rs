//! Path helpers for the configuration file location.
//!
//! Responsibilities:
//! - Determine the platform-appropriate default config file path.
//!
//! Does NOT handle:
//! - File I/O operations (see `loader::file`).

use std::path::PathBuf;

use crate::loader::ConfigError;

/// Returns the default path to the configuration file.
///
/// - Linux/macOS: `~/.config/mintwizard/config.json`
/// - Windows: `%AppData%\mintwizard\config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = directories::ProjectDirs::from("", "", "mintwizard").ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory could be determined".to_string())
    })?;

    Ok(proj_dirs.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_ends_with_config_json() {
        let Ok(path) = default_config_path() else {
            // Sandboxed environments without a home directory.
            return;
        };
        assert!(path.ends_with("mintwizard/config.json") || path.ends_with("config.json"));
        assert!(path.to_string_lossy().contains("mintwizard"));
    }
}
