//! Settings layer loader.

use std::path::Path;

use rules_core::SettingsMap;

use crate::loaders::{LoadResult, read_file};

/// Loader for flat settings tables from TOML files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load a settings map from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a TOML file whose top-level keys are setting names
    ///
    /// # Returns
    ///
    /// Returns a SettingsMap. Nested tables and arrays are rejected.
    pub fn load(path: &Path) -> LoadResult<SettingsMap> {
        let content = read_file(path)?;
        let settings: SettingsMap = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse settings TOML {}: {}", path.display(), e)
        })?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::SettingValue;

    #[test]
    fn test_load_flat_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.toml");
        std::fs::write(
            &path,
            "GameMode = \"Arena\"\nTimeLimit = 15\nFriendlyFireMultiplier = 0.25\nBots = false\n",
        )
        .unwrap();

        let settings = SettingsLoader::load(&path).unwrap();

        assert_eq!(settings.len(), 4);
        assert_eq!(settings.get_text("GameMode"), Some("Arena"));
        assert_eq!(settings.get("TimeLimit"), Some(&SettingValue::Number(15.0)));
        assert_eq!(settings.get_number("FriendlyFireMultiplier"), Some(0.25));
        assert_eq!(settings.get_bool("Bots"), Some(false));
    }

    #[test]
    fn test_nested_tables_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.toml");
        std::fs::write(&path, "[server]\nTimeLimit = 15\n").unwrap();

        assert!(SettingsLoader::load(&path).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SettingsLoader::load(Path::new("/nonexistent/base.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/base.toml"));
    }
}
