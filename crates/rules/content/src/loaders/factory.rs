//! Ruleset factory for loading rules and settings from a data directory.

use std::path::{Path, PathBuf};

use rules_core::SettingsMap;

use crate::loaders::{LoadResult, RulesetDeclaration, RulesetLoader, SettingsLoader};

/// Ruleset factory that loads all rule content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── settings/
/// │   ├── base.toml
/// │   └── tournament.toml
/// └── rulesets/
///     ├── competitive.toml
///     └── pub.ron
/// ```
pub struct RulesetFactory {
    data_dir: PathBuf,
}

impl RulesetFactory {
    /// Creates a new factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates a factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load base settings from `settings/base.toml`.
    pub fn load_base_settings(&self) -> LoadResult<SettingsMap> {
        SettingsLoader::load(&self.data_dir.join("settings").join("base.toml"))
    }

    /// Load an override layer from `settings/{layer}.toml`.
    pub fn load_layer(&self, layer: &str) -> LoadResult<SettingsMap> {
        let path = self
            .data_dir
            .join("settings")
            .join(format!("{}.toml", layer));
        SettingsLoader::load(&path)
    }

    /// Load a ruleset from `rulesets/{name}.toml`, falling back to
    /// `rulesets/{name}.ron`.
    pub fn load_ruleset(&self, name: &str) -> LoadResult<RulesetDeclaration> {
        let dir = self.data_dir.join("rulesets");
        let toml_path = dir.join(format!("{}.toml", name));
        if toml_path.exists() {
            return RulesetLoader::load(&toml_path);
        }

        let ron_path = dir.join(format!("{}.ron", name));
        if ron_path.exists() {
            return RulesetLoader::load(&ron_path);
        }

        anyhow::bail!(
            "Ruleset '{}' not found in {} (tried .toml and .ron)",
            name,
            dir.display()
        )
    }

    /// Lists ruleset names available under `rulesets/`, sorted.
    pub fn list_rulesets(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("rulesets");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("toml" | "ron")
                )
            })
            .filter_map(|path| Some(path.file_stem()?.to_str()?.to_string()))
            .collect();
        names.sort();
        names.dedup();

        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
