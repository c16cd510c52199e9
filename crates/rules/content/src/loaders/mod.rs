//! Content loaders for reading ruleset data from files.
//!
//! Rulesets load from TOML or RON, settings layers from TOML.

pub mod factory;
pub mod ruleset;
pub mod settings;

pub use factory::RulesetFactory;
pub use ruleset::{
    BanDecl, DisabledEquipPointDecl, EndpointDecl, ExclusionDecl, RulesetDeclaration,
    RulesetLoader,
};
pub use settings::SettingsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
