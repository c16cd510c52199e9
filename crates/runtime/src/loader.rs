//! Config-driven loading of a ruleset from a data directory.
use rules_content::RulesetFactory;
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::ruleset::LoadedRuleset;

/// Loads base settings, the selected ruleset and every configured layer.
///
/// Any missing or malformed file fails the whole load; nothing partial is
/// returned.
pub fn load_ruleset(config: &RuntimeConfig) -> Result<LoadedRuleset> {
    if config.ruleset.trim().is_empty() {
        return Err(RuntimeError::EmptyRulesetName);
    }
    if !config.data_dir.is_dir() {
        return Err(RuntimeError::DataDirNotFound(config.data_dir.clone()));
    }

    let factory = RulesetFactory::new(&config.data_dir);
    debug!(
        data_dir = %config.data_dir.display(),
        ruleset = %config.ruleset,
        layers = ?config.layers,
        "loading ruleset"
    );

    let base = factory.load_base_settings()?;
    let declaration = factory.load_ruleset(&config.ruleset)?;

    let mut builder = LoadedRuleset::builder(config.ruleset.as_str())
        .base_settings(base)
        .declare(&declaration);
    for layer in &config.layers {
        builder = builder.layer(layer.as_str(), factory.load_layer(layer)?);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ruleset_name() {
        let config = RuntimeConfig {
            ruleset: "  ".into(),
            ..RuntimeConfig::default()
        };
        assert!(matches!(
            load_ruleset(&config),
            Err(RuntimeError::EmptyRulesetName)
        ));
    }

    #[test]
    fn rejects_missing_data_dir() {
        let config = RuntimeConfig::new("/nonexistent/rules-data", "competitive");
        assert!(matches!(
            load_ruleset(&config),
            Err(RuntimeError::DataDirNotFound(_))
        ));
    }

    #[test]
    fn missing_layer_fails_whole_load() {
        let config = RuntimeConfig::default().with_layer("no-such-layer");
        let err = load_ruleset(&config).unwrap_err();
        assert!(err.to_string().contains("no-such-layer"));
    }
}
