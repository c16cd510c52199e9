//! Runtime configuration: where rules live and which layers to stack.
use std::env;
use std::path::PathBuf;

use rules_content::RulesetFactory;

/// Selects the ruleset and override layers to load at match start.
///
/// Layer order: base settings, then the ruleset's own `[settings]` table,
/// then each entry of `layers` in order (last wins).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub ruleset: String,
    pub layers: Vec<String>,
}

impl RuntimeConfig {
    pub const DEFAULT_RULESET: &'static str = "competitive";

    pub fn new(data_dir: impl Into<PathBuf>, ruleset: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ruleset: ruleset.into(),
            layers: Vec::new(),
        }
    }

    /// Appends an override layer (builder pattern).
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layers.push(layer.into());
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RULES_DATA_DIR` - Data directory (default: bundled content)
    /// - `RULES_RULESET` - Ruleset name (default: competitive)
    /// - `RULES_OVERRIDES` - Comma-separated override layer names (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("RULES_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Some(ruleset) = read_env::<String>("RULES_RULESET") {
            config.ruleset = ruleset;
        }

        if let Some(layers) = read_env::<String>("RULES_OVERRIDES") {
            config.layers = parse_layers(&layers);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(
            RulesetFactory::bundled().data_dir(),
            Self::DEFAULT_RULESET,
        )
    }
}

fn parse_layers(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|layer| !layer.is_empty())
        .map(str::to_owned)
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.parse().ok()
}
