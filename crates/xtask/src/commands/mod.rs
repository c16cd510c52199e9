//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check;
mod validate;

pub use check::Check;
pub use validate::Validate;

use std::path::PathBuf;

use rules_runtime::RuntimeConfig;

/// Ruleset selection shared by every command.
///
/// Unset flags fall back to `RULES_*` environment variables, then to the
/// bundled content.
#[derive(clap::Args)]
pub struct RulesetArgs {
    /// Data directory containing `settings/` and `rulesets/`
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Ruleset name (file stem under `rulesets/`)
    #[arg(short, long, value_name = "NAME")]
    ruleset: Option<String>,

    /// Override layer under `settings/`, applied in the order given
    #[arg(short, long = "layer", value_name = "NAME")]
    layers: Vec<String>,
}

impl RulesetArgs {
    pub fn to_config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::from_env();
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(ruleset) = &self.ruleset {
            config.ruleset = ruleset.clone();
        }
        if !self.layers.is_empty() {
            config.layers = self.layers.clone();
        }
        config
    }
}
