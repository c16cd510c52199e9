//! Runtime loading and publication of loadout rulesets.
//!
//! A match server builds a [`LoadedRuleset`] from a data directory at match
//! start, publishes it through a [`RulesetHandle`], and validates each
//! player's loadout against the current snapshot. Reloads swap the whole
//! ruleset at once; validators holding the previous snapshot finish against
//! it unchanged.
//!
//! Modules are organized by responsibility:
//! - [`config`] selects the data directory, ruleset and override layers
//! - [`loader`] turns a config into a [`LoadedRuleset`]
//! - [`ruleset`] assembles rules and settings into an immutable ruleset
//! - [`handle`] publishes rulesets to concurrent validators
//! - [`digest`] fingerprints a ruleset for logs and change detection
pub mod config;
pub mod digest;
pub mod error;
pub mod handle;
pub mod loader;
pub mod ruleset;

pub use config::RuntimeConfig;
pub use digest::RulesetDigest;
pub use error::{Result, RuntimeError};
pub use handle::{RulesetHandle, Snapshot};
pub use loader::load_ruleset;
pub use ruleset::{LoadedRuleset, RulesetBuilder, RulesetSummary};
