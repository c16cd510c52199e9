//! Published ruleset handle shared by the match server's threads.
//!
//! Readers take an [`Arc`] snapshot and validate against it without holding
//! the lock. A reload builds the next ruleset completely, then swaps the
//! reference under a short write lock, so a validator mid-check keeps the
//! snapshot it started with and never sees a partial ruleset.

use std::sync::Arc;

use parking_lot::RwLock;
use rules_core::{Loadout, RulesDiagnostic, ValidationResult};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::loader::load_ruleset;
use crate::ruleset::LoadedRuleset;

/// A published ruleset together with its publication epoch.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub epoch: u64,
    pub ruleset: Arc<LoadedRuleset>,
}

#[derive(Debug)]
struct Published {
    epoch: u64,
    ruleset: Arc<LoadedRuleset>,
}

/// Cloneable handle to the currently published ruleset.
#[derive(Clone, Debug)]
pub struct RulesetHandle {
    inner: Arc<RwLock<Published>>,
}

impl RulesetHandle {
    /// Publishes `ruleset` as epoch 0.
    pub fn new(ruleset: LoadedRuleset) -> Self {
        info!(
            ruleset = ruleset.name(),
            digest = %ruleset.digest().short(),
            epoch = 0,
            "ruleset published"
        );
        Self {
            inner: Arc::new(RwLock::new(Published {
                epoch: 0,
                ruleset: Arc::new(ruleset),
            })),
        }
    }

    /// Returns the current snapshot.
    pub fn current(&self) -> Snapshot {
        let published = self.inner.read();
        Snapshot {
            epoch: published.epoch,
            ruleset: Arc::clone(&published.ruleset),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.inner.read().epoch
    }

    /// Swaps in `ruleset` and returns the new epoch.
    ///
    /// The epoch advances even when the digest is unchanged, so it counts
    /// reloads rather than distinct rulesets.
    pub fn publish(&self, ruleset: LoadedRuleset) -> u64 {
        let next = Arc::new(ruleset);
        let (epoch, previous) = {
            let mut published = self.inner.write();
            published.epoch += 1;
            let previous = std::mem::replace(&mut published.ruleset, Arc::clone(&next));
            (published.epoch, previous)
        };

        info!(
            ruleset = next.name(),
            digest = %next.digest().short(),
            previous_digest = %previous.digest().short(),
            changed = next.digest() != previous.digest(),
            epoch,
            "ruleset published"
        );
        epoch
    }

    /// Loads a fresh ruleset from `config` and publishes it.
    ///
    /// On failure the current ruleset stays published and the error is
    /// returned.
    pub fn reload(&self, config: &RuntimeConfig) -> Result<u64> {
        match load_ruleset(config) {
            Ok(ruleset) => Ok(self.publish(ruleset)),
            Err(err) => {
                warn!(ruleset = %config.ruleset, epoch = self.epoch(), "reload failed: {}", err);
                Err(err)
            }
        }
    }

    /// Validates `loadout` against the current snapshot.
    pub fn validate(&self, loadout: &Loadout) -> ValidationResult {
        let snapshot = self.current();
        let verdict = snapshot.ruleset.validate(loadout);

        match verdict.rejection() {
            None => debug!(
                class = %loadout.class(),
                slots = loadout.len(),
                epoch = snapshot.epoch,
                "loadout accepted"
            ),
            Some(reason) => debug!(
                class = %loadout.class(),
                severity = reason.severity().as_str(),
                code = reason.error_code(),
                epoch = snapshot.epoch,
                "loadout rejected: {}",
                reason
            ),
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::{ClassId, EquipPoint, SettingsMap};

    fn ruleset_banning(item: &str) -> LoadedRuleset {
        let mut builder = LoadedRuleset::builder("test")
            .base_settings(SettingsMap::new().with("TimeLimit", 25));
        builder.registry_mut().add_ban(ClassId::Light, item);
        builder.build()
    }

    #[test]
    fn publish_advances_epoch_and_swaps_rules() {
        let handle = RulesetHandle::new(ruleset_banning("SAP20"));
        let loadout = Loadout::new(ClassId::Light).with(EquipPoint::Primary, "SAP20");

        assert_eq!(handle.epoch(), 0);
        assert!(!handle.validate(&loadout).is_accepted());

        assert_eq!(handle.publish(ruleset_banning("Rage")), 1);
        assert!(handle.validate(&loadout).is_accepted());
    }

    #[test]
    fn held_snapshot_survives_publish() {
        let handle = RulesetHandle::new(ruleset_banning("SAP20"));
        let held = handle.current();

        handle.publish(ruleset_banning("Rage"));

        let loadout = Loadout::new(ClassId::Light).with(EquipPoint::Primary, "SAP20");
        assert_eq!(held.epoch, 0);
        assert!(!held.ruleset.validate(&loadout).is_accepted());
        assert_eq!(handle.current().epoch, 1);
    }

    #[test]
    fn clones_share_publication() {
        let handle = RulesetHandle::new(ruleset_banning("SAP20"));
        let other = handle.clone();

        other.publish(ruleset_banning("Rage"));

        assert_eq!(handle.epoch(), 1);
    }

    #[test]
    fn failed_reload_keeps_current_ruleset() {
        let handle = RulesetHandle::new(ruleset_banning("SAP20"));
        let config = RuntimeConfig::new("/nonexistent/rules-data", "competitive");

        assert!(handle.reload(&config).is_err());
        assert_eq!(handle.epoch(), 0);
        assert_eq!(handle.current().ruleset.name(), "test");
    }
}
