//! Content digest of a loaded ruleset.
//!
//! The digest covers what the rules mean, not how they were written: rule
//! sets are hashed in canonical order, exclusion endpoints are sorted, and
//! settings are hashed by key. Two reloads with the same digest enforce the
//! same verdicts and the same effective settings.

use std::fmt;

use rules_core::{ConstraintRegistry, EffectiveSettings, SettingValue};
use sha2::{Digest, Sha256};

/// SHA-256 over the canonical listing of a ruleset.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RulesetDigest([u8; 32]);

impl RulesetDigest {
    pub fn compute(registry: &ConstraintRegistry, settings: &EffectiveSettings) -> Self {
        let mut hasher = Sha256::new();

        for ban in registry.bans() {
            line(&mut hasher, &["ban", ban.class.as_ref(), ban.item.as_str()]);
        }

        let mut exclusions: Vec<_> = registry
            .exclusions()
            .iter()
            .map(|rule| {
                if rule.first <= rule.second {
                    (&rule.first, &rule.second)
                } else {
                    (&rule.second, &rule.first)
                }
            })
            .collect();
        exclusions.sort();
        for (a, b) in exclusions {
            line(
                &mut hasher,
                &[
                    "exclusion",
                    a.class.as_ref(),
                    a.item.as_str(),
                    b.class.as_ref(),
                    b.item.as_str(),
                ],
            );
        }

        for rule in registry.disabled_equip_points() {
            line(
                &mut hasher,
                &["disabled", rule.class.as_ref(), rule.equip_point.as_ref()],
            );
        }

        for (key, value) in settings.iter() {
            let rendered = canonical_value(value);
            line(
                &mut hasher,
                &["setting", key, value.kind().as_ref(), rendered.as_str()],
            );
        }

        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 8 hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

/// Numbers hash by their bits with `-0.0` folded into `0.0` and every NaN
/// folded into one, so values that compare equal hash equal.
fn canonical_value(value: &SettingValue) -> String {
    match value {
        SettingValue::Number(number) if number.is_nan() => {
            hex::encode(f64::NAN.to_bits().to_be_bytes())
        }
        SettingValue::Number(number) => hex::encode((number + 0.0).to_bits().to_be_bytes()),
        other => other.to_string(),
    }
}

/// Length-prefixed fields so `("ab", "c")` and `("a", "bc")` never collide.
fn line(hasher: &mut Sha256, fields: &[&str]) {
    for field in fields {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hasher.update(b"\n");
}

impl fmt::Display for RulesetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for RulesetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RulesetDigest({})", self.short())
    }
}
