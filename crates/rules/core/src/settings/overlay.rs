//! Layered settings merge.
//!
//! The base map is never touched. Each override layer replaces (or adds) the
//! keys it names, in the order given; the last layer naming a key wins.

use crate::error::RulesetWarning;

use super::{EffectiveSettings, SettingsMap, SettingsSchema};

/// Merges `overrides` onto a copy of `base`, in order.
pub fn apply_overrides<'a, I>(base: &SettingsMap, overrides: I) -> EffectiveSettings
where
    I: IntoIterator<Item = &'a SettingsMap>,
{
    let mut effective = base.clone();
    for layer in overrides {
        effective.extend(layer.iter().map(|(key, value)| (key, value.clone())));
    }
    EffectiveSettings::from_map(effective)
}

/// A named override map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverrideLayer {
    pub name: String,
    pub values: SettingsMap,
}

impl OverrideLayer {
    pub fn new(name: impl Into<String>, values: SettingsMap) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Where a key's effective value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance<'a> {
    Base,
    Layer(&'a str),
}

/// Base settings plus an ordered stack of named override layers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsOverlay {
    base: SettingsMap,
    layers: Vec<OverrideLayer>,
}

impl SettingsOverlay {
    pub fn new(base: SettingsMap) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Pushes a layer on top of the stack (builder pattern).
    #[must_use]
    pub fn with_layer(mut self, name: impl Into<String>, values: SettingsMap) -> Self {
        self.push_layer(name, values);
        self
    }

    /// Pushes a layer on top of the stack.
    pub fn push_layer(&mut self, name: impl Into<String>, values: SettingsMap) {
        self.layers.push(OverrideLayer::new(name, values));
    }

    pub fn base(&self) -> &SettingsMap {
        &self.base
    }

    /// Layers in application order.
    pub fn layers(&self) -> &[OverrideLayer] {
        &self.layers
    }

    /// Produces the effective settings.
    pub fn resolve(&self) -> EffectiveSettings {
        apply_overrides(&self.base, self.layers.iter().map(|layer| &layer.values))
    }

    /// Returns which layer supplied the effective value of `key`, or `None`
    /// if no layer and not the base defines it.
    pub fn provenance(&self, key: &str) -> Option<Provenance<'_>> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.values.contains_key(key))
            .map(|layer| Provenance::Layer(layer.name.as_str()))
            .or_else(|| self.base.contains_key(key).then_some(Provenance::Base))
    }

    /// Checks every layer against the schema implied by the base map.
    pub fn check(&self) -> Vec<RulesetWarning> {
        let schema = SettingsSchema::from_base(&self.base);
        self.layers
            .iter()
            .flat_map(|layer| schema.check(&layer.name, &layer.values))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingKind, SettingValue};

    fn base() -> SettingsMap {
        SettingsMap::new()
            .with("TimeLimit", 25)
            .with("FriendlyFire", false)
            .with("GameMode", "CTF")
    }

    #[test]
    fn last_layer_wins() {
        let base = SettingsMap::new().with("x", 1);
        let two = SettingsMap::new().with("x", 2);
        let three = SettingsMap::new().with("x", 3);

        assert_eq!(
            apply_overrides(&base, [&two, &three]).get_number("x"),
            Some(3.0)
        );
        assert_eq!(
            apply_overrides(&base, [&three, &two]).get_number("x"),
            Some(2.0)
        );
    }

    #[test]
    fn untouched_keys_keep_base_value() {
        let layer = SettingsMap::new().with("TimeLimit", 30);

        let effective = apply_overrides(&base(), [&layer]);

        assert_eq!(effective.get_number("TimeLimit"), Some(30.0));
        assert_eq!(effective.get_bool("FriendlyFire"), Some(false));
        assert_eq!(effective.get_text("GameMode"), Some("CTF"));
    }

    #[test]
    fn base_is_not_modified() {
        let base = base();
        let snapshot = base.clone();
        let layer = SettingsMap::new().with("TimeLimit", 10).with("Bots", true);

        let first = apply_overrides(&base, [&layer]);
        assert_eq!(base, snapshot);

        let second = apply_overrides(&base, []);
        assert_eq!(second.as_map(), &snapshot);
        assert_ne!(first, second);
    }

    #[test]
    fn result_ignores_key_insertion_order() {
        let a = SettingsMap::new().with("x", 1).with("y", 2);
        let b = SettingsMap::new().with("y", 2).with("x", 1);

        assert_eq!(
            apply_overrides(&SettingsMap::new(), [&a]),
            apply_overrides(&SettingsMap::new(), [&b])
        );
    }

    #[test]
    fn disjoint_layers_commute() {
        let respawn = SettingsMap::new().with("RespawnTime", 7);
        let bots = SettingsMap::new().with("Bots", true);

        let forward = apply_overrides(&base(), [&respawn, &bots]);
        let backward = apply_overrides(&base(), [&bots, &respawn]);

        assert_eq!(forward, backward);
        assert_eq!(forward.get_number("RespawnTime"), Some(7.0));
        assert_eq!(forward.get_bool("Bots"), Some(true));

        let time_limit = SettingsMap::new().with("TimeLimit", 30);
        assert_eq!(
            apply_overrides(&base(), [&time_limit, &bots]),
            apply_overrides(&base(), [&bots, &time_limit])
        );
    }

    #[test]
    fn kind_changes_are_applied_as_is() {
        let layer = SettingsMap::new().with("FriendlyFire", 0.5);

        let effective = apply_overrides(&base(), [&layer]);

        assert_eq!(
            effective.get("FriendlyFire"),
            Some(&SettingValue::Number(0.5))
        );
    }

    #[test]
    fn applying_the_same_layer_twice_is_idempotent() {
        let layer = SettingsMap::new().with("TimeLimit", 30).with("Bots", true);

        assert_eq!(
            apply_overrides(&base(), [&layer]),
            apply_overrides(&base(), [&layer, &layer])
        );
    }

    #[test]
    fn overlay_tracks_provenance_and_warnings() {
        let overlay = SettingsOverlay::new(base())
            .with_layer("server", SettingsMap::new().with("TimeLimit", 30))
            .with_layer(
                "competitive",
                SettingsMap::new()
                    .with("TimeLimit", 20)
                    .with("FriendlyFire", "on")
                    .with("Tournament", true),
            );

        assert_eq!(overlay.resolve().get_number("TimeLimit"), Some(20.0));
        assert_eq!(
            overlay.provenance("TimeLimit"),
            Some(Provenance::Layer("competitive"))
        );
        assert_eq!(overlay.provenance("GameMode"), Some(Provenance::Base));
        assert_eq!(overlay.provenance("Missing"), None);

        let warnings = overlay.check();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&RulesetWarning::SettingKindChanged {
            layer: "competitive".into(),
            key: "FriendlyFire".into(),
            base: SettingKind::Bool,
            replacement: SettingKind::Text,
        }));
        assert!(warnings.contains(&RulesetWarning::UnknownSettingKey {
            layer: "competitive".into(),
            key: "Tournament".into(),
        }));
    }
}
