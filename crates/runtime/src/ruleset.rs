//! Ruleset assembly: from declarations and settings layers to an immutable
//! [`LoadedRuleset`].

use rules_content::RulesetDeclaration;
use rules_core::{
    ConstraintRegistry, EffectiveSettings, Loadout, Provenance, RulesDiagnostic, RulesetWarning,
    SettingsMap, SettingsOverlay, ValidationResult, validate,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::digest::RulesetDigest;

/// Collects rules and settings layers at load time.
///
/// Nothing is visible to validators until [`RulesetBuilder::build`] freezes
/// the result.
#[derive(Debug, Default)]
pub struct RulesetBuilder {
    name: String,
    registry: ConstraintRegistry,
    overlay: SettingsOverlay,
    warnings: Vec<RulesetWarning>,
}

impl RulesetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the base settings map. Layers pushed earlier are kept.
    #[must_use]
    pub fn base_settings(mut self, base: SettingsMap) -> Self {
        let layers = self.overlay.layers().to_vec();
        let mut overlay = SettingsOverlay::new(base);
        for layer in layers {
            overlay.push_layer(layer.name, layer.values);
        }
        self.overlay = overlay;
        self
    }

    /// Registers every rule of `declaration` and pushes its `[settings]`
    /// table as an override layer named after the declaration.
    #[must_use]
    pub fn declare(mut self, declaration: &RulesetDeclaration) -> Self {
        self.warnings.extend(declaration.apply(&mut self.registry));
        if !declaration.settings.is_empty() {
            self.overlay
                .push_layer(declaration.name.clone(), declaration.settings.clone());
        }
        self
    }

    /// Pushes an override layer on top of everything declared so far.
    #[must_use]
    pub fn layer(mut self, name: impl Into<String>, values: SettingsMap) -> Self {
        self.overlay.push_layer(name, values);
        self
    }

    /// Direct access for hosts that declare rules in code.
    pub fn registry_mut(&mut self) -> &mut ConstraintRegistry {
        &mut self.registry
    }

    /// Freezes the ruleset, merging settings and collecting every warning.
    pub fn build(self) -> LoadedRuleset {
        let Self {
            name,
            registry,
            overlay,
            mut warnings,
        } = self;

        warnings.extend(registry.lint());
        warnings.extend(overlay.check());

        let settings = overlay.resolve();
        let digest = RulesetDigest::compute(&registry, &settings);

        for warning in &warnings {
            warn!(
                ruleset = %name,
                severity = warning.severity().as_str(),
                code = warning.error_code(),
                "{}",
                warning
            );
        }
        info!(
            ruleset = %name,
            rules = registry.len(),
            settings = settings.len(),
            warnings = warnings.len(),
            digest = %digest.short(),
            "ruleset built"
        );

        LoadedRuleset {
            name,
            registry,
            overlay,
            settings,
            warnings,
            digest,
        }
    }
}

/// An immutable, fully merged ruleset ready to be published.
#[derive(Debug)]
pub struct LoadedRuleset {
    name: String,
    registry: ConstraintRegistry,
    overlay: SettingsOverlay,
    settings: EffectiveSettings,
    warnings: Vec<RulesetWarning>,
    digest: RulesetDigest,
}

impl LoadedRuleset {
    pub fn builder(name: impl Into<String>) -> RulesetBuilder {
        RulesetBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &EffectiveSettings {
        &self.settings
    }

    /// Names of the override layers in application order.
    pub fn layers(&self) -> impl Iterator<Item = &str> + '_ {
        self.overlay.layers().iter().map(|layer| layer.name.as_str())
    }

    /// Which layer supplied the effective value of `key`.
    pub fn provenance(&self, key: &str) -> Option<Provenance<'_>> {
        self.overlay.provenance(key)
    }

    pub fn warnings(&self) -> &[RulesetWarning] {
        &self.warnings
    }

    pub fn digest(&self) -> RulesetDigest {
        self.digest
    }

    /// Checks `loadout` against this ruleset.
    pub fn validate(&self, loadout: &Loadout) -> ValidationResult {
        validate(&self.registry, loadout)
    }

    pub fn summary(&self) -> RulesetSummary {
        RulesetSummary {
            name: self.name.clone(),
            digest: self.digest.to_string(),
            layers: self.layers().map(str::to_owned).collect(),
            bans: self.registry.bans().count(),
            exclusions: self.registry.exclusions().len(),
            disabled_equip_points: self.registry.disabled_equip_points().count(),
            settings: self.settings.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

/// Serializable overview of a loaded ruleset, for operator tooling.
#[derive(Clone, Debug, Serialize)]
pub struct RulesetSummary {
    pub name: String,
    pub digest: String,
    pub layers: Vec<String>,
    pub bans: usize,
    pub exclusions: usize,
    pub disabled_equip_points: usize,
    pub settings: EffectiveSettings,
    pub warnings: Vec<RulesetWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_content::RulesetFactory;
    use rules_core::{ClassId, EquipPoint, Rejection};

    #[test]
    fn builds_bundled_competitive_ruleset() {
        let factory = RulesetFactory::bundled();
        let ruleset = LoadedRuleset::builder("competitive")
            .base_settings(factory.load_base_settings().unwrap())
            .declare(&factory.load_ruleset("competitive").unwrap())
            .build();

        assert!(ruleset.warnings().is_empty());
        assert_eq!(ruleset.settings().get_number("RespawnTime"), Some(7.0));
        assert_eq!(
            ruleset.provenance("RespawnTime"),
            Some(Provenance::Layer("competitive"))
        );
        assert_eq!(ruleset.provenance("TimeLimit"), Some(Provenance::Base));

        let loadout = Loadout::new(ClassId::Light).with(EquipPoint::Primary, "SAP20");
        assert_eq!(
            ruleset.validate(&loadout).rejection(),
            Some(&Rejection::ItemBanned("SAP20".into()))
        );
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut builder = LoadedRuleset::builder("summary")
            .base_settings(SettingsMap::new().with("TimeLimit", 25));
        builder.registry_mut().add_ban(ClassId::Medium, "Thumper DX");
        let ruleset = builder.build();

        let json = serde_json::to_value(ruleset.summary()).unwrap();

        assert_eq!(json["name"], "summary");
        assert_eq!(json["bans"], 1);
        assert_eq!(json["settings"]["TimeLimit"], 25.0);
        assert_eq!(json["digest"], ruleset.digest().to_string());
    }

    #[test]
    fn base_settings_can_arrive_after_layers() {
        let ruleset = LoadedRuleset::builder("late-base")
            .layer("server", SettingsMap::new().with("TimeLimit", 10))
            .base_settings(SettingsMap::new().with("TimeLimit", 25).with("Bots", false))
            .build();

        assert_eq!(ruleset.settings().get_number("TimeLimit"), Some(10.0));
        assert_eq!(ruleset.settings().get_bool("Bots"), Some(false));
        assert_eq!(ruleset.layers().collect::<Vec<_>>(), vec!["server"]);
    }

    #[test]
    fn collects_registry_and_schema_warnings() {
        let mut builder = LoadedRuleset::builder("warned")
            .base_settings(SettingsMap::new().with("TimeLimit", 25))
            .layer("server", SettingsMap::new().with("TimeLimit", "forever"));
        builder
            .registry_mut()
            .add_exclusion(ClassId::Light, "Rage", ClassId::Heavy, "Spinfusor");

        let ruleset = builder.build();

        let codes: Vec<_> = ruleset
            .warnings()
            .iter()
            .map(RulesDiagnostic::error_code)
            .collect();
        assert_eq!(
            codes,
            vec!["RULESET_CROSS_CLASS_EXCLUSION", "SETTINGS_KIND_CHANGED"]
        );
        assert_eq!(ruleset.settings().get_text("TimeLimit"), Some("forever"));
    }
}
