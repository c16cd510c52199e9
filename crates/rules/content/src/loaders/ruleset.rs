//! Ruleset declaration loader.
//!
//! Class and equip point names stay plain strings until [`RulesetDeclaration::apply`]
//! so a typo in one rule becomes a warning instead of failing the whole file.

use std::path::Path;
use std::str::FromStr;

use rules_core::{ClassId, ConstraintRegistry, EquipPoint, RuleKind, RulesetWarning, SettingsMap};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// `class` may never equip `item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanDecl {
    pub class: String,
    pub item: String,
}

/// One side of an exclusion declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDecl {
    pub class: String,
    pub item: String,
}

/// `first` and `second` may not be equipped together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionDecl {
    pub first: EndpointDecl,
    pub second: EndpointDecl,
}

/// `class` may not fill `equip_point`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledEquipPointDecl {
    pub class: String,
    pub equip_point: String,
}

/// A ruleset file: rule declarations plus the settings it overrides.
///
/// Example (TOML):
/// ```toml
/// name = "competitive"
///
/// [[bans]]
/// class = "Light"
/// item = "SAP20"
///
/// [[exclusions]]
/// first = { class = "Light", item = "Phase Rifle" }
/// second = { class = "Light", item = "Rage" }
///
/// [[disabled_equip_points]]
/// class = "Light"
/// equip_point = "Tertiary"
///
/// [settings]
/// RespawnTime = 7
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesetDeclaration {
    pub name: String,
    #[serde(default)]
    pub bans: Vec<BanDecl>,
    #[serde(default)]
    pub exclusions: Vec<ExclusionDecl>,
    #[serde(default)]
    pub disabled_equip_points: Vec<DisabledEquipPointDecl>,
    #[serde(default)]
    pub settings: SettingsMap,
}

impl RulesetDeclaration {
    /// Parses a declaration from TOML text.
    pub fn from_toml_str(content: &str) -> LoadResult<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse ruleset TOML: {}", e))
    }

    /// Parses a declaration from RON text.
    pub fn from_ron_str(content: &str) -> LoadResult<Self> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse ruleset RON: {}", e))
    }

    /// Registers every declared rule into `registry`, in declaration order.
    ///
    /// Rules naming an unknown class or equip point are skipped and reported.
    /// Duplicates are absorbed by the registry.
    pub fn apply(&self, registry: &mut ConstraintRegistry) -> Vec<RulesetWarning> {
        let mut warnings = Vec::new();

        for ban in &self.bans {
            let Some(class) = parse_class(&ban.class, RuleKind::Ban, &mut warnings) else {
                continue;
            };
            if !registry.add_ban(class, ban.item.as_str()) {
                tracing::debug!(ruleset = %self.name, %class, item = %ban.item, "duplicate ban");
            }
        }

        for exclusion in &self.exclusions {
            let first = parse_class(&exclusion.first.class, RuleKind::Exclusion, &mut warnings);
            let second = parse_class(&exclusion.second.class, RuleKind::Exclusion, &mut warnings);
            let (Some(first), Some(second)) = (first, second) else {
                continue;
            };
            if !registry.add_exclusion(
                first,
                exclusion.first.item.as_str(),
                second,
                exclusion.second.item.as_str(),
            ) {
                tracing::debug!(
                    ruleset = %self.name,
                    first = %exclusion.first.item,
                    second = %exclusion.second.item,
                    "duplicate exclusion"
                );
            }
        }

        for disabled in &self.disabled_equip_points {
            let class = parse_class(&disabled.class, RuleKind::DisabledEquipPoint, &mut warnings);
            let equip_point = match EquipPoint::from_str(&disabled.equip_point) {
                Ok(point) => Some(point),
                Err(_) => {
                    warnings.push(RulesetWarning::UnknownEquipPoint {
                        name: disabled.equip_point.clone(),
                    });
                    None
                }
            };
            if let (Some(class), Some(equip_point)) = (class, equip_point) {
                registry.add_disabled_equip_point(class, equip_point);
            }
        }

        warnings
    }
}

fn parse_class(name: &str, rule: RuleKind, warnings: &mut Vec<RulesetWarning>) -> Option<ClassId> {
    match ClassId::from_str(name) {
        Ok(class) => Some(class),
        Err(_) => {
            warnings.push(RulesetWarning::UnknownClass {
                rule,
                name: name.to_owned(),
            });
            None
        }
    }
}

/// Loader for ruleset declarations from TOML or RON files.
pub struct RulesetLoader;

impl RulesetLoader {
    /// Load a ruleset declaration, choosing the format by file extension.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a `.toml` or `.ron` file containing a RulesetDeclaration
    pub fn load(path: &Path) -> LoadResult<RulesetDeclaration> {
        let content = read_file(path)?;
        let declaration = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => RulesetDeclaration::from_toml_str(&content),
            Some("ron") => RulesetDeclaration::from_ron_str(&content),
            _ => anyhow::bail!(
                "Unsupported ruleset format {} (expected .toml or .ron)",
                path.display()
            ),
        }
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

        tracing::debug!(
            ruleset = %declaration.name,
            bans = declaration.bans.len(),
            exclusions = declaration.exclusions.len(),
            disabled = declaration.disabled_equip_points.len(),
            "loaded ruleset declaration"
        );

        Ok(declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::{Loadout, Rejection, validate};

    const RULESET: &str = r#"
        name = "test"

        [[bans]]
        class = "light"
        item = "SAP20"

        [[bans]]
        class = "Sniper"
        item = "BXT1"

        [[exclusions]]
        first = { class = "Light", item = "Phase Rifle" }
        second = { class = "Light", item = "Rage" }

        [[disabled_equip_points]]
        class = "Light"
        equip_point = "tertiary"

        [[disabled_equip_points]]
        class = "Heavy"
        equip_point = "Jetpack"

        [settings]
        TimeLimit = 20
        FriendlyFire = true
    "#;

    #[test]
    fn test_parse_toml_declaration() {
        let declaration = RulesetDeclaration::from_toml_str(RULESET).unwrap();

        assert_eq!(declaration.name, "test");
        assert_eq!(declaration.bans.len(), 2);
        assert_eq!(declaration.exclusions.len(), 1);
        assert_eq!(declaration.settings.get_number("TimeLimit"), Some(20.0));
        assert_eq!(declaration.settings.get_bool("FriendlyFire"), Some(true));
    }

    #[test]
    fn test_apply_skips_unknown_identifiers() {
        let declaration = RulesetDeclaration::from_toml_str(RULESET).unwrap();
        let mut registry = ConstraintRegistry::new();

        let warnings = declaration.apply(&mut registry);

        assert_eq!(
            warnings,
            vec![
                RulesetWarning::UnknownClass {
                    rule: RuleKind::Ban,
                    name: "Sniper".into(),
                },
                RulesetWarning::UnknownEquipPoint {
                    name: "Jetpack".into(),
                },
            ]
        );
        assert_eq!(registry.len(), 3);
        assert!(registry.is_banned(ClassId::Light, "SAP20"));
        assert!(registry.is_slot_disabled(ClassId::Light, EquipPoint::Tertiary));

        let loadout = Loadout::new(ClassId::Light)
            .with(EquipPoint::Primary, "Rage")
            .with(EquipPoint::Secondary, "Phase Rifle");
        assert_eq!(
            validate(&registry, &loadout).rejection(),
            Some(&Rejection::MutuallyExclusive(
                "Phase Rifle".into(),
                "Rage".into()
            ))
        );
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let declaration = RulesetDeclaration::from_toml_str(RULESET).unwrap();
        let mut registry = ConstraintRegistry::new();

        declaration.apply(&mut registry);
        let after_first = registry.len();
        declaration.apply(&mut registry);

        assert_eq!(registry.len(), after_first);
    }

    #[test]
    fn test_parse_ron_declaration() {
        let declaration = RulesetDeclaration::from_ron_str(
            r#"(
                name: "ron",
                bans: [(class: "Heavy", item: "Fusion Mortar Deluxe")],
                settings: { "MaxPlayers": 32 },
            )"#,
        )
        .unwrap();

        assert_eq!(declaration.name, "ron");
        assert!(declaration.exclusions.is_empty());
        assert_eq!(declaration.settings.get_number("MaxPlayers"), Some(32.0));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, "name: x").unwrap();

        let err = RulesetLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported ruleset format"));
    }
}
