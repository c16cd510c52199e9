//! Constraint registry: per-class bans, exclusions and disabled equip points.
//!
//! The registry grows only. A loaded ruleset never loses a rule, so the
//! registry is treated as immutable once it is handed to the validator.
//! Rules that reference items nothing equips are harmless; they simply never
//! match.

mod rules;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::RulesetWarning;
use crate::loadout::{ClassId, EquipPoint, EquipPoints, ItemName};

pub use rules::{BanRule, DisabledSlotRule, ExclusionRule, RuleEndpoint, RuleKind};

/// In-memory store of every equipment rule in a ruleset.
#[derive(Clone, Debug, Default)]
pub struct ConstraintRegistry {
    bans: BTreeMap<ClassId, BTreeSet<ItemName>>,
    /// Declaration order, first orientation wins.
    exclusions: Vec<ExclusionRule>,
    exclusion_index: HashSet<ExclusionRule>,
    disabled: BTreeMap<ClassId, EquipPoints>,
}

impl ConstraintRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bans `item` for `class`. Returns false if the ban already existed.
    pub fn add_ban(&mut self, class: ClassId, item: impl Into<ItemName>) -> bool {
        self.bans.entry(class).or_default().insert(item.into())
    }

    /// Declares `item_a` (as equipped by `class_a`) and `item_b` (as equipped
    /// by `class_b`) mutually exclusive.
    ///
    /// The pair is unordered: declaring `(B, A)` after `(A, B)` is a no-op.
    /// Returns false if the pair already existed.
    pub fn add_exclusion(
        &mut self,
        class_a: ClassId,
        item_a: impl Into<ItemName>,
        class_b: ClassId,
        item_b: impl Into<ItemName>,
    ) -> bool {
        let rule = ExclusionRule::new(
            RuleEndpoint::new(class_a, item_a),
            RuleEndpoint::new(class_b, item_b),
        );
        if !self.exclusion_index.insert(rule.clone()) {
            return false;
        }
        self.exclusions.push(rule);
        true
    }

    /// Disables `equip_point` for `class`. Returns false if already disabled.
    pub fn add_disabled_equip_point(&mut self, class: ClassId, equip_point: EquipPoint) -> bool {
        let points = self.disabled.entry(class).or_default();
        let added = !points.has(equip_point);
        points.insert(equip_point.flag());
        added
    }

    pub fn is_banned(&self, class: ClassId, item: &str) -> bool {
        self.bans
            .get(&class)
            .is_some_and(|items| items.contains(item))
    }

    pub fn is_slot_disabled(&self, class: ClassId, equip_point: EquipPoint) -> bool {
        self.disabled_points(class).has(equip_point)
    }

    /// Returns every equip point disabled for `class`.
    pub fn disabled_points(&self, class: ClassId) -> EquipPoints {
        self.disabled.get(&class).copied().unwrap_or_default()
    }

    /// Returns every item that must not be equipped alongside `item` by
    /// `class`.
    ///
    /// Only exclusions whose two endpoints both name `class` contribute;
    /// cross-class pairs are stored but never answer here.
    pub fn conflicts_with(&self, class: ClassId, item: &str) -> BTreeSet<ItemName> {
        self.exclusions
            .iter()
            .filter_map(|rule| rule.partner_of(class, item))
            .cloned()
            .collect()
    }

    /// Returns the same-class exclusion covering `a` and `b`, if any.
    pub fn exclusion_between(&self, class: ClassId, a: &str, b: &str) -> Option<&ExclusionRule> {
        self.exclusions.iter().find(|rule| {
            rule.partner_of(class, a)
                .is_some_and(|partner| partner == b)
        })
    }

    /// Iterates ban rules ordered by class, then item.
    pub fn bans(&self) -> impl Iterator<Item = BanRule> + '_ {
        self.bans.iter().flat_map(|(class, items)| {
            items.iter().map(|item| BanRule {
                class: *class,
                item: item.clone(),
            })
        })
    }

    /// Returns exclusion rules in declaration order.
    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    /// Iterates disabled equip point rules ordered by class, then equip point.
    pub fn disabled_equip_points(&self) -> impl Iterator<Item = DisabledSlotRule> + '_ {
        self.disabled.iter().flat_map(|(class, points)| {
            points.points().map(|equip_point| DisabledSlotRule {
                class: *class,
                equip_point,
            })
        })
    }

    /// Returns the total number of rules of all three kinds.
    pub fn len(&self) -> usize {
        let bans: usize = self.bans.values().map(BTreeSet::len).sum();
        let disabled: usize = self
            .disabled
            .values()
            .map(|points| points.bits().count_ones() as usize)
            .sum();
        bans + self.exclusions.len() + disabled
    }

    /// Returns true if no rule has been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reports exclusions that can never trigger.
    ///
    /// Cross-class and self exclusions are legal declarations, so they stay in
    /// the registry; this only makes them visible at load time.
    pub fn lint(&self) -> Vec<RulesetWarning> {
        self.exclusions
            .iter()
            .filter_map(|rule| {
                if rule.is_degenerate() {
                    Some(RulesetWarning::SelfExclusion {
                        endpoint: rule.first.clone(),
                    })
                } else if !rule.is_same_class() {
                    Some(RulesetWarning::CrossClassExclusion {
                        first: rule.first.clone(),
                        second: rule.second.clone(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ban_is_idempotent() {
        let mut registry = ConstraintRegistry::new();

        assert!(registry.add_ban(ClassId::Light, "SAP20"));
        for _ in 0..3 {
            assert!(!registry.add_ban(ClassId::Light, "SAP20"));
        }

        assert!(registry.is_banned(ClassId::Light, "SAP20"));
        assert!(!registry.is_banned(ClassId::Medium, "SAP20"));
        assert!(!registry.is_banned(ClassId::Light, "sap20"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn exclusion_is_unordered_and_idempotent() {
        let mut registry = ConstraintRegistry::new();

        assert!(registry.add_exclusion(ClassId::Light, "Phase Rifle", ClassId::Light, "Rage"));
        assert!(!registry.add_exclusion(ClassId::Light, "Rage", ClassId::Light, "Phase Rifle"));

        assert_eq!(registry.exclusions().len(), 1);
        assert_eq!(registry.exclusions()[0].first.item, "Phase Rifle");

        let conflicts = registry.conflicts_with(ClassId::Light, "Rage");
        assert!(conflicts.contains("Phase Rifle"));
        let conflicts = registry.conflicts_with(ClassId::Light, "Phase Rifle");
        assert!(conflicts.contains("Rage"));
        assert!(registry.conflicts_with(ClassId::Medium, "Rage").is_empty());
    }

    #[test]
    fn cross_class_exclusion_is_stored_but_inert() {
        let mut registry = ConstraintRegistry::new();
        registry.add_exclusion(ClassId::Light, "Rage", ClassId::Heavy, "Saber Launcher");

        assert_eq!(registry.exclusions().len(), 1);
        assert!(registry.conflicts_with(ClassId::Light, "Rage").is_empty());
        assert!(registry.conflicts_with(ClassId::Heavy, "Saber Launcher").is_empty());

        let warnings = registry.lint();
        assert!(matches!(
            warnings.as_slice(),
            [RulesetWarning::CrossClassExclusion { .. }]
        ));
    }

    #[test]
    fn self_exclusion_is_stored_but_never_conflicts() {
        let mut registry = ConstraintRegistry::new();
        assert!(registry.add_exclusion(ClassId::Medium, "Thumper", ClassId::Medium, "Thumper"));
        assert!(!registry.add_exclusion(ClassId::Medium, "Thumper", ClassId::Medium, "Thumper"));

        assert!(
            registry
                .exclusion_between(ClassId::Medium, "Thumper", "Thumper")
                .is_none()
        );
        assert!(registry.conflicts_with(ClassId::Medium, "Thumper").is_empty());
        assert!(matches!(
            registry.lint().as_slice(),
            [RulesetWarning::SelfExclusion { .. }]
        ));
    }

    #[test]
    fn disabled_equip_points_are_per_class() {
        let mut registry = ConstraintRegistry::new();

        assert!(registry.add_disabled_equip_point(ClassId::Light, EquipPoint::Tertiary));
        assert!(!registry.add_disabled_equip_point(ClassId::Light, EquipPoint::Tertiary));
        registry.add_disabled_equip_point(ClassId::Light, EquipPoint::Belt);

        assert!(registry.is_slot_disabled(ClassId::Light, EquipPoint::Tertiary));
        assert!(!registry.is_slot_disabled(ClassId::Heavy, EquipPoint::Tertiary));
        assert_eq!(
            registry
                .disabled_equip_points()
                .map(|rule| rule.equip_point)
                .collect::<Vec<_>>(),
            vec![EquipPoint::Tertiary, EquipPoint::Belt]
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_items_never_match() {
        let registry = ConstraintRegistry::new();

        assert!(registry.is_empty());
        assert!(!registry.is_banned(ClassId::Heavy, "Anything"));
        assert!(registry.conflicts_with(ClassId::Heavy, "Anything").is_empty());
    }
}
