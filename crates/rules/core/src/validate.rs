//! Loadout validation against a [`ConstraintRegistry`].
//!
//! ## Precedence
//!
//! The first failing check wins, so a rejection always carries one reason:
//!
//! 1. Disabled equip points, in equip point order
//! 2. Banned items, in equip point order
//! 3. Mutually exclusive pairs, in equip point order of the pair
//!
//! Slot and ban checks are absolute prohibitions and are reported before any
//! pairwise conflict, even when both are present.

use crate::error::{ErrorSeverity, RulesDiagnostic};
use crate::loadout::{EquipPoint, ItemName, Loadout};
use crate::registry::ConstraintRegistry;

/// Why a loadout was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// The class may not fill this equip point at all.
    #[error("equip point {0} is disabled for this class")]
    SlotDisabled(EquipPoint),

    /// The class may never equip this item.
    #[error("item '{0}' is banned for this class")]
    ItemBanned(ItemName),

    /// The two items may not be equipped together. Reported in the
    /// orientation the exclusion was declared.
    #[error("items '{0}' and '{1}' cannot be equipped together")]
    MutuallyExclusive(ItemName, ItemName),
}

impl RulesDiagnostic for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Rejection
    }

    fn error_code(&self) -> &'static str {
        match self {
            Rejection::SlotDisabled(_) => "LOADOUT_SLOT_DISABLED",
            Rejection::ItemBanned(_) => "LOADOUT_ITEM_BANNED",
            Rejection::MutuallyExclusive(..) => "LOADOUT_MUTUALLY_EXCLUSIVE",
        }
    }
}

/// Verdict for one loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationResult {
    Accepted,
    Rejected(Rejection),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ValidationResult::Accepted => None,
            ValidationResult::Rejected(reason) => Some(reason),
        }
    }

    /// Converts the verdict into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            ValidationResult::Accepted => Ok(()),
            ValidationResult::Rejected(reason) => Err(reason),
        }
    }
}

impl From<Result<(), Rejection>> for ValidationResult {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => ValidationResult::Accepted,
            Err(reason) => ValidationResult::Rejected(reason),
        }
    }
}

/// Checks `loadout` against every rule in `registry`.
///
/// Pure: identical inputs always produce identical verdicts.
pub fn validate(registry: &ConstraintRegistry, loadout: &Loadout) -> ValidationResult {
    check(registry, loadout).into()
}

fn check(registry: &ConstraintRegistry, loadout: &Loadout) -> Result<(), Rejection> {
    let class = loadout.class();

    // 1. Disabled equip points
    if let Some((slot, _)) = loadout
        .slots()
        .find(|(slot, _)| registry.is_slot_disabled(class, *slot))
    {
        return Err(Rejection::SlotDisabled(slot));
    }

    // 2. Bans
    if let Some((_, item)) = loadout
        .slots()
        .find(|(_, item)| registry.is_banned(class, item.as_str()))
    {
        return Err(Rejection::ItemBanned(item.clone()));
    }

    // 3. Pairwise exclusions
    let items: Vec<&ItemName> = loadout.slots().map(|(_, item)| item).collect();
    for (i, item_a) in items.iter().enumerate() {
        let conflicts = registry.conflicts_with(class, item_a.as_str());
        if conflicts.is_empty() {
            continue;
        }
        for item_b in &items[i + 1..] {
            if item_a == item_b || !conflicts.contains(item_b.as_str()) {
                continue;
            }
            let reason = match registry.exclusion_between(class, item_a.as_str(), item_b.as_str()) {
                Some(rule) => {
                    Rejection::MutuallyExclusive(rule.first.item.clone(), rule.second.item.clone())
                }
                None => Rejection::MutuallyExclusive((*item_a).clone(), (*item_b).clone()),
            };
            return Err(reason);
        }
    }

    Ok(())
}
