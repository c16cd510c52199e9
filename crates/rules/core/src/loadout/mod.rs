//! Candidate loadouts submitted for validation.
//!
//! A [`Loadout`] is transient: the host builds one per selection event and
//! hands it to [`crate::validate`]. Slots are kept in [`EquipPoint`] order so
//! every walk over a loadout is deterministic, independent of the order in
//! which slots were filled.

mod ids;
mod item;

use std::collections::BTreeMap;

pub use ids::{ClassId, EquipPoint, EquipPoints};
pub use item::ItemName;

/// A class plus at most one item per equip point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    class: ClassId,
    #[cfg_attr(feature = "serde", serde(default))]
    slots: BTreeMap<EquipPoint, ItemName>,
}

impl Loadout {
    /// Creates an empty loadout for `class`.
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            slots: BTreeMap::new(),
        }
    }

    /// Fills `slot` with `item` (builder pattern). A second call for the same
    /// slot replaces the first item.
    #[must_use]
    pub fn with(mut self, slot: EquipPoint, item: impl Into<ItemName>) -> Self {
        self.equip(slot, item);
        self
    }

    /// Fills `slot`, returning the item it previously held.
    pub fn equip(&mut self, slot: EquipPoint, item: impl Into<ItemName>) -> Option<ItemName> {
        self.slots.insert(slot, item.into())
    }

    /// Empties `slot`, returning the item it held.
    pub fn unequip(&mut self, slot: EquipPoint) -> Option<ItemName> {
        self.slots.remove(&slot)
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Returns the item in `slot`, if filled.
    pub fn item(&self, slot: EquipPoint) -> Option<&ItemName> {
        self.slots.get(&slot)
    }

    /// Iterates filled slots in equip point order.
    pub fn slots(&self) -> impl Iterator<Item = (EquipPoint, &ItemName)> + '_ {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    /// Returns the set of filled equip points.
    pub fn filled(&self) -> EquipPoints {
        self.slots.keys().copied().collect()
    }

    /// Returns the number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
