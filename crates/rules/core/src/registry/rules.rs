//! Rule records stored by the [`super::ConstraintRegistry`].

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::loadout::{ClassId, EquipPoint, ItemName};

/// Kind of rule declaration, used to label diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RuleKind {
    Ban,
    Exclusion,
    DisabledEquipPoint,
}

/// One side of an exclusion: an item as equipped by a specific class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleEndpoint {
    pub class: ClassId,
    pub item: ItemName,
}

impl RuleEndpoint {
    pub fn new(class: ClassId, item: impl Into<ItemName>) -> Self {
        Self {
            class,
            item: item.into(),
        }
    }
}

impl fmt::Display for RuleEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:'{}'", self.class, self.item)
    }
}

/// `item` may never be equipped by `class`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BanRule {
    pub class: ClassId,
    pub item: ItemName,
}

/// `equip_point` may not be filled at all by `class`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisabledSlotRule {
    pub class: ClassId,
    pub equip_point: EquipPoint,
}

/// Two endpoints that must not be equipped together.
///
/// Equality and hashing ignore endpoint order, so `{A, B}` and `{B, A}` are
/// the same rule. The stored orientation is the one first declared and is
/// the orientation reported in rejections.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionRule {
    pub first: RuleEndpoint,
    pub second: RuleEndpoint,
}

impl ExclusionRule {
    pub fn new(first: RuleEndpoint, second: RuleEndpoint) -> Self {
        Self { first, second }
    }

    /// Both endpoints name the same class.
    pub fn is_same_class(&self) -> bool {
        self.first.class == self.second.class
    }

    /// Both endpoints are identical.
    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }

    /// Returns true if this rule can trigger inside a loadout of `class`.
    pub fn applies_to(&self, class: ClassId) -> bool {
        self.first.class == class && self.second.class == class
    }

    /// Returns the opposite endpoint's item when `item` is one side of this
    /// rule as equipped by `class`. Only same-class rules answer, and a
    /// self-exclusion never does.
    pub fn partner_of(&self, class: ClassId, item: &str) -> Option<&ItemName> {
        if !self.applies_to(class) || self.is_degenerate() {
            return None;
        }
        if self.first.item == item {
            Some(&self.second.item)
        } else if self.second.item == item {
            Some(&self.first.item)
        } else {
            None
        }
    }

    fn canonical(&self) -> (&RuleEndpoint, &RuleEndpoint) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for ExclusionRule {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ExclusionRule {}

impl Hash for ExclusionRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}
