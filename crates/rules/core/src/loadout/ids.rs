//! Closed identifier sets: player classes and equipment slots.
//!
//! Both enums parse case-insensitively from their display names so ruleset
//! files can write `light` or `Light`. Item names are NOT normalized; see
//! [`super::ItemName`].

/// Player class (armor archetype) that scopes every equipment rule.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ClassId {
    /// Fast, lightly armored.
    Light,
    /// Balanced.
    Medium,
    /// Slow, heavily armored.
    Heavy,
}

/// Equipment attachment position on a loadout.
///
/// The declaration order doubles as the iteration order of a [`super::Loadout`],
/// which is what makes validation verdicts deterministic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum EquipPoint {
    Primary,
    Secondary,
    Tertiary,
    Belt,
    Pack,
    Skin,
    Voice,
}

impl EquipPoint {
    /// Returns the single-bit mask for this equip point.
    pub const fn flag(self) -> EquipPoints {
        match self {
            EquipPoint::Primary => EquipPoints::PRIMARY,
            EquipPoint::Secondary => EquipPoints::SECONDARY,
            EquipPoint::Tertiary => EquipPoints::TERTIARY,
            EquipPoint::Belt => EquipPoints::BELT,
            EquipPoint::Pack => EquipPoints::PACK,
            EquipPoint::Skin => EquipPoints::SKIN,
            EquipPoint::Voice => EquipPoints::VOICE,
        }
    }
}

bitflags::bitflags! {
    /// Set of equip points, one bit per [`EquipPoint`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EquipPoints: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
        const TERTIARY = 1 << 2;
        const BELT = 1 << 3;
        const PACK = 1 << 4;
        const SKIN = 1 << 5;
        const VOICE = 1 << 6;
    }
}

impl EquipPoints {
    /// Returns true if `point` is in the set.
    pub const fn has(self, point: EquipPoint) -> bool {
        self.contains(point.flag())
    }

    /// Iterates the members of the set in declaration order.
    pub fn points(self) -> impl Iterator<Item = EquipPoint> {
        use strum::IntoEnumIterator;
        EquipPoint::iter().filter(move |point| self.has(*point))
    }
}

impl FromIterator<EquipPoint> for EquipPoints {
    fn from_iter<I: IntoIterator<Item = EquipPoint>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EquipPoints::empty(), |acc, point| acc | point.flag())
    }
}
