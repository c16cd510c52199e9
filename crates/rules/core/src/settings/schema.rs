use std::collections::BTreeMap;

use crate::error::RulesetWarning;

use super::{SettingKind, SettingsMap};

/// Known setting keys and the value kind each one expects.
///
/// The schema is the shape of the base map: overrides are free to change any
/// value, but a key the base does not define or a value of a different kind
/// is reported. Reports never block the merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsSchema {
    kinds: BTreeMap<String, SettingKind>,
}

impl SettingsSchema {
    pub fn from_base(base: &SettingsMap) -> Self {
        Self {
            kinds: base
                .iter()
                .map(|(key, value)| (key.to_owned(), value.kind()))
                .collect(),
        }
    }

    /// Expected kind of `key`, if the key is known.
    pub fn kind_of(&self, key: &str) -> Option<SettingKind> {
        self.kinds.get(key).copied()
    }

    /// Reports unknown keys and kind changes in one override layer.
    pub fn check(&self, layer: &str, overrides: &SettingsMap) -> Vec<RulesetWarning> {
        overrides
            .iter()
            .filter_map(|(key, value)| match self.kind_of(key) {
                None => Some(RulesetWarning::UnknownSettingKey {
                    layer: layer.to_owned(),
                    key: key.to_owned(),
                }),
                Some(base) if base != value.kind() => Some(RulesetWarning::SettingKindChanged {
                    layer: layer.to_owned(),
                    key: key.to_owned(),
                    base,
                    replacement: value.kind(),
                }),
                Some(_) => None,
            })
            .collect()
    }
}
