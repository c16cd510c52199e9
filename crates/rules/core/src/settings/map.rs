use std::collections::BTreeMap;

use super::SettingValue;

/// Setting name to value map.
///
/// Keys are kept sorted, so iteration (and anything derived from it, such as a
/// ruleset digest) never depends on insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SettingsMap(BTreeMap<String, SettingValue>);

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Option<SettingValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingValue::as_number)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> + '_ {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SettingsMap
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for SettingsMap
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Final settings after every override layer has been applied.
///
/// Produced only by the overlay, so holding one means the merge is complete.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EffectiveSettings(SettingsMap);

impl EffectiveSettings {
    pub(super) fn from_map(map: SettingsMap) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &SettingsMap {
        &self.0
    }

    pub fn into_map(self) -> SettingsMap {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get_bool(key)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.0.get_number(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.0.get_text(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
