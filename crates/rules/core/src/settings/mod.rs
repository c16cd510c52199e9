//! Match settings: values, maps, the override overlay and its schema check.

mod map;
mod overlay;
mod schema;
mod value;

pub use map::{EffectiveSettings, SettingsMap};
pub use overlay::{OverrideLayer, Provenance, SettingsOverlay, apply_overrides};
pub use schema::SettingsSchema;
pub use value::{SettingKind, SettingValue};
