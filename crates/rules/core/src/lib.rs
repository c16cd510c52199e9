//! Deterministic match rules shared by match servers and tooling.
//!
//! `rules-core` defines the canonical rule layer: which loadouts a class may
//! field ([`ConstraintRegistry`] + [`validate`]) and which settings a match
//! runs with ([`apply_overrides`]). Every API here is pure and performs no
//! I/O; loading rules from files lives in `rules-content` and publishing
//! them to a running server lives in `rules-runtime`.
pub mod error;
pub mod loadout;
pub mod registry;
pub mod settings;
pub mod validate;

pub use error::{ErrorSeverity, RulesDiagnostic, RulesetWarning};
pub use loadout::{ClassId, EquipPoint, EquipPoints, ItemName, Loadout};
pub use registry::{
    BanRule, ConstraintRegistry, DisabledSlotRule, ExclusionRule, RuleEndpoint, RuleKind,
};
pub use settings::{
    EffectiveSettings, OverrideLayer, Provenance, SettingKind, SettingValue, SettingsMap,
    SettingsOverlay, SettingsSchema, apply_overrides,
};
pub use validate::{Rejection, ValidationResult, validate};
