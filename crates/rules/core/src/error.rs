//! Diagnostic infrastructure shared by rejections and load-time warnings.
//!
//! Nothing in rules-core fails. Problems surface as data instead:
//!
//! - [`crate::Rejection`] explains why a loadout was refused.
//! - [`RulesetWarning`] flags a ruleset declaration that is inert or risky.
//!
//! Both implement [`RulesDiagnostic`] so hosts can log and localize them
//! uniformly by their stable code.

use crate::registry::{RuleEndpoint, RuleKind};
use crate::settings::SettingKind;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Ruleset declaration accepted but likely not what the author meant.
    ///
    /// Examples: unknown class name, cross-class exclusion, unknown setting key
    Warning,

    /// Player input refused by the current ruleset.
    ///
    /// Examples: banned item, disabled slot
    Rejection,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Rejection => "rejection",
        }
    }
}

/// Common trait for every diagnostic produced by rules-core.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display impl
/// - Codes are SCREAMING_SNAKE and never change once published
pub trait RulesDiagnostic: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this diagnostic.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this diagnostic variant.
    fn error_code(&self) -> &'static str;
}

/// Load-time finding about a ruleset declaration.
///
/// Warnings never stop a ruleset from loading. The offending declaration is
/// either skipped (unknown identifiers) or applied as written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RulesetWarning {
    /// A rule named a class outside the known set; the rule was skipped.
    #[error("unknown class '{name}' in {rule} rule")]
    UnknownClass { rule: RuleKind, name: String },

    /// A rule named an equip point outside the known set; the rule was skipped.
    #[error("unknown equip point '{name}' in disabled equip point rule")]
    UnknownEquipPoint { name: String },

    /// Exclusion endpoints name different classes. Such a pair can never be
    /// triggered by a single-class loadout.
    #[error("exclusion between {first} and {second} spans two classes and never triggers")]
    CrossClassExclusion {
        first: RuleEndpoint,
        second: RuleEndpoint,
    },

    /// Exclusion pairs an item with itself. It can never be triggered.
    #[error("exclusion of {endpoint} with itself never triggers")]
    SelfExclusion { endpoint: RuleEndpoint },

    /// An override layer introduced a key the base settings do not define.
    #[error("override layer '{layer}' introduces unknown setting '{key}'")]
    UnknownSettingKey { layer: String, key: String },

    /// An override layer changed the value kind of a base setting.
    #[error("override layer '{layer}' changes setting '{key}' from {base} to {replacement}")]
    SettingKindChanged {
        layer: String,
        key: String,
        base: SettingKind,
        replacement: SettingKind,
    },
}

impl RulesDiagnostic for RulesetWarning {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn error_code(&self) -> &'static str {
        use RulesetWarning::*;
        match self {
            UnknownClass { .. } => "RULESET_UNKNOWN_CLASS",
            UnknownEquipPoint { .. } => "RULESET_UNKNOWN_EQUIP_POINT",
            CrossClassExclusion { .. } => "RULESET_CROSS_CLASS_EXCLUSION",
            SelfExclusion { .. } => "RULESET_SELF_EXCLUSION",
            UnknownSettingKey { .. } => "SETTINGS_UNKNOWN_KEY",
            SettingKindChanged { .. } => "SETTINGS_KIND_CHANGED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::EquipPoint;
    use crate::validate::Rejection;

    #[test]
    fn warnings_and_rejections_report_their_severity() {
        let warning = RulesetWarning::UnknownSettingKey {
            layer: "tournament".into(),
            key: "Bots".into(),
        };
        let rejection = Rejection::SlotDisabled(EquipPoint::Tertiary);

        assert_eq!(warning.severity(), ErrorSeverity::Warning);
        assert_eq!(warning.severity().as_str(), "warning");
        assert_eq!(rejection.severity(), ErrorSeverity::Rejection);
        assert_eq!(rejection.severity().as_str(), "rejection");
    }
}
