//! Data-driven ruleset definitions and loaders.
//!
//! This crate houses the bundled ruleset content and provides loaders for
//! TOML/RON data files:
//! - Ruleset declarations: bans, exclusions, disabled equip points (TOML or RON)
//! - Base settings and named override layers (TOML)
//!
//! Declarations are plain data until applied to a `rules_core::ConstraintRegistry`;
//! unknown class or equip point names surface as warnings at that point.

pub mod loaders;

pub use loaders::{
    BanDecl, DisabledEquipPointDecl, EndpointDecl, ExclusionDecl, LoadResult, RulesetDeclaration,
    RulesetFactory, RulesetLoader, SettingsLoader,
};
