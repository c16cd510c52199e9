//! Validate one loadout from the command line
//!
//! Useful for checking how a ruleset treats a reported loadout without
//! starting a match server.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use rules_core::{ClassId, EquipPoint, Loadout, RulesDiagnostic, ValidationResult};
use rules_runtime::load_ruleset;

use super::RulesetArgs;

/// Validate a single loadout against a ruleset
#[derive(Parser)]
pub struct Validate {
    #[command(flatten)]
    ruleset: RulesetArgs,

    /// Player class (Light, Medium, Heavy)
    #[arg(short, long, value_name = "CLASS")]
    class: ClassId,

    /// Slot assignment, e.g. `Primary=Rage` (repeatable)
    #[arg(short, long = "slot", value_name = "POINT=ITEM", value_parser = parse_slot)]
    slots: Vec<(EquipPoint, String)>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let config = self.ruleset.to_config();
        let ruleset = load_ruleset(&config)
            .with_context(|| format!("Failed to load ruleset '{}'", config.ruleset))?;

        let loadout = self
            .slots
            .into_iter()
            .fold(Loadout::new(self.class), |loadout, (point, item)| {
                loadout.with(point, item)
            });

        println!(
            "{} {} ({})",
            style("Ruleset:").bold().cyan(),
            ruleset.name(),
            ruleset.digest().short()
        );
        println!("{} {}", style("Class:").bold().cyan(), loadout.class());
        for (point, item) in loadout.slots() {
            println!("  {point:<10} {item}");
        }
        println!();

        match ruleset.validate(&loadout) {
            ValidationResult::Accepted => {
                println!("{}", style("ACCEPTED").bold().green());
                Ok(())
            }
            ValidationResult::Rejected(reason) => {
                println!(
                    "{} {} {}",
                    style("REJECTED").bold().red(),
                    style(reason.error_code()).yellow(),
                    reason
                );
                anyhow::bail!("loadout rejected")
            }
        }
    }
}

fn parse_slot(value: &str) -> Result<(EquipPoint, String), String> {
    let (point, item) = value
        .split_once('=')
        .ok_or_else(|| format!("expected POINT=ITEM, got '{value}'"))?;
    let point = point
        .trim()
        .parse::<EquipPoint>()
        .map_err(|_| format!("unknown equip point '{}'", point.trim()))?;
    let item = item.trim();
    if item.is_empty() {
        return Err(format!("missing item for {point}"));
    }
    Ok((point, item.to_string()))
}
