//! Load a ruleset and report what it will enforce
//!
//! Prints load warnings, the content digest and the effective settings with
//! the layer each value came from.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use rules_core::{Provenance, RulesDiagnostic};
use rules_runtime::{LoadedRuleset, load_ruleset};

use super::RulesetArgs;

/// Load a ruleset and print warnings, digest and effective settings
#[derive(Parser)]
pub struct Check {
    #[command(flatten)]
    ruleset: RulesetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Exit with an error when the ruleset produced any warning
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Summary,
    /// Full JSON output
    Json,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let config = self.ruleset.to_config();
        let ruleset = load_ruleset(&config).with_context(|| {
            format!(
                "Failed to load ruleset '{}' from {}",
                config.ruleset,
                config.data_dir.display()
            )
        })?;

        match self.format {
            OutputFormat::Summary => print_summary(&ruleset),
            OutputFormat::Json => print_json(&ruleset)?,
        }

        if self.deny_warnings && !ruleset.warnings().is_empty() {
            anyhow::bail!(
                "ruleset '{}' produced {} warning(s)",
                ruleset.name(),
                ruleset.warnings().len()
            );
        }

        Ok(())
    }
}

fn print_summary(ruleset: &LoadedRuleset) {
    println!("{} {}", style("Ruleset:").bold().cyan(), ruleset.name());
    println!("{} {}", style("Digest:").bold().cyan(), ruleset.digest());
    let layers: Vec<_> = ruleset.layers().collect();
    if !layers.is_empty() {
        println!("{} {}", style("Layers:").bold().cyan(), layers.join(" -> "));
    }
    println!();

    let registry = ruleset.registry();
    println!("{}", style("Rules:").bold().yellow());
    for ban in registry.bans() {
        println!("  ban        {}:'{}'", ban.class, ban.item);
    }
    for exclusion in registry.exclusions() {
        println!("  exclusion  {} <-> {}", exclusion.first, exclusion.second);
    }
    for rule in registry.disabled_equip_points() {
        println!("  disabled   {}:{}", rule.class, rule.equip_point);
    }
    if registry.is_empty() {
        println!("  (none)");
    }
    println!();

    println!("{}", style("Effective settings:").bold().yellow());
    for (key, value) in ruleset.settings().iter() {
        let source = match ruleset.provenance(key) {
            Some(Provenance::Layer(layer)) => style(format!("[{layer}]")).magenta(),
            _ => style("[base]".to_string()).dim(),
        };
        let rendered = value.to_string();
        println!("  {key:<24} {rendered:<12} {source}");
    }
    println!();

    if ruleset.warnings().is_empty() {
        println!("{}", style("No warnings").bold().green());
    } else {
        println!(
            "{}",
            style(format!("Warnings ({}):", ruleset.warnings().len()))
                .bold()
                .red()
        );
        for warning in ruleset.warnings() {
            println!("  {} {}", style(warning.error_code()).yellow(), warning);
        }
    }
}

fn print_json(ruleset: &LoadedRuleset) -> Result<()> {
    let json = serde_json::to_string_pretty(&ruleset.summary())
        .context("Failed to serialize ruleset summary to JSON")?;
    println!("{}", json);
    Ok(())
}
