use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use suit_core::config::Config;
use suit_core::types::Severity;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration (defaults filled in)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    if json {
        return print_json(&config);
    }

    println!("Max name length: {}", config.names.max_length);
    println!("Validation severities:");
    let policy = &config.validation;
    println!("  {:<20} {}", "missing-title", policy.missing_title);
    println!("  {:<20} {}", "multiple-titles", policy.multiple_titles);
    println!("  {:<20} {}", "heading-skip", policy.heading_skip);
    println!("  {:<20} {}", "empty-section", policy.empty_section);
    if policy.required_sections.is_empty() {
        println!("Required sections: (none)");
    } else {
        println!("Required sections:");
        for s in &policy.required_sections {
            println!("  {:<20} {}", s.name, s.severity);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            println!("[{}] {}", w.level, w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == Severity::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
