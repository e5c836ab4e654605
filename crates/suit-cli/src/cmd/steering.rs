use crate::output::{print_diagnostics, print_json};
use anyhow::Context;
use clap::Subcommand;
use std::io::{BufRead, Write};
use std::path::Path;
use suit_core::template::TemplateMetadata;
use suit_core::types::Inclusion;
use suit_core::{Confirmed, SteeringManager, SuitError};

#[derive(Subcommand)]
pub enum SteeringSubcommand {
    /// Create a custom steering document from the standard template
    Create {
        /// Kebab-case document name (e.g. api-conventions)
        name: String,
        /// Title for the top-level heading (default: derived from the name)
        #[arg(long)]
        title: Option<String>,
        /// Text for the Purpose section
        #[arg(long)]
        description: Option<String>,
        /// Front-matter inclusion mode: always, file-match, or manual
        #[arg(long, default_value = "always")]
        inclusion: Inclusion,
        /// Glob the document applies to; required with --inclusion file-match
        #[arg(long)]
        file_match_pattern: Option<String>,
    },
    /// Rename a custom steering document, keeping its content
    Rename { old: String, new: String },
    /// Delete a custom steering document
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Check a steering document's structure
    Validate { name: String },
    /// Print a steering document
    Show { name: String },
}

pub fn run(root: &Path, subcmd: SteeringSubcommand, json: bool) -> anyhow::Result<()> {
    let manager = SteeringManager::load(root).context("failed to load .kiro/suit.yaml")?;
    match subcmd {
        SteeringSubcommand::Create {
            name,
            title,
            description,
            inclusion,
            file_match_pattern,
        } => {
            let meta = TemplateMetadata {
                title,
                description,
                inclusion,
                file_match_pattern,
            };
            create(&manager, &name, &meta, json)
        }
        SteeringSubcommand::Rename { old, new } => rename(&manager, &old, &new, json),
        SteeringSubcommand::Delete { name, yes } => delete(&manager, &name, yes, json),
        SteeringSubcommand::Validate { name } => validate(&manager, &name, json),
        SteeringSubcommand::Show { name } => show(&manager, &name, json),
    }
}

fn create(
    manager: &SteeringManager,
    name: &str,
    meta: &TemplateMetadata,
    json: bool,
) -> anyhow::Result<()> {
    let doc = manager
        .create(name, meta)
        .with_context(|| format!("failed to create steering document '{name}'"))?;

    if json {
        print_json(&serde_json::json!({
            "identifier": doc.identifier,
            "origin": doc.origin,
            "path": doc.path,
        }))?;
    } else {
        println!("Created steering document '{}'.", doc.identifier);
        println!("  Path: {}", doc.path.display());
    }
    Ok(())
}

fn rename(manager: &SteeringManager, old: &str, new: &str, json: bool) -> anyhow::Result<()> {
    let doc = manager
        .rename(old, new)
        .with_context(|| format!("failed to rename '{old}' to '{new}'"))?;

    if json {
        print_json(&serde_json::json!({
            "from": old,
            "to": doc.identifier,
            "path": doc.path,
        }))?;
    } else {
        println!("Renamed '{old}' to '{}'.", doc.identifier);
    }
    Ok(())
}

fn delete(manager: &SteeringManager, name: &str, yes: bool, json: bool) -> anyhow::Result<()> {
    // Surface NotFound / NotCustom before asking anything.
    let doc = manager
        .get(name)
        .with_context(|| format!("failed to delete '{name}'"))?;
    if !doc.origin.is_mutable() {
        return Err(SuitError::NotCustom(doc.identifier))
            .with_context(|| format!("failed to delete '{name}'"));
    }

    if !yes && !confirm(&format!("Delete steering document '{name}'?"))? {
        anyhow::bail!("deletion of '{name}' not confirmed");
    }

    let deleted = manager
        .delete(name, Confirmed::by_caller())
        .with_context(|| format!("failed to delete '{name}'"))?;

    if json {
        print_json(&serde_json::json!({
            "identifier": deleted.identifier,
            "path": deleted.path,
            "deleted": true,
        }))?;
    } else {
        println!("Deleted steering document '{}'.", deleted.identifier);
    }
    Ok(())
}

/// Ask on stderr, read one line from stdin. Only `y` / `yes` confirm.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn validate(manager: &SteeringManager, name: &str, json: bool) -> anyhow::Result<()> {
    let result = manager
        .validate(name)
        .with_context(|| format!("failed to validate '{name}'"))?;

    if json {
        print_json(&serde_json::json!({
            "identifier": name,
            "is_valid": result.is_valid(),
            "diagnostics": result.diagnostics,
        }))?;
    } else {
        print_diagnostics(name, &result);
    }

    if !result.is_valid() {
        anyhow::bail!("'{name}' failed validation");
    }
    Ok(())
}

fn show(manager: &SteeringManager, name: &str, json: bool) -> anyhow::Result<()> {
    let doc = manager
        .get(name)
        .with_context(|| format!("failed to show '{name}'"))?;

    if json {
        print_json(&doc)?;
    } else {
        print!("{}", doc.content);
        if !doc.content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
