use crate::output::print_json;
use anyhow::Context;
use suit_core::state::{self, FileStateStore};
use suit_core::SteeringManager;
use std::path::Path;

const WELCOME: &str = "\
Welcome to SUIT: steering documents for Kiro.

  suit status                      see which steering documents are installed
  suit steering create <name>      add a custom steering document
  suit framework search <query>    find a framework reference to install";

pub fn run(root: &Path, state_file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let manager = SteeringManager::load(root).context("failed to load .kiro/suit.yaml")?;
    let report = manager
        .init()
        .with_context(|| format!("failed to initialize {}", root.display()))?;

    let show_welcome = take_welcome(state_file);

    if json {
        print_json(&serde_json::json!({
            "root": root,
            "created": report.created,
            "existing": report.existing,
        }))?;
        return Ok(());
    }

    println!("Initializing steering in: {}", root.display());
    for path in &report.created {
        println!("  created: {path}");
    }
    for path in &report.existing {
        println!("  exists:  {path}");
    }

    if show_welcome {
        println!("\n{WELCOME}");
    }

    println!("\nSteering initialized.");
    println!("Next: suit steering create <name> --title \"...\"");
    Ok(())
}

/// First-run check against the global state store. Failures here never block
/// init; they are logged and treated as "already shown".
fn take_welcome(state_file: Option<&Path>) -> bool {
    let path = match state_file {
        Some(p) => p.to_path_buf(),
        None => match FileStateStore::default_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "no global state location; skipping welcome");
                return false;
            }
        },
    };

    let result = FileStateStore::open(&path).and_then(|mut store| state::take_welcome(&mut store));
    match result {
        Ok(first_run) => first_run,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not update global state");
            false
        }
    }
}
