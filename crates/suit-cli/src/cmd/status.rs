use crate::output::{print_json, print_table};
use anyhow::Context;
use suit_core::SteeringManager;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let manager = SteeringManager::load(root).context("failed to load .kiro/suit.yaml")?;
    let status = manager.status().context("failed to read steering directory")?;

    if json {
        return print_json(&status);
    }

    if !status.initialized {
        println!("Steering not initialized. Run: suit init");
        println!();
    }

    let rows: Vec<Vec<String>> = status
        .documents
        .iter()
        .map(|d| {
            vec![
                d.identifier.clone(),
                d.origin.to_string(),
                if d.installed { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    print_table(&["DOCUMENT", "ORIGIN", "INSTALLED"], rows);
    Ok(())
}
